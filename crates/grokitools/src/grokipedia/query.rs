//! The `grokipedia_query` dispatcher.
//!
//! Used by both the CLI and the MCP tool. Every call returns an [`Envelope`];
//! failures are folded into error envelopes instead of being returned.

use crate::prelude::Error;
use grokitools_core::envelope::Envelope;
use grokitools_core::grokipedia::content::transform_content;
use grokitools_core::grokipedia::page::{transform_page, PageLookup};
use grokitools_core::grokipedia::search::{transform_search_response, SearchResult};
use grokitools_core::grokipedia::smart::{reduce_enrichments, Enrichment};
use grokitools_core::request::{resolve_dispatch, Dispatch, QueryRequest};
use serde_json::Value;

use super::{api, create_client, GrokipediaConfig};

/// Run a query and serialize the resulting envelope
pub async fn query_data(request: &QueryRequest, config: &GrokipediaConfig) -> String {
    query_envelope(request, config).await.to_json()
}

/// Run a query against the Grokipedia endpoints
///
/// Remote calls are made one after another on a client owned by this call.
pub async fn query_envelope(request: &QueryRequest, config: &GrokipediaConfig) -> Envelope {
    match dispatch(request, config).await {
        Ok(envelope) => envelope,
        Err(Error::NotFound(slug)) => Envelope::not_found(&slug),
        Err(Error::RateLimited(slug)) => Envelope::rate_limited(&slug),
        Err(e) => {
            log::warn!("Query {:?} ({}) failed: {e}", request.query, request.action);
            Envelope::failure(e.to_string(), &request.query, &request.action)
        }
    }
}

async fn dispatch(request: &QueryRequest, config: &GrokipediaConfig) -> Result<Envelope, Error> {
    if Dispatch::is_slug_fallthrough(&request.action, request.slug.as_deref()) {
        log::warn!(
            "Action {:?} needs a slug; running a smart search instead",
            request.action
        );
    }

    let client = create_client(config)?;

    match resolve_dispatch(&request.action, request.slug.as_deref()) {
        Dispatch::Page { slug } => page(&client, config, &slug).await,
        Dispatch::Content { slug } => content(&client, config, &slug).await,
        Dispatch::Search => {
            let (results, total) = search(&client, config, &request.query).await?;
            Ok(Envelope::search(&request.query, results, total))
        }
        Dispatch::Smart => smart(&client, config, &request.query, request.max_results).await,
    }
}

async fn page(
    client: &reqwest::Client,
    config: &GrokipediaConfig,
    slug: &str,
) -> Result<Envelope, Error> {
    let response = api::fetch_page(client, config, slug).await?;

    match transform_page(slug, response) {
        PageLookup::Found(page) => Ok(Envelope::page(page)),
        PageLookup::NotFound => Err(Error::NotFound(slug.to_string())),
    }
}

async fn content(
    client: &reqwest::Client,
    config: &GrokipediaConfig,
    slug: &str,
) -> Result<Envelope, Error> {
    let response = api::fetch_content(client, config, slug).await?;
    Ok(Envelope::content(transform_content(response)))
}

async fn search(
    client: &reqwest::Client,
    config: &GrokipediaConfig,
    query: &str,
) -> Result<(Vec<SearchResult>, Value), Error> {
    let response = api::fetch_search(client, config, query).await?;
    Ok(transform_search_response(response))
}

async fn smart(
    client: &reqwest::Client,
    config: &GrokipediaConfig,
    query: &str,
    max_results: usize,
) -> Result<Envelope, Error> {
    let (results, total) = search(client, config, query).await?;

    if results.is_empty() {
        return Ok(Envelope::no_results(query));
    }

    let mut slots: Vec<(SearchResult, Enrichment)> =
        Vec::with_capacity(max_results.min(results.len()));
    for result in results.into_iter().take(max_results) {
        let enrichment = api::fetch_enrichment(client, config, &result.slug).await;
        slots.push((result, enrichment));
    }

    Ok(Envelope::smart(query, reduce_enrichments(slots), total))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config_for(server: &MockServer) -> GrokipediaConfig {
        GrokipediaConfig::default().with_overrides(Some(server.uri()), Some(server.uri()))
    }

    fn search_body() -> Value {
        json!({
            "results": [
                {
                    "slug": "Albert_Einstein",
                    "title": "Albert Einstein",
                    "snippet": "<em>Albert</em> <em>Einstein</em> was a theoretical physicist",
                    "relevanceScore": 98.5
                },
                {
                    "slug": "Einstein_family",
                    "title": "Einstein family",
                    "snippet": "The <em>Einstein</em> family",
                    "relevanceScore": 40.0
                },
                {
                    "slug": "Einsteinium",
                    "title": "Einsteinium",
                    "snippet": "A synthetic element named after <em>Einstein</em>",
                    "relevanceScore": 12.25
                }
            ],
            "totalCount": 3
        })
    }

    fn content_body(slug: &str, title: &str, text: &str) -> Value {
        json!({
            "title": title,
            "slug": slug,
            "url": format!("https://grokipedia.com/page/{slug}"),
            "content_text": text,
            "word_count": text.split_whitespace().count(),
            "char_count": text.chars().count()
        })
    }

    async fn mount_search(server: &MockServer, query: &str, body: Value) {
        Mock::given(method("GET"))
            .and(path("/api/full-text-search"))
            .and(query_param("query", query))
            .and(query_param("limit", "11"))
            .and(query_param("offset", "0"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .expect(1)
            .mount(server)
            .await;
    }

    async fn run(request: QueryRequest, server: &MockServer) -> Value {
        let json = query_data(&request, &config_for(server)).await;
        serde_json::from_str(&json).unwrap()
    }

    #[tokio::test]
    async fn test_search_returns_normalized_results() {
        let server = MockServer::start().await;
        mount_search(&server, "Einstein", search_body()).await;

        let value = run(QueryRequest::new("Einstein").with_action("search"), &server).await;

        assert_eq!(value["action"], "search");
        assert_eq!(value["query"], "Einstein");
        assert_eq!(value["totalCount"], 3);
        assert_eq!(value["results"].as_array().unwrap().len(), 3);
        assert_eq!(
            value["results"][0]["snippet"],
            "Albert Einstein was a theoretical physicist"
        );
        assert_eq!(value["results"][2]["relevanceScore"], 12.25);
        assert!(value["results"][0].get("content_preview").is_none());
        assert_eq!(value["x"], "https://x.com/athrix_codes");
        assert_eq!(value["github"], "https://github.com/Atharvsinh-codez");
    }

    #[tokio::test]
    async fn test_smart_with_one_result_fetches_one_page() {
        let server = MockServer::start().await;
        mount_search(&server, "Einstein", search_body()).await;
        Mock::given(method("GET"))
            .and(path("/page/Albert_Einstein"))
            .respond_with(ResponseTemplate::new(200).set_body_json(content_body(
                "Albert_Einstein",
                "Albert Einstein",
                "Albert Einstein was a German-born theoretical physicist.",
            )))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/page/Einstein_family"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let value = run(QueryRequest::new("Einstein").with_max_results(1), &server).await;

        assert_eq!(value["action"], "smart");
        assert_eq!(value["showing"], 1);
        assert_eq!(value["totalFound"], 3);
        let results = value["results"].as_array().unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0]["slug"], "Albert_Einstein");
        assert_eq!(
            results[0]["content_preview"],
            "Albert Einstein was a German-born theoretical physicist...."
        );
        assert_eq!(results[0]["word_count"], 7);
        assert_eq!(
            results[0]["url"],
            "https://grokipedia.com/page/Albert_Einstein"
        );
        assert_eq!(results[0]["relevanceScore"], 98.5);
    }

    #[tokio::test]
    async fn test_smart_defaults_to_two_sequential_fetches() {
        let server = MockServer::start().await;
        mount_search(&server, "Einstein", search_body()).await;
        for (slug, title) in [
            ("Albert_Einstein", "Albert Einstein"),
            ("Einstein_family", "The Einstein family"),
        ] {
            Mock::given(method("GET"))
                .and(path(format!("/page/{slug}")))
                .respond_with(
                    ResponseTemplate::new(200).set_body_json(content_body(slug, title, "text")),
                )
                .expect(1)
                .mount(&server)
                .await;
        }

        let value = run(QueryRequest::new("Einstein"), &server).await;

        assert_eq!(value["showing"], 2);
        assert_eq!(value["results"][0]["title"], "Albert Einstein");
        assert_eq!(value["results"][1]["title"], "The Einstein family");
    }

    #[tokio::test]
    async fn test_smart_falls_back_when_content_fails() {
        let server = MockServer::start().await;
        mount_search(&server, "Einstein", search_body()).await;
        Mock::given(method("GET"))
            .and(path("/page/Albert_Einstein"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;

        let value = run(QueryRequest::new("Einstein").with_max_results(1), &server).await;

        assert_eq!(
            value["results"][0],
            json!({
                "slug": "Albert_Einstein",
                "title": "Albert Einstein",
                "snippet": "Albert Einstein was a theoretical physicist",
                "relevanceScore": 98.5
            })
        );
        assert_eq!(value["showing"], 1);
    }

    #[tokio::test]
    async fn test_smart_falls_back_on_unreadable_body_and_keeps_going() {
        let server = MockServer::start().await;
        mount_search(&server, "Einstein", search_body()).await;
        Mock::given(method("GET"))
            .and(path("/page/Albert_Einstein"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/page/Einstein_family"))
            .respond_with(ResponseTemplate::new(200).set_body_json(content_body(
                "Einstein_family",
                "Einstein family",
                "Family text",
            )))
            .expect(1)
            .mount(&server)
            .await;

        let value = run(QueryRequest::new("Einstein"), &server).await;

        let results = value["results"].as_array().unwrap();
        assert_eq!(results.len(), 2);
        assert!(results[0].get("content_preview").is_none());
        assert_eq!(results[1]["content_preview"], "Family text...");
    }

    #[tokio::test]
    async fn test_smart_falls_back_when_content_host_is_unreachable() {
        let server = MockServer::start().await;
        mount_search(&server, "Einstein", search_body()).await;
        let config = GrokipediaConfig::default()
            .with_overrides(Some(server.uri()), Some("http://127.0.0.1:1".to_string()));

        let json = query_data(&QueryRequest::new("Einstein"), &config).await;
        let value: Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["action"], "smart");
        assert_eq!(value["showing"], 2);
        assert_eq!(
            value["results"][0],
            json!({
                "slug": "Albert_Einstein",
                "title": "Albert Einstein",
                "snippet": "Albert Einstein was a theoretical physicist",
                "relevanceScore": 98.5
            })
        );
        assert!(value["results"][1].get("content_preview").is_none());
        assert!(value.get("error").is_none());
    }

    #[tokio::test]
    async fn test_numbers_are_echoed_as_sent() {
        let server = MockServer::start().await;
        mount_search(
            &server,
            "Einstein",
            json!({
                "results": [{
                    "slug": "Albert_Einstein",
                    "title": "Albert Einstein",
                    "snippet": "physicist",
                    "relevanceScore": 12
                }],
                "totalCount": 57.0
            }),
        )
        .await;

        let json = query_data(
            &QueryRequest::new("Einstein").with_action("search"),
            &config_for(&server),
        )
        .await;
        let value: Value = serde_json::from_str(&json).unwrap();

        assert!(value.get("error").is_none(), "unexpected failure: {value}");
        assert_eq!(value["totalCount"], json!(57.0));
        assert!(value["results"][0]["relevanceScore"].is_u64());
        assert!(json.contains("\"relevanceScore\": 12\n"));
    }

    #[tokio::test]
    async fn test_smart_enriches_with_float_word_count() {
        let server = MockServer::start().await;
        mount_search(&server, "Einstein", search_body()).await;
        Mock::given(method("GET"))
            .and(path("/page/Albert_Einstein"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "title": "Albert Einstein",
                "content_text": "Physicist.",
                "word_count": 1.0,
                "url": "https://grokipedia.com/page/Albert_Einstein"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let value = run(QueryRequest::new("Einstein").with_max_results(1), &server).await;

        assert_eq!(value["results"][0]["content_preview"], "Physicist....");
        assert_eq!(value["results"][0]["word_count"], json!(1.0));
    }

    #[tokio::test]
    async fn test_smart_with_no_hits_returns_message() {
        let server = MockServer::start().await;
        mount_search(&server, "zzzz", json!({"results": [], "totalCount": 0})).await;

        let value = run(QueryRequest::new("zzzz"), &server).await;

        assert_eq!(value["action"], "smart");
        assert_eq!(value["message"], "No results found");
        assert!(value.get("results").is_none());
    }

    #[tokio::test]
    async fn test_page_truncates_citations() {
        let server = MockServer::start().await;
        let citations: Vec<Value> = (1..=15)
            .map(|i| json!({"id": i.to_string(), "title": format!("Ref {i}"), "url": format!("https://example.com/{i}")}))
            .collect();
        Mock::given(method("GET"))
            .and(path("/api/page"))
            .and(query_param("slug", "Albert_Einstein"))
            .and(query_param("includeContent", "false"))
            .and(query_param("validateLinks", "true"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "found": true,
                "page": {
                    "citations": citations,
                    "metadata": {"categories": ["Physicists"]},
                    "stats": {"totalViews": 100}
                }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let value = run(
            QueryRequest::new("")
                .with_action("page")
                .with_slug(Some("Albert_Einstein".to_string())),
            &server,
        )
        .await;

        assert_eq!(value["action"], "page");
        assert_eq!(value["slug"], "Albert_Einstein");
        assert_eq!(value["citations"].as_array().unwrap().len(), 10);
        assert_eq!(value["citations"][9]["title"], "Ref 10");
        assert_eq!(value["categories"], json!(["Physicists"]));
        assert_eq!(value["stats"]["totalViews"], 100);
    }

    #[tokio::test]
    async fn test_page_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/page"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"found": false})))
            .expect(1)
            .mount(&server)
            .await;

        let value = run(
            QueryRequest::new("")
                .with_action("page")
                .with_slug(Some("No_Such_Page".to_string())),
            &server,
        )
        .await;

        assert_eq!(value["error"], "Page not found");
        assert_eq!(value["slug"], "No_Such_Page");
        assert!(value.get("citations").is_none());
    }

    #[tokio::test]
    async fn test_page_http_error_is_generic_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/page"))
            .respond_with(ResponseTemplate::new(502))
            .expect(1)
            .mount(&server)
            .await;

        let value = run(
            QueryRequest::new("physics")
                .with_action("page")
                .with_slug(Some("Albert_Einstein".to_string())),
            &server,
        )
        .await;

        assert!(value["error"].as_str().unwrap().contains("502"));
        assert_eq!(value["query"], "physics");
        assert_eq!(value["action"], "page");
    }

    #[tokio::test]
    async fn test_content_success() {
        let server = MockServer::start().await;
        let text = "x".repeat(800);
        Mock::given(method("GET"))
            .and(path("/page/Albert_Einstein"))
            .respond_with(ResponseTemplate::new(200).set_body_json(content_body(
                "Albert_Einstein",
                "Albert Einstein",
                &text,
            )))
            .expect(1)
            .mount(&server)
            .await;

        let value = run(
            QueryRequest::new("")
                .with_action("content")
                .with_slug(Some("Albert_Einstein".to_string())),
            &server,
        )
        .await;

        assert_eq!(value["action"], "content");
        assert_eq!(value["title"], "Albert Einstein");
        assert_eq!(value["slug"], "Albert_Einstein");
        assert_eq!(value["content_text"], text);
        assert_eq!(value["char_count"], 800);
    }

    #[tokio::test]
    async fn test_content_rate_limited() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/page/Albert_Einstein"))
            .respond_with(ResponseTemplate::new(429))
            .expect(1)
            .mount(&server)
            .await;

        let value = run(
            QueryRequest::new("")
                .with_action("content")
                .with_slug(Some("Albert_Einstein".to_string())),
            &server,
        )
        .await;

        assert_eq!(
            value["error"],
            "Rate limit exceeded - please try again in a moment"
        );
        assert_eq!(value["slug"], "Albert_Einstein");
        assert_eq!(value["action"], "content");
    }

    #[tokio::test]
    async fn test_content_server_error_is_not_rate_limited() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/page/Albert_Einstein"))
            .respond_with(ResponseTemplate::new(503))
            .expect(1)
            .mount(&server)
            .await;

        let value = run(
            QueryRequest::new("")
                .with_action("content")
                .with_slug(Some("Albert_Einstein".to_string())),
            &server,
        )
        .await;

        let error = value["error"].as_str().unwrap();
        assert!(error.contains("503"));
        assert!(!error.contains("Rate limit"));
    }

    #[tokio::test]
    async fn test_content_without_slug_falls_through_to_smart() {
        let server = MockServer::start().await;
        mount_search(&server, "Einstein", json!({"results": [], "totalCount": 0})).await;

        let value = run(QueryRequest::new("Einstein").with_action("content"), &server).await;

        assert_eq!(value["action"], "smart");
        assert_eq!(value["message"], "No results found");
    }

    #[tokio::test]
    async fn test_page_url_is_reduced_to_slug() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/page"))
            .and(query_param("slug", "Alan_Turing"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"found": true})))
            .expect(1)
            .mount(&server)
            .await;

        let value = run(
            QueryRequest::new("")
                .with_action("page")
                .with_slug(Some("https://grokipedia.com/page/Alan_Turing".to_string())),
            &server,
        )
        .await;

        assert_eq!(value["slug"], "Alan_Turing");
    }

    #[tokio::test]
    async fn test_malformed_search_response_is_generic_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/full-text-search"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .expect(1)
            .mount(&server)
            .await;

        let value = run(QueryRequest::new("Einstein").with_action("search"), &server).await;

        assert!(value["error"]
            .as_str()
            .unwrap()
            .starts_with("Failed to parse response"));
        assert_eq!(value["query"], "Einstein");
        assert_eq!(value["action"], "search");
        assert_eq!(value["x"], "https://x.com/athrix_codes");
    }

    #[tokio::test]
    async fn test_unreachable_server_is_generic_failure() {
        let config = GrokipediaConfig::default().with_overrides(
            Some("http://127.0.0.1:1".to_string()),
            Some("http://127.0.0.1:1".to_string()),
        );
        let request = QueryRequest::new("Einstein").with_action("typo");

        let envelope = query_envelope(&request, &config).await;

        let value: Value = serde_json::from_str(&envelope.to_json()).unwrap();
        assert!(envelope.error_message().is_some());
        assert!(value["error"].as_str().unwrap().starts_with("Network error"));
        assert_eq!(value["action"], "typo");
        assert_eq!(value["query"], "Einstein");
    }
}
