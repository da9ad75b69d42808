//! Outbound calls to the three Grokipedia endpoints.

use crate::prelude::Error;
use grokitools_core::grokipedia::content::ContentResponse;
use grokitools_core::grokipedia::page::PageResponse;
use grokitools_core::grokipedia::search::{SearchResponse, SEARCH_PAGE_SIZE};
use grokitools_core::grokipedia::smart::Enrichment;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use super::GrokipediaConfig;

type Result<T> = std::result::Result<T, Error>;

/// Full-text search, first page of [`SEARCH_PAGE_SIZE`] results
pub async fn fetch_search(
    client: &reqwest::Client,
    config: &GrokipediaConfig,
    query: &str,
) -> Result<SearchResponse> {
    let url = config.search_url();
    let limit = SEARCH_PAGE_SIZE.to_string();

    let response = client
        .get(&url)
        .query(&[("query", query), ("limit", limit.as_str()), ("offset", "0")])
        .send()
        .await
        .map_err(|e| Error::Network(e.to_string()))?;

    parse_success(response, &url).await
}

/// Page metadata without inline content
pub async fn fetch_page(
    client: &reqwest::Client,
    config: &GrokipediaConfig,
    slug: &str,
) -> Result<PageResponse> {
    let url = config.page_url();

    let response = client
        .get(&url)
        .query(&[
            ("slug", slug),
            ("includeContent", "false"),
            ("validateLinks", "true"),
        ])
        .send()
        .await
        .map_err(|e| Error::Network(e.to_string()))?;

    parse_success(response, &url).await
}

/// Full page content; a 429 becomes [`Error::RateLimited`]
pub async fn fetch_content(
    client: &reqwest::Client,
    config: &GrokipediaConfig,
    slug: &str,
) -> Result<ContentResponse> {
    let url = config.content_url_for(slug);

    let response = client
        .get(&url)
        .send()
        .await
        .map_err(|e| Error::Network(e.to_string()))?;

    if response.status() == StatusCode::TOO_MANY_REQUESTS {
        log::warn!("Rate limited fetching content for {slug}");
        return Err(Error::RateLimited(slug.to_string()));
    }

    parse_success(response, &url).await
}

/// Content fetch for smart-mode enrichment
///
/// Only a 200 with a parseable body counts; anything else is a fallback.
pub async fn fetch_enrichment(
    client: &reqwest::Client,
    config: &GrokipediaConfig,
    slug: &str,
) -> Enrichment {
    let url = config.content_url_for(slug);

    let response = match client.get(&url).send().await {
        Ok(response) => response,
        Err(e) => {
            log::debug!("Enrichment for {slug} failed: {e}");
            return Enrichment::Fallback;
        }
    };

    log::debug!("GET {url} -> {}", response.status());

    if response.status() != StatusCode::OK {
        return Enrichment::Fallback;
    }

    match response.json::<ContentResponse>().await {
        Ok(content) => Enrichment::Detailed(content),
        Err(e) => {
            log::debug!("Enrichment for {slug} returned an unreadable body: {e}");
            Enrichment::Fallback
        }
    }
}

async fn parse_success<T: DeserializeOwned>(response: reqwest::Response, url: &str) -> Result<T> {
    let status = response.status();
    log::debug!("GET {url} -> {status}");

    if !status.is_success() {
        return Err(Error::Http {
            status,
            url: url.to_string(),
        });
    }

    response
        .json::<T>()
        .await
        .map_err(|e| Error::Parse(e.to_string()))
}
