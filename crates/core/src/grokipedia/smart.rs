//! Smart-mode enrichment: merging fetched page content into search results
//!
//! The shell fetches content for each top search result one at a time and
//! records the outcome as an [`Enrichment`]. A failed fetch is not an error
//! here; it is the [`Enrichment::Fallback`] variant, and the slot keeps the
//! original search result.

use serde::Serialize;
use serde_json::Value;

use super::content::{content_preview, ContentResponse};
use super::search::SearchResult;

/// Outcome of fetching content for one search result
#[derive(Debug, Clone)]
pub enum Enrichment {
    /// The content endpoint answered 200 with a parseable body
    Detailed(ContentResponse),
    /// Non-200 status, transport error or unparseable body
    Fallback,
}

/// Search result merged with its page content
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct EnrichedResult {
    pub slug: String,
    pub title: String,
    pub snippet: String,
    #[serde(rename = "relevanceScore")]
    pub relevance_score: Value,
    pub content_preview: String,
    pub word_count: Value,
    pub url: String,
}

/// One slot of the smart-mode result list
#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum SmartResult {
    Enriched(EnrichedResult),
    Plain(SearchResult),
}

impl SmartResult {
    pub fn slug(&self) -> &str {
        match self {
            SmartResult::Enriched(r) => &r.slug,
            SmartResult::Plain(r) => &r.slug,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            SmartResult::Enriched(r) => &r.title,
            SmartResult::Plain(r) => &r.title,
        }
    }
}

/// Merge a search result with the outcome of its content fetch
///
/// The content title wins when the endpoint sent one; the snippet and score
/// always come from the search result.
pub fn merge_enrichment(result: SearchResult, enrichment: Enrichment) -> SmartResult {
    match enrichment {
        Enrichment::Fallback => SmartResult::Plain(result),
        Enrichment::Detailed(content) => SmartResult::Enriched(EnrichedResult {
            title: content.title.unwrap_or(result.title),
            content_preview: content_preview(content.content_text.as_deref().unwrap_or_default()),
            word_count: content.word_count.unwrap_or_else(|| Value::from(0)),
            url: content.url.unwrap_or_default(),
            slug: result.slug,
            snippet: result.snippet,
            relevance_score: result.relevance_score,
        }),
    }
}

/// Reduce per-slot outcomes into the smart-mode result list, keeping order
pub fn reduce_enrichments(slots: Vec<(SearchResult, Enrichment)>) -> Vec<SmartResult> {
    slots
        .into_iter()
        .map(|(result, enrichment)| merge_enrichment(result, enrichment))
        .collect()
}
