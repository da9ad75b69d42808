//! Pure transformation functions for the full-text search endpoint
//!
//! This module contains zero I/O operations and is fully testable with fixture data.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Page size requested from the search endpoint.
pub const SEARCH_PAGE_SIZE: usize = 11;

// ============================================================================
// Domain Models (Input from API)
// ============================================================================

/// Full-text search response from the API
#[derive(Debug, Deserialize, Clone, Default)]
pub struct SearchResponse {
    #[serde(default)]
    pub results: Option<Vec<SearchItem>>,
    #[serde(default, rename = "totalCount")]
    pub total_count: Option<Value>,
}

/// Single search hit from the API
#[derive(Debug, Deserialize, Clone, Default)]
pub struct SearchItem {
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub snippet: Option<String>,
    #[serde(default, rename = "relevanceScore")]
    pub relevance_score: Option<Value>,
}

// ============================================================================
// Output Models (Domain Model)
// ============================================================================

/// Normalized search result
///
/// The score is passed through as the API sent it, integer or float.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct SearchResult {
    pub slug: String,
    pub title: String,
    pub snippet: String,
    #[serde(rename = "relevanceScore")]
    pub relevance_score: Value,
}

// ============================================================================
// Pure Transformation Functions
// ============================================================================

/// Remove the `<em>` / `</em>` highlight markup the search endpoint adds
///
/// Only these two literal tags are removed; every other character is kept.
pub fn strip_emphasis(snippet: &str) -> String {
    snippet.replace("<em>", "").replace("</em>", "")
}

/// Normalize raw search hits into [`SearchResult`]s, keeping their order
pub fn normalize_search_results(items: Vec<SearchItem>) -> Vec<SearchResult> {
    items
        .into_iter()
        .map(|item| SearchResult {
            slug: item.slug.unwrap_or_default(),
            title: item.title.unwrap_or_default(),
            snippet: strip_emphasis(&item.snippet.unwrap_or_default()),
            relevance_score: item.relevance_score.unwrap_or_else(|| Value::from(0)),
        })
        .collect()
}

/// Split a search response into normalized results and the reported total
///
/// `totalCount` is only echoed back, so any JSON value the API sends is kept.
pub fn transform_search_response(response: SearchResponse) -> (Vec<SearchResult>, Value) {
    let total = response.total_count.unwrap_or_else(|| Value::from(0));
    let results = normalize_search_results(response.results.unwrap_or_default());
    (results, total)
}
