//! Pure transformation functions for the page-metadata endpoint

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Citations kept from a page lookup.
pub const MAX_CITATIONS: usize = 10;

// ============================================================================
// Domain Models (Input from API)
// ============================================================================

/// Page lookup response from the API
#[derive(Debug, Deserialize, Clone, Default)]
pub struct PageResponse {
    #[serde(default)]
    pub found: Option<bool>,
    #[serde(default)]
    pub page: Option<PageData>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct PageData {
    #[serde(default)]
    pub citations: Option<Vec<Citation>>,
    #[serde(default)]
    pub metadata: Option<PageMetadata>,
    #[serde(default)]
    pub stats: Option<Value>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct PageMetadata {
    #[serde(default)]
    pub categories: Option<Vec<String>>,
}

/// Citation as returned by the API; `id` may be a string or a number
#[derive(Debug, Deserialize, Clone, Default)]
pub struct Citation {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

// ============================================================================
// Output Models (Domain Model)
// ============================================================================

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct CitationOutput {
    pub id: Value,
    pub title: String,
    pub url: String,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct PageOutput {
    pub slug: String,
    pub citations: Vec<CitationOutput>,
    pub categories: Vec<String>,
    pub stats: Value,
}

/// Outcome of a page lookup
#[derive(Debug, Clone, PartialEq)]
pub enum PageLookup {
    Found(PageOutput),
    NotFound,
}

// ============================================================================
// Pure Transformation Functions
// ============================================================================

/// Pure transformation: Convert a page lookup response into a [`PageLookup`]
///
/// A response without `found: true` is a miss. Citations are cut to the
/// first [`MAX_CITATIONS`]; missing categories and stats become empty values.
pub fn transform_page(slug: &str, response: PageResponse) -> PageLookup {
    if !response.found.unwrap_or(false) {
        return PageLookup::NotFound;
    }

    let page = response.page.unwrap_or_default();

    let citations = page
        .citations
        .unwrap_or_default()
        .into_iter()
        .take(MAX_CITATIONS)
        .map(|c| CitationOutput {
            id: c.id.unwrap_or_else(|| Value::String(String::new())),
            title: c.title.unwrap_or_default(),
            url: c.url.unwrap_or_default(),
        })
        .collect();

    let categories = page
        .metadata
        .and_then(|m| m.categories)
        .unwrap_or_default();

    PageLookup::Found(PageOutput {
        slug: slug.to_string(),
        citations,
        categories,
        stats: page
            .stats
            .unwrap_or_else(|| Value::Object(Default::default())),
    })
}
