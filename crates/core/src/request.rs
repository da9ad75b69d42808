//! The `grokipedia_query` request and its dispatch rules
//!
//! A request names an action as free text. [`resolve_dispatch`] turns that text
//! plus the optional slug into a [`Dispatch`], the sequence of remote calls the
//! shell has to perform.

use serde::Serialize;
use std::str::FromStr;

use crate::grokipedia::extract_slug;

/// Number of search results enriched in smart mode when the caller doesn't say.
pub const DEFAULT_MAX_RESULTS: usize = 2;

/// Action selector of the `grokipedia_query` tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// Search, then fetch content for the top results
    Smart,
    /// Search only
    Search,
    /// Page metadata with citations (needs a slug)
    Page,
    /// Full page text (needs a slug)
    Content,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Smart => "smart",
            Action::Search => "search",
            Action::Page => "page",
            Action::Content => "content",
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "smart" => Ok(Action::Smart),
            "search" => Ok(Action::Search),
            "page" => Ok(Action::Page),
            "content" => Ok(Action::Content),
            other => Err(format!("Unknown action: {other}")),
        }
    }
}

/// A single `grokipedia_query` invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryRequest {
    pub query: String,
    pub action: String,
    pub slug: Option<String>,
    pub max_results: usize,
}

impl QueryRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            action: Action::Smart.as_str().to_string(),
            slug: None,
            max_results: DEFAULT_MAX_RESULTS,
        }
    }

    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.action = action.into();
        self
    }

    pub fn with_slug(mut self, slug: Option<String>) -> Self {
        self.slug = slug;
        self
    }

    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }
}

/// The call sequence a request resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    Page { slug: String },
    Content { slug: String },
    Search,
    Smart,
}

impl Dispatch {
    /// The action that will actually run, echoed back in the envelope.
    pub fn action(&self) -> Action {
        match self {
            Dispatch::Page { .. } => Action::Page,
            Dispatch::Content { .. } => Action::Content,
            Dispatch::Search => Action::Search,
            Dispatch::Smart => Action::Smart,
        }
    }

    /// True when the caller asked for `page` or `content` but gave no slug.
    pub fn is_slug_fallthrough(action: &str, slug: Option<&str>) -> bool {
        matches!(action, "page" | "content") && slug.map_or(true, |s| s.is_empty())
    }
}

/// Resolve the requested action and slug into a [`Dispatch`].
///
/// `page` and `content` only dispatch when a non-empty slug is present; without
/// one, and for any action string that isn't recognized, the request runs as a
/// smart search. Slugs given as page URLs are reduced to the bare slug.
pub fn resolve_dispatch(action: &str, slug: Option<&str>) -> Dispatch {
    let slug = slug.filter(|s| !s.is_empty()).map(extract_slug);

    match (action.parse::<Action>(), slug) {
        (Ok(Action::Page), Some(slug)) => Dispatch::Page { slug },
        (Ok(Action::Content), Some(slug)) => Dispatch::Content { slug },
        (Ok(Action::Search), _) => Dispatch::Search,
        _ => Dispatch::Smart,
    }
}
