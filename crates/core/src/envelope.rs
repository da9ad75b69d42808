//! Response envelopes returned by `grokipedia_query`
//!
//! Every action, and every error, is answered with one JSON object. Each
//! variant carries `action` and the two attribution fields.

use serde::Serialize;
use serde_json::Value;

use crate::grokipedia::content::ContentOutput;
use crate::grokipedia::page::PageOutput;
use crate::grokipedia::search::SearchResult;
use crate::grokipedia::smart::SmartResult;
use crate::request::Action;

pub const ATTRIBUTION_X: &str = "https://x.com/athrix_codes";
pub const ATTRIBUTION_GITHUB: &str = "https://github.com/Atharvsinh-codez";

pub const PAGE_NOT_FOUND: &str = "Page not found";
pub const RATE_LIMITED: &str = "Rate limit exceeded - please try again in a moment";
pub const NO_RESULTS: &str = "No results found";

/// Constant attribution fields present on every envelope
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
pub struct Attribution {
    pub x: &'static str,
    pub github: &'static str,
}

impl Default for Attribution {
    fn default() -> Self {
        Self {
            x: ATTRIBUTION_X,
            github: ATTRIBUTION_GITHUB,
        }
    }
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct SearchEnvelope {
    pub action: Action,
    pub query: String,
    pub results: Vec<SearchResult>,
    #[serde(rename = "totalCount")]
    pub total_count: Value,
    #[serde(flatten)]
    pub attribution: Attribution,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct SmartEnvelope {
    pub action: Action,
    pub query: String,
    pub results: Vec<SmartResult>,
    #[serde(rename = "totalFound")]
    pub total_found: Value,
    pub showing: usize,
    #[serde(flatten)]
    pub attribution: Attribution,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct MessageEnvelope {
    pub action: Action,
    pub query: String,
    pub message: String,
    #[serde(flatten)]
    pub attribution: Attribution,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct PageEnvelope {
    pub action: Action,
    #[serde(flatten)]
    pub page: PageOutput,
    #[serde(flatten)]
    pub attribution: Attribution,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct ContentEnvelope {
    pub action: Action,
    #[serde(flatten)]
    pub content: ContentOutput,
    #[serde(flatten)]
    pub attribution: Attribution,
}

/// Error envelope
///
/// `action` is the action the caller requested, which for generic failures may
/// be a string no [`Action`] matches.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct ErrorEnvelope {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    pub action: String,
    #[serde(flatten)]
    pub attribution: Attribution,
}

/// The response to a single `grokipedia_query` call
#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum Envelope {
    Search(SearchEnvelope),
    Smart(SmartEnvelope),
    NoResults(MessageEnvelope),
    Page(PageEnvelope),
    Content(ContentEnvelope),
    Error(ErrorEnvelope),
}

impl Envelope {
    pub fn search(query: &str, results: Vec<SearchResult>, total_count: Value) -> Self {
        Envelope::Search(SearchEnvelope {
            action: Action::Search,
            query: query.to_string(),
            results,
            total_count,
            attribution: Attribution::default(),
        })
    }

    pub fn smart(query: &str, results: Vec<SmartResult>, total_found: Value) -> Self {
        Envelope::Smart(SmartEnvelope {
            action: Action::Smart,
            query: query.to_string(),
            showing: results.len(),
            results,
            total_found,
            attribution: Attribution::default(),
        })
    }

    pub fn no_results(query: &str) -> Self {
        Envelope::NoResults(MessageEnvelope {
            action: Action::Smart,
            query: query.to_string(),
            message: NO_RESULTS.to_string(),
            attribution: Attribution::default(),
        })
    }

    pub fn page(page: PageOutput) -> Self {
        Envelope::Page(PageEnvelope {
            action: Action::Page,
            page,
            attribution: Attribution::default(),
        })
    }

    pub fn content(content: ContentOutput) -> Self {
        Envelope::Content(ContentEnvelope {
            action: Action::Content,
            content,
            attribution: Attribution::default(),
        })
    }

    pub fn not_found(slug: &str) -> Self {
        Envelope::Error(ErrorEnvelope {
            error: PAGE_NOT_FOUND.to_string(),
            slug: Some(slug.to_string()),
            query: None,
            action: Action::Page.as_str().to_string(),
            attribution: Attribution::default(),
        })
    }

    pub fn rate_limited(slug: &str) -> Self {
        Envelope::Error(ErrorEnvelope {
            error: RATE_LIMITED.to_string(),
            slug: Some(slug.to_string()),
            query: None,
            action: Action::Content.as_str().to_string(),
            attribution: Attribution::default(),
        })
    }

    /// Generic failure carrying the error text, the query and the requested action
    pub fn failure(error: impl Into<String>, query: &str, action: &str) -> Self {
        Envelope::Error(ErrorEnvelope {
            error: error.into(),
            slug: None,
            query: Some(query.to_string()),
            action: action.to_string(),
            attribution: Attribution::default(),
        })
    }

    /// The `error` text, if this is an error envelope
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Envelope::Error(e) => Some(&e.error),
            _ => None,
        }
    }

    /// Serialize with 2-space indentation
    ///
    /// Serialization of these types cannot fail in practice; if it ever does, a
    /// minimal error envelope is returned instead so callers always get JSON.
    pub fn to_json(&self) -> String {
        match serde_json::to_string_pretty(self) {
            Ok(json) => json,
            Err(e) => {
                let fallback = serde_json::json!({
                    "error": format!("Serialization error: {e}"),
                    "action": self.action_str(),
                    "x": ATTRIBUTION_X,
                    "github": ATTRIBUTION_GITHUB,
                });
                format!("{fallback:#}")
            }
        }
    }

    fn action_str(&self) -> &str {
        match self {
            Envelope::Search(e) => e.action.as_str(),
            Envelope::Smart(e) => e.action.as_str(),
            Envelope::NoResults(e) => e.action.as_str(),
            Envelope::Page(e) => e.action.as_str(),
            Envelope::Content(e) => e.action.as_str(),
            Envelope::Error(e) => &e.action,
        }
    }
}
