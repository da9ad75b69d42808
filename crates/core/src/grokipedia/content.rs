//! Pure transformation functions for the page-content endpoint

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Characters of article text kept in a smart-mode preview.
pub const PREVIEW_CHARS: usize = 500;

/// Marker appended to every preview.
pub const PREVIEW_ELLIPSIS: &str = "...";

/// Page content response from the API
#[derive(Debug, Deserialize, Clone, Default)]
pub struct ContentResponse {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub content_text: Option<String>,
    #[serde(default)]
    pub word_count: Option<Value>,
    #[serde(default)]
    pub char_count: Option<Value>,
}

/// Full page content; the counts are echoed as the API reported them
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct ContentOutput {
    pub title: String,
    pub slug: String,
    pub url: String,
    pub content_text: String,
    pub word_count: Value,
    pub char_count: Value,
}

pub fn transform_content(response: ContentResponse) -> ContentOutput {
    ContentOutput {
        title: response.title.unwrap_or_default(),
        slug: response.slug.unwrap_or_default(),
        url: response.url.unwrap_or_default(),
        content_text: response.content_text.unwrap_or_default(),
        word_count: response.word_count.unwrap_or_else(|| Value::from(0)),
        char_count: response.char_count.unwrap_or_else(|| Value::from(0)),
    }
}

/// First [`PREVIEW_CHARS`] characters of `text` followed by [`PREVIEW_ELLIPSIS`]
///
/// The marker is appended even when nothing was cut. Counting is by `char`, so
/// multi-byte text is never split mid-character.
pub fn content_preview(text: &str) -> String {
    let mut preview: String = text.chars().take(PREVIEW_CHARS).collect();
    preview.push_str(PREVIEW_ELLIPSIS);
    preview
}
