/// Grokipedia API transformations (search, page metadata, content)
///
/// This module contains pure transformation functions for Grokipedia responses.
/// All functions are free of I/O operations and testable with fixture data.
pub mod content;
pub mod page;
pub mod search;
pub mod smart;

use regex::Regex;

/// Extract a page slug from user input
///
/// Accepts a bare slug (e.g., "Albert_Einstein") or a Grokipedia page URL
/// (e.g., "https://grokipedia.com/page/Albert_Einstein"). Percent-encoded URL
/// slugs are decoded. Input that is not a page URL is returned unchanged.
pub fn extract_slug(input: &str) -> String {
    if !(input.starts_with("https://") || input.starts_with("http://")) {
        return input.to_string();
    }

    let re = Regex::new(r"/page/([^/?#]+)").expect("slug pattern is valid");
    match re.captures(input).and_then(|caps| caps.get(1)) {
        Some(m) => urlencoding::decode(m.as_str())
            .map(|decoded| decoded.into_owned())
            .unwrap_or_else(|_| m.as_str().to_string()),
        None => input.to_string(),
    }
}
