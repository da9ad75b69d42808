use colored::Colorize;
use grokitools_core::envelope::{
    ContentEnvelope, Envelope, PageEnvelope, SearchEnvelope, SmartEnvelope,
};
use grokitools_core::grokipedia::smart::SmartResult;
use serde_json::Value;

const SNIPPET_WIDTH: usize = 80;

/// Render an envelope for the terminal
pub fn format_envelope_text(envelope: &Envelope) -> String {
    match envelope {
        Envelope::Search(search) => format_search_text(search),
        Envelope::Smart(smart) => format_smart_text(smart),
        Envelope::NoResults(message) => format!("{}\n", message.message.yellow()),
        Envelope::Page(page) => format_page_text(page),
        Envelope::Content(content) => format_content_text(content),
        Envelope::Error(error) => format!("{} {}\n", "Error:".red().bold(), error.error),
    }
}

/// Render a pass-through JSON value without quoting strings
fn plain(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn format_score(score: &Value) -> String {
    match score.as_f64() {
        Some(n) => format!("{n:.2}"),
        None => plain(score),
    }
}

/// Cut `text` to `max_chars` characters, marking the cut with "..."
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max_chars).collect();
        format!("{cut}...")
    }
}

fn format_search_text(search: &SearchEnvelope) -> String {
    let mut result = format!(
        "Found {} result(s) for \"{}\":\n\n",
        plain(&search.total_count),
        search.query
    );

    if search.results.is_empty() {
        result.push_str("No results found.\n");
        return result;
    }

    let mut table = crate::prelude::new_table();
    table.add_row(prettytable::row!["Slug", "Title", "Score", "Snippet"]);
    for item in &search.results {
        table.add_row(prettytable::row![
            item.slug,
            item.title,
            format_score(&item.relevance_score),
            truncate_text(&item.snippet, SNIPPET_WIDTH)
        ]);
    }
    result.push_str(&table.to_string());

    result.push('\n');
    result.push_str(&format!("{}\n", "Read a page:".green()));
    result.push_str(&format!(
        "  {}\n",
        format!("grokitools wiki content {}", search.results[0].slug).cyan()
    ));
    result
}

fn format_smart_text(smart: &SmartEnvelope) -> String {
    let mut result = format!(
        "Showing {} of {} result(s) for \"{}\"\n",
        smart.showing,
        plain(&smart.total_found),
        smart.query
    );

    for item in &smart.results {
        result.push('\n');
        result.push_str(&format!("{}\n", item.title().bold()));
        match item {
            SmartResult::Enriched(enriched) => {
                result.push_str(&format!("  {} {}\n", "slug:".dimmed(), enriched.slug));
                result.push_str(&format!("  {} {}\n", "url:".dimmed(), enriched.url));
                result.push_str(&format!(
                    "  {} {}\n",
                    "words:".dimmed(),
                    plain(&enriched.word_count)
                ));
                result.push('\n');
                result.push_str(&format!("  {}\n", enriched.content_preview));
            }
            SmartResult::Plain(plain) => {
                result.push_str(&format!("  {} {}\n", "slug:".dimmed(), plain.slug));
                result.push_str(&format!("  {}\n", plain.snippet));
            }
        }
    }

    result
}

fn format_page_text(page: &PageEnvelope) -> String {
    let page = &page.page;
    let mut result = format!("{}\n", page.slug.bold());

    if !page.categories.is_empty() {
        result.push_str(&format!(
            "{} {}\n",
            "Categories:".green(),
            page.categories.join(", ")
        ));
    }

    if let Some(stats) = page.stats.as_object().filter(|s| !s.is_empty()) {
        result.push_str(&format!("{}\n", "Stats:".green()));
        for (key, value) in stats {
            result.push_str(&format!("  {key}: {value}\n"));
        }
    }

    result.push('\n');
    if page.citations.is_empty() {
        result.push_str("No citations.\n");
        return result;
    }

    let mut table = crate::prelude::new_table();
    table.add_row(prettytable::row!["ID", "Title", "URL"]);
    for citation in &page.citations {
        table.add_row(prettytable::row![
            plain(&citation.id),
            citation.title,
            citation.url
        ]);
    }
    result.push_str(&table.to_string());
    result
}

fn format_content_text(content: &ContentEnvelope) -> String {
    let content = &content.content;
    let mut result = format!("{}\n", content.title.bold());
    result.push_str(&format!("{}\n", content.url.cyan()));
    result.push_str(&format!(
        "{} words, {} characters\n\n",
        plain(&content.word_count),
        plain(&content.char_count)
    ));
    result.push_str(&content.content_text);
    result.push('\n');
    result
}
