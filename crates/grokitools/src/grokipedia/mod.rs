use crate::prelude::{eprintln, println, *};
use grokitools_core::request::{Action, QueryRequest, DEFAULT_MAX_RESULTS};
use std::time::Duration;

pub mod api;
pub mod format;
pub mod query;

pub use query::{query_data, query_envelope};

#[derive(Debug, clap::Parser)]
#[command(name = "wiki")]
#[command(about = "Grokipedia (grokipedia.com) operations")]
pub struct App {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// Search and fetch content for the top results
    #[clap(name = "smart")]
    Smart(SmartOptions),

    /// Search pages without fetching their content
    #[clap(name = "search")]
    Search(SearchOptions),

    /// Show page metadata: citations, categories and stats
    #[clap(name = "page")]
    Page(SlugOptions),

    /// Show the full text of a page
    #[clap(name = "content")]
    Content(SlugOptions),
}

#[derive(Debug, clap::Args, Clone)]
pub struct SmartOptions {
    /// What you're looking for (topic, person, concept, ...)
    #[clap(env = "GROKIPEDIA_QUERY")]
    pub query: String,

    /// Number of top results to fetch content for
    #[arg(short, long, default_value_t = DEFAULT_MAX_RESULTS)]
    pub limit: usize,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, clap::Args, Clone)]
pub struct SearchOptions {
    /// What you're looking for (topic, person, concept, ...)
    #[clap(env = "GROKIPEDIA_QUERY")]
    pub query: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, clap::Args, Clone)]
pub struct SlugOptions {
    /// Page slug or URL (e.g., "Albert_Einstein" or "https://grokipedia.com/page/Albert_Einstein")
    #[clap(env = "GROKIPEDIA_SLUG")]
    pub slug: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Grokipedia endpoint configuration
#[derive(Debug, Clone)]
pub struct GrokipediaConfig {
    /// Base URL of the search and page-metadata endpoints
    pub api_url: String,
    /// Base URL of the page-content endpoint
    pub content_url: String,
    /// Timeout applied to every outbound request
    pub timeout: Duration,
}

impl Default for GrokipediaConfig {
    fn default() -> Self {
        Self {
            api_url: Self::DEFAULT_API_URL.to_string(),
            content_url: Self::DEFAULT_CONTENT_URL.to_string(),
            timeout: Duration::from_secs(Self::TIMEOUT_SECS),
        }
    }
}

impl GrokipediaConfig {
    pub const DEFAULT_API_URL: &'static str = "https://grokipedia.com";
    pub const DEFAULT_CONTENT_URL: &'static str = "https://grokipedia-api.com";
    pub const TIMEOUT_SECS: u64 = 30;

    /// Configuration with the global `--api-url` / `--content-url` overrides applied
    pub fn from_global(global: &crate::Global) -> Self {
        Self::default().with_overrides(global.api_url.clone(), global.content_url.clone())
    }

    /// Apply CLI overrides to the configuration
    pub fn with_overrides(mut self, api_url: Option<String>, content_url: Option<String>) -> Self {
        if let Some(url) = api_url {
            self.api_url = url;
        }
        if let Some(url) = content_url {
            self.content_url = url;
        }
        self
    }

    pub fn search_url(&self) -> String {
        format!("{}/api/full-text-search", self.api_url.trim_end_matches('/'))
    }

    pub fn page_url(&self) -> String {
        format!("{}/api/page", self.api_url.trim_end_matches('/'))
    }

    /// Content endpoint for `slug`, encoded as a single path segment
    pub fn content_url_for(&self, slug: &str) -> String {
        format!(
            "{}/page/{}",
            self.content_url.trim_end_matches('/'),
            urlencoding::encode(slug)
        )
    }
}

/// Create the HTTP client used for the calls of a single query
pub fn create_client(config: &GrokipediaConfig) -> std::result::Result<reqwest::Client, Error> {
    reqwest::Client::builder()
        .timeout(config.timeout)
        .user_agent(concat!("grokitools/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| Error::Network(format!("Failed to build HTTP client: {e}")))
}

/// Module entry point
pub async fn run(app: App, global: crate::Global) -> Result<()> {
    let config = GrokipediaConfig::from_global(&global);

    if global.verbose {
        eprintln!("Grokipedia API: {}", config.api_url);
        eprintln!("Grokipedia content API: {}", config.content_url);
        eprintln!();
    }

    let (request, json) = match app.command {
        Commands::Smart(options) => (
            QueryRequest::new(options.query).with_max_results(options.limit),
            options.json,
        ),
        Commands::Search(options) => (
            QueryRequest::new(options.query).with_action(Action::Search.as_str()),
            options.json,
        ),
        Commands::Page(options) => (
            QueryRequest::new("")
                .with_action(Action::Page.as_str())
                .with_slug(Some(options.slug)),
            options.json,
        ),
        Commands::Content(options) => (
            QueryRequest::new("")
                .with_action(Action::Content.as_str())
                .with_slug(Some(options.slug)),
            options.json,
        ),
    };

    let envelope = query_envelope(&request, &config).await;

    if json {
        println!("{}", envelope.to_json());
        return Ok(());
    }

    if let Some(message) = envelope.error_message() {
        return Err(eyre!("{message}"));
    }

    print!("{}", format::format_envelope_text(&envelope));
    Ok(())
}
