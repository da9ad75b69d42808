use crate::prelude::*;
use clap::Parser;

mod error;
mod grokipedia;
mod mcp;
mod prelude;

#[derive(Debug, clap::Parser)]
#[command(
    author,
    version,
    about,
    long_about = "Query Grokipedia from the command line or as an MCP tool"
)]
pub struct App {
    #[command(subcommand)]
    pub command: SubCommands,

    #[clap(flatten)]
    global: Global,
}

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    /// Base URL of the Grokipedia search and page endpoints
    #[clap(long, env = "GROKIPEDIA_API_URL", global = true)]
    api_url: Option<String>,

    /// Base URL of the Grokipedia content endpoint
    #[clap(long, env = "GROKIPEDIA_CONTENT_URL", global = true)]
    content_url: Option<String>,

    /// Whether to display additional information.
    #[clap(long, env = "GROKITOOLS_VERBOSE", global = true, default_value = "false")]
    verbose: bool,
}

#[derive(Debug, clap::Parser)]
pub enum SubCommands {
    /// Grokipedia (grokipedia.com) operations
    Wiki(crate::grokipedia::App),

    /// Model Context Protocol server
    MCP(crate::mcp::App),
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    color_eyre::install()?;

    let app = App::parse();

    match app.command {
        SubCommands::Wiki(sub_app) => crate::grokipedia::run(sub_app, app.global).await,
        SubCommands::MCP(sub_app) => crate::mcp::run(sub_app, app.global).await,
    }
    .map_err(|err: color_eyre::eyre::Report| eyre!(err))
}
