use crate::prelude::*;
use clap::Parser;

mod browse;
mod config;
mod error;
mod facets;
mod prelude;
mod render;
mod search;
mod session;
mod transport;

#[derive(Debug, clap::Parser)]
#[command(
    author,
    version,
    about,
    long_about = "Faceted search over the issues of a GitHub repository"
)]
pub struct App {
    #[command(subcommand)]
    pub command: SubCommands,

    #[clap(flatten)]
    global: Global,
}

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    /// Whether to display additional information.
    #[clap(long, env = "ISSUEFACET_VERBOSE", global = true, default_value = "false")]
    verbose: bool,
}

#[derive(Debug, clap::Parser)]
pub enum SubCommands {
    /// Run one search and print the resulting page
    Search(crate::search::SearchOptions),

    /// Print the search request URL without sending it
    Url(crate::search::UrlOptions),

    /// List the facets the search accepts
    Facets(crate::facets::FacetsOptions),

    /// Browse results interactively, one command per line
    Browse(crate::browse::BrowseOptions),
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    color_eyre::install()?;

    let app = App::parse();

    match app.command {
        SubCommands::Search(options) => crate::search::run(options, app.global).await,
        SubCommands::Url(options) => crate::search::run_url(options),
        SubCommands::Facets(options) => crate::facets::run(options),
        SubCommands::Browse(options) => crate::browse::run(options, app.global).await,
    }
    .map_err(|err: color_eyre::eyre::Report| eyre!(err))
}
