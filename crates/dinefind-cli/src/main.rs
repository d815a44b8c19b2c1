mod search;

use clap::{Parser, Subcommand};
use dinefind_finder::RestaurantFinder;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "dinefind-cli")]
#[command(about = "Find and rank restaurants from the command line")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Search for restaurants matching a free-text query
    Search {
        /// Query words, e.g. `sushi Palermo`
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
        /// Send the query as typed, skipping normalization
        #[arg(long)]
        raw: bool,
        /// Search radius in metres (defaults to the configured radius)
        #[arg(long)]
        radius: Option<u32>,
        /// Place type filter (defaults to the configured type)
        #[arg(long = "type", value_name = "TYPE")]
        place_type: Option<String>,
        /// Extra term appended to the search text
        #[arg(long)]
        keyword: Option<String>,
    },
    /// Show validated details for one place
    Details {
        /// Provider place identifier
        place_id: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = dinefind_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    // stdout carries the JSON result; logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let finder = RestaurantFinder::from_config(&config)?;

    match cli.command {
        Commands::Search {
            query,
            raw,
            radius,
            place_type,
            keyword,
        } => {
            let query = search::build_query(&query.join(" "), radius, place_type, keyword)?;
            search::run_search(&finder, &config, &query, raw).await
        }
        Commands::Details { place_id } => search::run_details(&finder, &place_id).await,
    }
}
