//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod analyze;
mod search;
mod tryon;

use anyhow::Result;
use clap::Subcommand;

use crate::config::Config;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Submit a try-on job and wait for the result
    TryOn(tryon::TryOnArgs),
    /// Query the status of a try-on job once
    Status {
        /// Job ID returned on submission
        job_id: String,

        /// Print the raw status report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Get styling feedback for an outfit photo
    Analyze {
        /// Image URL or local file
        image: String,
    },
    /// Search for shopping items
    Search {
        /// Search query
        query: String,

        /// Number of results
        #[arg(short, long, default_value_t = 5)]
        num: usize,

        /// Send the query as typed, without the menswear prefix
        #[arg(long)]
        no_menswear: bool,
    },
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::TryOn(args) => tryon::run_try_on(args, config).await,
        Commands::Status { job_id, json } => tryon::show_status(&job_id, json, config).await,
        Commands::Analyze { image } => analyze::analyze_outfit(&image, config).await,
        Commands::Search {
            query,
            num,
            no_menswear,
        } => search::search(&query, num, !no_menswear, config).await,
    }
}
