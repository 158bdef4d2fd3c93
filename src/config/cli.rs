use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "travely")]
#[command(about = "Plan multi-stop routes, browse destinations and check price breakdowns")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Filter the destination catalog by region and search text
    Destinations {
        /// All, Europe, Asia, Americas, Africa, Oceania or Unclassified
        #[arg(short, long)]
        region: Option<String>,

        #[arg(short, long, default_value = "")]
        query: String,

        /// Print the matches as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the featured route's price breakdown
    Breakdown {
        /// Print CSV instead of a table
        #[arg(long)]
        csv: bool,
    },
    /// Compare the stated total with the itemized sum
    Reconcile,
    /// List stops with their dates, nights and booked stays
    Schedule {
        /// Re-lay the stop dates from this day (YYYY-MM-DD)
        #[arg(long)]
        start: Option<chrono::NaiveDate>,
    },
    /// List the countries of one region
    Regions {
        region: String,
    },
}
