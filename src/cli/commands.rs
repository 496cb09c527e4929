use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "airdrop-checker")]
#[command(about = "Batch airdrop allocation checker for Ethereum addresses")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check addresses against the eligibility provider
    Check {
        /// Addresses to check
        addresses: Vec<String>,

        /// Read additional addresses from a file, one per line
        #[arg(short, long)]
        file: Option<String>,

        /// Output format (table, json)
        #[arg(long, default_value = "table")]
        format: String,

        /// Write the aggregated report to a CSV file
        #[arg(long, value_name = "PATH")]
        csv: Option<String>,
    },

    /// Run the HTTP checking service
    Serve {
        /// Listen address (overrides configuration)
        #[arg(short, long)]
        listen: Option<String>,
    },
}
