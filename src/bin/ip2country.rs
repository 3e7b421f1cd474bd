mod cli_utils;
mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use commands::{cmd_batch, cmd_inspect, cmd_query, cmd_validate};

#[derive(Parser)]
#[command(name = "ip2country")]
#[command(
    about = "Look up the country of IPv4 and IPv6 addresses",
    long_about = "ip2country - IP address to country lookups over address-range datasets\n\n\
    Loads a dataset of \"start\",\"end\",\"country\" lines (DB-IP country CSV layout,\n\
    optionally gzip-compressed) and resolves addresses against it.\n\n\
    Examples:\n\
      ip2country query dbip-country.csv 1.1.1.1 2001:4860::\n\
      ip2country batch dbip-country.csv.gz addresses.txt --format csv\n\
      ip2country inspect dbip-country.csv --json\n\
      ip2country validate dbip-country.csv"
)]
#[command(version)]
struct Cli {
    /// Enable debug logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Look up one or more addresses
    Query {
        /// Range dataset (.csv or .csv.gz), or "-" for stdin
        #[arg(value_name = "DATASET")]
        dataset: PathBuf,

        /// Addresses to look up
        #[arg(value_name = "ADDRESS", required = true)]
        addresses: Vec<String>,

        /// Output format: text (default) or json
        #[arg(long, default_value = "text")]
        format: String,

        /// Quiet mode - no output, only exit code (0 = all found, 1 = otherwise)
        #[arg(short, long)]
        quiet: bool,
    },

    /// Look up every address in a file (one per line) in parallel
    Batch {
        /// Range dataset (.csv or .csv.gz)
        #[arg(value_name = "DATASET")]
        dataset: PathBuf,

        /// Address list, one per line, or "-" for stdin
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output format: csv (default), json, or text
        #[arg(long, default_value = "csv")]
        format: String,

        /// Number of worker threads (default: auto, all cores)
        #[arg(short = 'j', long)]
        threads: Option<String>,
    },

    /// Show range counts for a dataset
    Inspect {
        /// Range dataset (.csv or .csv.gz), or "-" for stdin
        #[arg(value_name = "DATASET")]
        dataset: PathBuf,

        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Check that a dataset loads and its ranges do not overlap
    Validate {
        /// Range dataset (.csv or .csv.gz), or "-" for stdin
        #[arg(value_name = "DATASET")]
        dataset: PathBuf,

        /// Output results as JSON
        #[arg(short, long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli_utils::init_logging(cli.verbose);

    match cli.command {
        Commands::Query {
            dataset,
            addresses,
            format,
            quiet,
        } => cmd_query(dataset, addresses, format, quiet),
        Commands::Batch {
            dataset,
            input,
            format,
            threads,
        } => cmd_batch(dataset, input, format, threads),
        Commands::Inspect { dataset, json } => cmd_inspect(dataset, json),
        Commands::Validate { dataset, json } => cmd_validate(dataset, json),
    }
}
