use anyhow::Result;
use serde_json::json;
use std::path::PathBuf;

use crate::cli_utils::{load_dataset, OutputFormat};

pub fn cmd_query(
    dataset: PathBuf,
    addresses: Vec<String>,
    format: String,
    quiet: bool,
) -> Result<()> {
    let format = OutputFormat::parse(&format, &[OutputFormat::Text, OutputFormat::Json])?;
    let index = load_dataset(&dataset)?;

    let countries: Vec<&str> = addresses.iter().map(|a| index.lookup(a)).collect();
    let all_found = countries.iter().all(|c| !c.is_empty());

    if quiet {
        // Quiet mode: no output, just exit code
        std::process::exit(if all_found { 0 } else { 1 });
    }

    match format {
        OutputFormat::Json => {
            let results: Vec<_> = addresses
                .iter()
                .zip(&countries)
                .map(|(address, country)| json!({ "address": address, "country": country }))
                .collect();
            println!("{}", serde_json::to_string_pretty(&results)?);
        }
        _ => {
            for (address, country) in addresses.iter().zip(&countries) {
                if addresses.len() == 1 {
                    println!("{}", country);
                } else {
                    println!("{}\t{}", address, country);
                }
            }
        }
    }

    std::process::exit(if all_found { 0 } else { 1 });
}
