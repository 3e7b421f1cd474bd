use anyhow::Result;
use std::path::PathBuf;

use crate::cli_utils::load_dataset;

pub fn cmd_inspect(dataset: PathBuf, json_output: bool) -> Result<()> {
    let index = load_dataset(&dataset)?;
    let stats = index.stats();

    if json_output {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!("Dataset:      {}", dataset.display());
    println!("IPv4 ranges:  {}", stats.v4_ranges);
    println!("IPv6 ranges:  {}", stats.v6_ranges);
    println!("Countries:    {}", stats.countries);

    Ok(())
}
