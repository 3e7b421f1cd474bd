use anyhow::Result;
use ip2country::{AddressFamily, AddressRangeIndex, Overlap};
use serde_json::json;
use std::net::{Ipv4Addr, Ipv6Addr};
use std::path::PathBuf;

use crate::cli_utils::load_dataset;

pub fn cmd_validate(dataset: PathBuf, json_output: bool) -> Result<()> {
    // A dataset that fails to load is reported through the error path
    let index = load_dataset(&dataset)?;
    let overlaps = index.overlaps();
    let is_valid = overlaps.is_empty();

    if json_output {
        let output = json!({
            "dataset": dataset.display().to_string(),
            "is_valid": is_valid,
            "stats": index.stats(),
            "overlaps": overlaps,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("Validating: {}", dataset.display());
        println!("Ranges:     {}", index.len());
        println!();
        for overlap in &overlaps {
            println!("  ✗ {}", describe(&index, overlap));
        }
        if is_valid {
            println!("✓ No overlapping ranges");
        } else {
            println!("✗ {} overlapping range pair(s)", overlaps.len());
        }
    }

    std::process::exit(if is_valid { 0 } else { 1 });
}

fn describe(index: &AddressRangeIndex, overlap: &Overlap) -> String {
    match overlap.family {
        AddressFamily::V4 => {
            let (a, b) = (
                &index.ranges_v4()[overlap.first],
                &index.ranges_v4()[overlap.second],
            );
            format!(
                "{}-{} ({}) overlaps {}-{} ({})",
                Ipv4Addr::from(a.start),
                Ipv4Addr::from(a.end),
                a.country,
                Ipv4Addr::from(b.start),
                Ipv4Addr::from(b.end),
                b.country
            )
        }
        AddressFamily::V6 => {
            let (a, b) = (
                &index.ranges_v6()[overlap.first],
                &index.ranges_v6()[overlap.second],
            );
            format!(
                "{}-{} ({}) overlaps {}-{} ({})",
                Ipv6Addr::from(a.start),
                Ipv6Addr::from(a.end),
                a.country,
                Ipv6Addr::from(b.start),
                Ipv6Addr::from(b.end),
                b.country
            )
        }
    }
}
