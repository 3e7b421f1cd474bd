use anyhow::{Context, Result};
use ip2country::file_reader;
use serde_json::json;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Instant;

use crate::cli_utils::{load_dataset, parse_threads, OutputFormat};

pub fn cmd_batch(
    dataset: PathBuf,
    input: PathBuf,
    format: String,
    threads: Option<String>,
) -> Result<()> {
    let format = OutputFormat::parse(
        &format,
        &[OutputFormat::Csv, OutputFormat::Json, OutputFormat::Text],
    )?;
    let threads = parse_threads(threads.as_deref())?;
    let index = load_dataset(&dataset)?;

    let reader = file_reader::open(&input)
        .with_context(|| format!("Failed to open input: {}", input.display()))?;
    let addresses: Vec<String> = reader
        .lines()
        .map(|line| line.map(|l| l.trim().to_string()))
        .filter(|line| !matches!(line, Ok(l) if l.is_empty()))
        .collect::<io::Result<_>>()
        .with_context(|| format!("Failed to read input: {}", input.display()))?;

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    let pool = builder
        .build()
        .context("Failed to start worker threads")?;

    let start = Instant::now();
    let countries = pool.install(|| index.lookup_many(&addresses));
    log::info!(
        "Resolved {} addresses on {} threads in {:?}",
        addresses.len(),
        pool.current_num_threads(),
        start.elapsed()
    );

    let stdout = io::stdout();
    match format {
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(stdout.lock());
            writer.write_record(["address", "country"])?;
            for (address, country) in addresses.iter().zip(&countries) {
                writer.write_record([address, country])?;
            }
            writer.flush()?;
        }
        OutputFormat::Json => {
            let mut out = stdout.lock();
            // NDJSON, one object per address
            for (address, country) in addresses.iter().zip(&countries) {
                writeln!(out, "{}", json!({ "address": address, "country": country }))?;
            }
        }
        OutputFormat::Text => {
            let mut out = stdout.lock();
            for country in &countries {
                writeln!(out, "{}", country)?;
            }
        }
    }

    Ok(())
}
