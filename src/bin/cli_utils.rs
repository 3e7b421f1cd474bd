use anyhow::{Context, Result};
use ip2country::AddressRangeIndex;
use std::path::Path;
use std::time::Instant;

/// Output formats accepted by the `--format` flags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
    Csv,
}

impl OutputFormat {
    /// Parse a `--format` value, restricted to the formats a command supports
    pub fn parse(value: &str, allowed: &[OutputFormat]) -> Result<Self> {
        let format = match value.to_lowercase().as_str() {
            "text" => OutputFormat::Text,
            "json" => OutputFormat::Json,
            "csv" => OutputFormat::Csv,
            _ => anyhow::bail!("Invalid format: '{}'", value),
        };
        if !allowed.contains(&format) {
            anyhow::bail!(
                "Format '{}' is not supported here (expected one of: {})",
                value,
                allowed
                    .iter()
                    .map(|f| f.name())
                    .collect::<Vec<_>>()
                    .join(", ")
            );
        }
        Ok(format)
    }

    fn name(self) -> &'static str {
        match self {
            OutputFormat::Text => "text",
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
        }
    }
}

/// Install the env_logger backend; `--verbose` raises the default to debug
pub fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default))
        .format_timestamp(None)
        .init();
}

/// Load a range dataset, logging how long it took
pub fn load_dataset(dataset: &Path) -> Result<AddressRangeIndex> {
    let start = Instant::now();
    let index = AddressRangeIndex::load(dataset)
        .with_context(|| format!("Failed to load dataset: {}", dataset.display()))?;
    log::info!(
        "Loaded {} ranges from {} in {:?}",
        index.len(),
        dataset.display(),
        start.elapsed()
    );
    Ok(index)
}

/// Parse a `--threads` value: a positive count, or "auto"/"0" for all cores
pub fn parse_threads(value: Option<&str>) -> Result<Option<usize>> {
    match value {
        None => Ok(None),
        Some(v) if v.eq_ignore_ascii_case("auto") || v == "0" => Ok(None),
        Some(v) => {
            let n: usize = v
                .parse()
                .with_context(|| format!("Invalid thread count: '{}'", v))?;
            Ok(Some(n))
        }
    }
}
