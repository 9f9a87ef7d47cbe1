use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::NaiveDate;

use whiff_watch::config::{PipelineConfig, load_env_files};
use whiff_watch::fake_lookup::FakeLookup;
use whiff_watch::pipeline::run_for_date;

fn main() -> anyhow::Result<()> {
    load_env_files(Path::new("."));
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("tests/fixtures/pipeline_day.json"));

    let raw = fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))?;
    let lookup = FakeLookup::from_json(&raw)?;

    // Runs one fixture day offline and prints the ranked rows as JSON.
    let date = NaiveDate::from_ymd_opt(lookup.season, 6, 1).context("fixture season out of range")?;
    let output = run_for_date(&lookup, date, &PipelineConfig::from_env())?;

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
