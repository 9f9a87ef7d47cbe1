use std::path::Path;

use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use tracing_subscriber::EnvFilter;

use whiff_watch::config::{MlbConfig, PipelineConfig, load_env_files, output_top_n};
use whiff_watch::mlb_fetch::MlbStatLookup;
use whiff_watch::pipeline::{PipelineOutput, run_for_date};

fn main() {
    load_env_files(Path::new("."));
    init_tracing();

    if let Err(err) = run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let mut json = false;
    let mut date_arg = None;
    for arg in std::env::args().skip(1) {
        if arg == "--json" {
            json = true;
        } else {
            date_arg = Some(arg);
        }
    }
    let date = match date_arg.or_else(|| std::env::var("WHIFF_DATE").ok()) {
        Some(raw) => NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
            .with_context(|| format!("invalid date {raw:?}, expected YYYY-MM-DD"))?,
        None => Utc::now().date_naive(),
    };

    let cfg = PipelineConfig::from_env();
    let lookup = MlbStatLookup::new(MlbConfig::from_env())?;
    let output = run_for_date(&lookup, date, &cfg)?;

    let top_n = output_top_n();
    if json {
        println!("{}", serde_json::to_string_pretty(output.top(top_n))?);
    } else {
        print_table(date, &output, top_n);
    }
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_table(date: NaiveDate, output: &PipelineOutput, top_n: usize) {
    println!("Whiff watch for {date}");
    if output.predictions.is_empty() {
        println!("No qualifying matchups ({} games, {} matchups).", output.games, output.matchups);
        return;
    }
    println!(
        "{:>4}  {:<24} {:>6}  {:<24} {:>6}  {:>5}  {:>5}",
        "rank", "pitcher", "K%", "batter", "K%", "conf", "P(K)"
    );
    for row in output.top(top_n) {
        println!(
            "{:>4}  {:<24} {:>5.1}%  {:<24} {:>5.1}%  {:>5.2}  {:>4.0}%",
            row.prediction_rank,
            row.pitcher_name,
            row.pitcher_so_rate,
            row.batter_name,
            row.batter_so_rate,
            row.confidence_score,
            row.strikeout_probability * 100.0
        );
    }
    let s = &output.summary;
    println!(
        "{} predictions: {} high / {} medium / {} low confidence, avg confidence {:.2}, avg P(K) {:.0}%",
        s.total_predictions,
        s.high_confidence,
        s.medium_confidence,
        s.low_confidence,
        s.avg_confidence,
        s.avg_strikeout_prob * 100.0
    );
}
