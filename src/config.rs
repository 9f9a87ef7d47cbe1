use std::env;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use crate::stat_lookup::current_season;

pub const MLB_API_BASE: &str = "https://statsapi.mlb.com/api/v1";

pub const DEFAULT_MIN_BATTER_SAMPLE: f64 = 150.0;
pub const DEFAULT_MIN_PITCHER_SAMPLE: f64 = 1.0;
pub const DEFAULT_RATE_THRESHOLD: f64 = 20.0;
// Rows the CLI prints; the pipeline itself always returns every ranked row.
pub const DEFAULT_TOP_N: usize = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    pub min_batter_sample: f64,
    pub min_pitcher_sample: f64,
    pub pitcher_rate_threshold: f64,
    pub batter_rate_threshold: f64,
    pub fetch_parallelism: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            min_batter_sample: DEFAULT_MIN_BATTER_SAMPLE,
            min_pitcher_sample: DEFAULT_MIN_PITCHER_SAMPLE,
            pitcher_rate_threshold: DEFAULT_RATE_THRESHOLD,
            batter_rate_threshold: DEFAULT_RATE_THRESHOLD,
            fetch_parallelism: 1,
        }
    }
}

impl PipelineConfig {
    pub fn from_env() -> Self {
        let d = Self::default();
        Self {
            min_batter_sample: env_parse("WHIFF_MIN_BATTER_AB", d.min_batter_sample).max(0.0),
            min_pitcher_sample: env_parse("WHIFF_MIN_PITCHER_BF", d.min_pitcher_sample).max(0.0),
            pitcher_rate_threshold: env_parse("WHIFF_PITCHER_THRESHOLD", d.pitcher_rate_threshold)
                .clamp(0.0, 100.0),
            batter_rate_threshold: env_parse("WHIFF_BATTER_THRESHOLD", d.batter_rate_threshold)
                .clamp(0.0, 100.0),
            fetch_parallelism: env_parse("FETCH_PARALLELISM", d.fetch_parallelism).clamp(1, 32),
        }
    }
}

/// How many ranked rows the CLI shows; 0 shows all of them.
pub fn output_top_n() -> usize {
    env_parse("WHIFF_TOP_N", DEFAULT_TOP_N)
}

#[derive(Debug, Clone, PartialEq)]
pub struct MlbConfig {
    pub base_url: String,
    pub season: i32,
    pub cache_ttl: Duration,
}

impl MlbConfig {
    pub fn new(season: i32) -> Self {
        Self {
            base_url: MLB_API_BASE.to_string(),
            season,
            cache_ttl: Duration::from_secs(900),
        }
    }

    pub fn from_env() -> Self {
        let base_url = env::var("MLB_API_BASE")
            .ok()
            .map(|v| v.trim().trim_end_matches('/').to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| MLB_API_BASE.to_string());
        Self {
            base_url,
            season: env_parse("WHIFF_SEASON", current_season()),
            cache_ttl: Duration::from_secs(env_parse("WHIFF_CACHE_TTL_SECS", 900u64)),
        }
    }
}

/// Load `.env.local`, then `.env`, from `dir`. Missing files are skipped and
/// variables that are already set are left alone.
pub fn load_env_files(dir: &Path) {
    for name in [".env.local", ".env"] {
        let _ = dotenvy::from_path(dir.join(name));
    }
}

fn env_parse<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|val| val.trim().parse::<T>().ok())
        .unwrap_or(default)
}
