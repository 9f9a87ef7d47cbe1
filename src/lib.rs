pub mod config;
pub mod error;
pub mod fake_lookup;
pub mod http_cache;
pub mod http_client;
pub mod matchup_builder;
pub mod mlb_fetch;
pub mod pipeline;
pub mod qualify;
pub mod ranking;
pub mod scoring;
pub mod stat_lookup;
pub mod types;

pub use pipeline::{PipelineOutput, run_for_date, run_games};
pub use stat_lookup::StatLookup;
