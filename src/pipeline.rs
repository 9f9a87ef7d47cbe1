use chrono::NaiveDate;
use serde::Serialize;
use tracing::info;

use crate::config::PipelineConfig;
use crate::error::PipelineError;
use crate::matchup_builder::MatchupBuilder;
use crate::stat_lookup::StatLookup;
use crate::types::{Game, PredictionRow, PredictionSummary};
use crate::{qualify, ranking, scoring};

#[derive(Debug, Clone, Default, Serialize)]
pub struct PipelineOutput {
    pub games: usize,
    pub matchups: usize,
    pub qualified: usize,
    pub skipped_units: usize,
    pub summary: PredictionSummary,
    pub predictions: Vec<PredictionRow>,
}

impl PipelineOutput {
    /// The first `n` ranked rows, or all of them when `n` is 0.
    pub fn top(&self, n: usize) -> &[PredictionRow] {
        if n == 0 {
            &self.predictions
        } else {
            &self.predictions[..n.min(self.predictions.len())]
        }
    }
}

/// Fetch the schedule for `date` and run it through the pipeline.
///
/// A failed schedule fetch is the only error; no games or no qualifying
/// matchups come back as an empty output.
pub fn run_for_date(
    lookup: &dyn StatLookup,
    date: NaiveDate,
    cfg: &PipelineConfig,
) -> Result<PipelineOutput, PipelineError> {
    let games = lookup
        .get_games_for_date(date)
        .map_err(PipelineError::Schedule)?;
    info!(%date, games = games.len(), "schedule loaded");
    Ok(run_games(&games, lookup, cfg))
}

pub fn run_games(games: &[Game], lookup: &dyn StatLookup, cfg: &PipelineConfig) -> PipelineOutput {
    let built = MatchupBuilder::from_config(cfg).build_with_gaps(games, lookup);
    let qualified = qualify::filter(
        &built.matchups,
        cfg.pitcher_rate_threshold,
        cfg.batter_rate_threshold,
    );
    let scored = scoring::score(&qualified);
    let summary = scoring::summarize(&scored);
    let ranked = ranking::rank(scored);

    info!(
        matchups = built.matchups.len(),
        qualified = qualified.len(),
        skipped = built.gaps.len(),
        predictions = ranked.len(),
        "pipeline finished"
    );

    PipelineOutput {
        games: games.len(),
        matchups: built.matchups.len(),
        qualified: qualified.len(),
        skipped_units: built.gaps.len(),
        summary,
        predictions: ranked.iter().map(PredictionRow::from).collect(),
    }
}
