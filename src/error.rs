use thiserror::Error;

use crate::types::{PlayerId, Side};

/// A unit of work the matchup builder skipped. None of these abort the batch.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DataGap {
    #[error("game {game_id}: no probable {} pitcher", .side.label())]
    NoProbablePitcher { game_id: u64, side: Side },
    #[error("game {game_id}: unknown team {team_name:?}")]
    UnknownTeam { game_id: u64, team_name: String },
    #[error("game {game_id}: pitcher {pitcher_id} has {sample} batters faced")]
    ThinPitcherSample {
        game_id: u64,
        pitcher_id: PlayerId,
        sample: f64,
    },
    #[error("game {game_id}: batter {batter_id} has {sample} at-bats")]
    ThinBatterSample {
        game_id: u64,
        batter_id: PlayerId,
        sample: f64,
    },
    #[error("game {game_id}: {what} lookup failed: {message}")]
    Upstream {
        game_id: u64,
        what: String,
        message: String,
    },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScoringError {
    #[error("non-finite {field} for {pitcher} vs {batter}")]
    NonFinite {
        field: &'static str,
        pitcher: String,
        batter: String,
    },
    #[error("negative sample size for {player}")]
    NegativeSample { player: String },
}

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("schedule lookup failed")]
    Schedule(#[source] anyhow::Error),
}
