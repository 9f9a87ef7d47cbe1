use std::cmp::Ordering;

use crate::types::{RankedMatchup, ScoredMatchup};

const CONFIDENCE_WEIGHT: f64 = 0.4;
const PITCHER_RATE_WEIGHT: f64 = 0.3;
const BATTER_RATE_WEIGHT: f64 = 0.3;

pub fn ranking_score(row: &ScoredMatchup) -> f64 {
    row.confidence_score * CONFIDENCE_WEIGHT
        + (row.matchup.pitcher_rate_percent() / 100.0) * PITCHER_RATE_WEIGHT
        + (row.matchup.batter_rate_percent() / 100.0) * BATTER_RATE_WEIGHT
}

/// Sort by ranking score (descending) and assign dense ranks.
///
/// Exactly equal scores are ordered by pitcher name, batter name, game id,
/// then input position, and share a rank.
pub fn rank(scored: Vec<ScoredMatchup>) -> Vec<RankedMatchup> {
    let mut rows: Vec<(usize, f64, ScoredMatchup)> = scored
        .into_iter()
        .enumerate()
        .map(|(idx, row)| (idx, ranking_score(&row), row))
        .collect();

    rows.sort_by(|a, b| {
        b.1.total_cmp(&a.1)
            .then_with(|| tie_break(&a.2, &b.2))
            .then(a.0.cmp(&b.0))
    });

    let mut out = Vec::with_capacity(rows.len());
    let mut current_rank = 0u32;
    let mut previous: Option<f64> = None;
    for (_, score, scored) in rows {
        if previous != Some(score) {
            current_rank += 1;
            previous = Some(score);
        }
        out.push(RankedMatchup {
            scored,
            ranking_score: score,
            rank: current_rank,
        });
    }
    out
}

fn tie_break(a: &ScoredMatchup, b: &ScoredMatchup) -> Ordering {
    let (a, b) = (&a.matchup, &b.matchup);
    a.pitcher
        .display_name
        .cmp(&b.pitcher.display_name)
        .then_with(|| a.batter.display_name.cmp(&b.batter.display_name))
        .then(a.game_id.cmp(&b.game_id))
}
