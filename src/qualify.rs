use crate::config::DEFAULT_RATE_THRESHOLD;
use crate::types::Matchup;

/// Keep matchups where both strikeout rates clear their thresholds (inclusive).
/// Order is preserved.
pub fn filter(
    matchups: &[Matchup],
    pitcher_rate_threshold: f64,
    batter_rate_threshold: f64,
) -> Vec<Matchup> {
    matchups
        .iter()
        .filter(|m| {
            m.pitcher_rate_percent() >= pitcher_rate_threshold
                && m.batter_rate_percent() >= batter_rate_threshold
        })
        .cloned()
        .collect()
}

pub fn filter_default(matchups: &[Matchup]) -> Vec<Matchup> {
    filter(matchups, DEFAULT_RATE_THRESHOLD, DEFAULT_RATE_THRESHOLD)
}
