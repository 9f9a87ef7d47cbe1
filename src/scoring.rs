use tracing::warn;

use crate::error::ScoringError;
use crate::types::{Matchup, PredictionSummary, ScoredMatchup};

const PITCHER_WEIGHT: f64 = 0.6;
const BATTER_WEIGHT: f64 = 0.4;

// League-average strikeout rates, in percent.
const LEAGUE_AVG_PITCHER_SO: f64 = 15.0;
const LEAGUE_AVG_BATTER_SO: f64 = 22.0;

// Sample sizes treated as a full season.
const FULL_PITCHER_SAMPLE: f64 = 200.0;
const FULL_BATTER_SAMPLE: f64 = 300.0;

const RATE_BLEND: f64 = 0.7;
const SAMPLE_BLEND: f64 = 0.3;
const MIN_CONFIDENCE: f64 = 0.3;
const MAX_CONFIDENCE: f64 = 1.0;

// Continuous stand-in for plate appearances against the starter.
const EXPECTED_AT_BATS: f64 = 3.5;

const HIGH_CONFIDENCE: f64 = 0.7;
const MEDIUM_CONFIDENCE: f64 = 0.5;

/// Score every matchup, or none: a fault anywhere in the batch yields an
/// empty result.
pub fn score(matchups: &[Matchup]) -> Vec<ScoredMatchup> {
    match try_score(matchups) {
        Ok(scored) => scored,
        Err(err) => {
            warn!(error = %err, rows = matchups.len(), "scoring failed; dropping batch");
            Vec::new()
        }
    }
}

pub fn try_score(matchups: &[Matchup]) -> Result<Vec<ScoredMatchup>, ScoringError> {
    matchups.iter().map(score_one).collect()
}

fn score_one(m: &Matchup) -> Result<ScoredMatchup, ScoringError> {
    for (player, rate) in [(&m.pitcher, &m.pitcher_rate), (&m.batter, &m.batter_rate)] {
        if rate.sample_size < 0.0 {
            return Err(ScoringError::NegativeSample {
                player: player.display_name.clone(),
            });
        }
    }

    let pitcher_rate = m.pitcher_rate_percent();
    let batter_rate = m.batter_rate_percent();
    let confidence_score = confidence_score(
        pitcher_rate,
        m.pitcher_rate.sample_size,
        batter_rate,
        m.batter_rate.sample_size,
    );
    let strikeout_probability = strikeout_probability(pitcher_rate, batter_rate);

    for (field, value) in [
        ("pitcher rate", pitcher_rate),
        ("batter rate", batter_rate),
        ("confidence", confidence_score),
        ("strikeout probability", strikeout_probability),
    ] {
        if !value.is_finite() {
            return Err(ScoringError::NonFinite {
                field,
                pitcher: m.pitcher.display_name.clone(),
                batter: m.batter.display_name.clone(),
            });
        }
    }

    Ok(ScoredMatchup {
        matchup: m.clone(),
        confidence_score,
        strikeout_probability,
        prediction_reason: prediction_reason(
            &m.pitcher.display_name,
            pitcher_rate,
            &m.batter.display_name,
            batter_rate,
        ),
    })
}

/// Rate edge over league average blended with sample adequacy, clamped to
/// `[0.3, 1.0]`. NaN input stays NaN so the caller can reject it.
pub fn confidence_score(
    pitcher_rate: f64,
    pitcher_sample: f64,
    batter_rate: f64,
    batter_sample: f64,
) -> f64 {
    let pitcher_norm = (pitcher_rate - LEAGUE_AVG_PITCHER_SO) / LEAGUE_AVG_PITCHER_SO;
    let batter_norm = (batter_rate - LEAGUE_AVG_BATTER_SO) / LEAGUE_AVG_BATTER_SO;
    let rate_confidence = PITCHER_WEIGHT * pitcher_norm + BATTER_WEIGHT * batter_norm;

    let pitcher_sample_factor = (pitcher_sample / FULL_PITCHER_SAMPLE).min(1.0);
    let batter_sample_factor = (batter_sample / FULL_BATTER_SAMPLE).min(1.0);
    let sample_confidence = (pitcher_sample_factor + batter_sample_factor) / 2.0;

    let raw = rate_confidence * RATE_BLEND + sample_confidence * SAMPLE_BLEND;
    raw.clamp(MIN_CONFIDENCE, MAX_CONFIDENCE)
}

/// Chance of at least one strikeout over the expected at-bats.
pub fn strikeout_probability(pitcher_rate: f64, batter_rate: f64) -> f64 {
    let combined = PITCHER_WEIGHT * (pitcher_rate / 100.0) + BATTER_WEIGHT * (batter_rate / 100.0);
    1.0 - (1.0 - combined).powf(EXPECTED_AT_BATS)
}

pub fn prediction_reason(
    pitcher_name: &str,
    pitcher_rate: f64,
    batter_name: &str,
    batter_rate: f64,
) -> String {
    let pitcher_clause = if pitcher_rate >= 30.0 {
        format!("{pitcher_name} is an elite strikeout pitcher ({pitcher_rate:.1}%)")
    } else if pitcher_rate >= 25.0 {
        format!("{pitcher_name} has excellent strikeout rates ({pitcher_rate:.1}%)")
    } else {
        format!("{pitcher_name} has above-average strikeout rates ({pitcher_rate:.1}%)")
    };
    let batter_clause = if batter_rate >= 30.0 {
        format!("{batter_name} strikes out frequently ({batter_rate:.1}%)")
    } else if batter_rate >= 25.0 {
        format!("{batter_name} has high strikeout rates ({batter_rate:.1}%)")
    } else {
        format!("{batter_name} strikes out above average ({batter_rate:.1}%)")
    };
    format!("{pitcher_clause} and {batter_clause}")
}

pub fn summarize(scored: &[ScoredMatchup]) -> PredictionSummary {
    if scored.is_empty() {
        return PredictionSummary::default();
    }
    let mut summary = PredictionSummary {
        total_predictions: scored.len(),
        ..PredictionSummary::default()
    };
    for row in scored {
        if row.confidence_score >= HIGH_CONFIDENCE {
            summary.high_confidence += 1;
        } else if row.confidence_score >= MEDIUM_CONFIDENCE {
            summary.medium_confidence += 1;
        } else {
            summary.low_confidence += 1;
        }
    }
    let n = scored.len() as f64;
    summary.avg_confidence = scored.iter().map(|r| r.confidence_score).sum::<f64>() / n;
    summary.avg_strikeout_prob = scored.iter().map(|r| r.strikeout_probability).sum::<f64>() / n;
    summary
}
