use anyhow::Result;
use chrono::{Datelike, NaiveDate, Utc};
use tracing::debug;

use crate::types::{Game, PlayerId, PlayerRef, SeasonRate, TeamId};

/// Data source the pipeline pulls schedule, roster and season lines from.
///
/// Implementations own their transport and caching; the pipeline only sees
/// these five calls. `Err` means the lookup itself failed, while "nothing
/// there" is an empty vec, `None`, or a zero-sample [`SeasonRate`].
pub trait StatLookup: Send + Sync {
    fn get_games_for_date(&self, date: NaiveDate) -> Result<Vec<Game>>;

    fn resolve_team_id(&self, team_name: &str) -> Result<Option<TeamId>>;

    /// Non-pitchers on the team. May list a player more than once when the
    /// source merges several roster types.
    fn get_roster(&self, team_id: TeamId) -> Result<Vec<PlayerRef>>;

    fn get_pitcher_rate(&self, player_id: PlayerId) -> Result<SeasonRate>;

    fn get_batter_rate(&self, player_id: PlayerId) -> Result<SeasonRate>;
}

pub fn current_season() -> i32 {
    Utc::now().year()
}

/// The season itself, then the one before it.
pub fn candidate_seasons(season: i32) -> [i32; 2] {
    [season, season - 1]
}

/// First season in `seasons` whose line has a nonzero sample.
///
/// A failing fetch counts as "no usable data" for that season only.
pub fn resolve_season_rate<F>(seasons: &[i32], mut fetch: F) -> SeasonRate
where
    F: FnMut(i32) -> Result<Option<SeasonRate>>,
{
    for &season in seasons {
        match fetch(season) {
            Ok(Some(rate)) if rate.has_sample() => {
                return SeasonRate {
                    season: Some(season),
                    ..rate
                };
            }
            Ok(_) => {}
            Err(err) => debug!(season, error = %err, "season stats unavailable"),
        }
    }
    SeasonRate::zero()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn falls_back_to_prior_season() {
        let rate = resolve_season_rate(&candidate_seasons(2025), |season| {
            Ok(match season {
                2025 => Some(SeasonRate::new(0.0, 0.0)),
                2024 => Some(SeasonRate::new(40.0, 160.0)),
                _ => None,
            })
        });
        assert_eq!(rate.season, Some(2024));
        assert_eq!(rate.sample_size, 160.0);
    }

    #[test]
    fn failing_season_is_skipped() {
        let rate = resolve_season_rate(&[2025, 2024], |season| {
            if season == 2025 {
                Err(anyhow::anyhow!("http 500"))
            } else {
                Ok(Some(SeasonRate::new(10.0, 50.0)))
            }
        });
        assert_eq!(rate.season, Some(2024));
    }

    #[test]
    fn no_usable_season_is_zero_sample() {
        let rate = resolve_season_rate(&[2025, 2024], |_| Ok(None));
        assert!(!rate.has_sample());
        assert_eq!(rate.rate_percent(), 0.0);
    }

    #[test]
    fn stops_at_first_usable_season() {
        let mut calls = Vec::new();
        let _ = resolve_season_rate(&[2025, 2024], |season| {
            calls.push(season);
            Ok(Some(SeasonRate::new(5.0, 20.0)))
        });
        assert_eq!(calls, vec![2025]);
    }
}
