use std::collections::HashSet;

use anyhow::Result;
use rayon::prelude::*;
use tracing::{debug, warn};

use crate::config::PipelineConfig;
use crate::error::DataGap;
use crate::stat_lookup::StatLookup;
use crate::types::{Game, Matchup, PlayerRef, SeasonRate, Side};

#[derive(Debug, Default)]
pub struct BuildOutcome {
    pub matchups: Vec<Matchup>,
    pub gaps: Vec<DataGap>,
}

/// Pairs each probable pitcher with the opposing roster.
///
/// Every failure is scoped to the smallest unit it touches: a bad team or
/// pitcher lookup drops that game side, a bad batter lookup drops that batter.
#[derive(Debug)]
pub struct MatchupBuilder {
    min_batter_sample: f64,
    min_pitcher_sample: f64,
    pool: Option<rayon::ThreadPool>,
}

impl MatchupBuilder {
    pub fn new(min_batter_sample: f64) -> Self {
        Self {
            min_batter_sample,
            min_pitcher_sample: 0.0,
            pool: None,
        }
    }

    pub fn from_config(cfg: &PipelineConfig) -> Self {
        Self::new(cfg.min_batter_sample)
            .with_min_pitcher_sample(cfg.min_pitcher_sample)
            .with_parallelism(cfg.fetch_parallelism)
    }

    pub fn with_min_pitcher_sample(mut self, min_pitcher_sample: f64) -> Self {
        self.min_pitcher_sample = min_pitcher_sample;
        self
    }

    /// Fan batter lookups out over `threads` workers. One thread (or a pool
    /// that fails to build) keeps lookups sequential.
    pub fn with_parallelism(mut self, threads: usize) -> Self {
        self.pool = build_fetch_pool(threads);
        self
    }

    pub fn build(&self, games: &[Game], lookup: &dyn StatLookup) -> Vec<Matchup> {
        self.build_with_gaps(games, lookup).matchups
    }

    pub fn build_with_gaps(&self, games: &[Game], lookup: &dyn StatLookup) -> BuildOutcome {
        let mut out = BuildOutcome::default();
        for game in games {
            for side in Side::BOTH {
                self.build_side(game, side, lookup, &mut out);
            }
        }
        out
    }

    fn build_side(&self, game: &Game, side: Side, lookup: &dyn StatLookup, out: &mut BuildOutcome) {
        let game_id = game.game_id;
        let Some(pitcher) = game.pitcher(side) else {
            record(out, DataGap::NoProbablePitcher { game_id, side });
            return;
        };

        let opponent = game.opponent_team_name(side);
        let team_id = match lookup.resolve_team_id(opponent) {
            Ok(Some(id)) => id,
            Ok(None) => {
                record(
                    out,
                    DataGap::UnknownTeam {
                        game_id,
                        team_name: opponent.to_string(),
                    },
                );
                return;
            }
            Err(err) => {
                record(out, upstream(game_id, format!("team {opponent:?}"), &err));
                return;
            }
        };

        let pitcher_rate = match lookup.get_pitcher_rate(pitcher.id) {
            Ok(rate) => rate,
            Err(err) => {
                record(out, upstream(game_id, format!("pitcher {}", pitcher.id), &err));
                return;
            }
        };
        if !pitcher_rate.has_sample() || pitcher_rate.sample_size < self.min_pitcher_sample {
            record(
                out,
                DataGap::ThinPitcherSample {
                    game_id,
                    pitcher_id: pitcher.id,
                    sample: pitcher_rate.sample_size,
                },
            );
            return;
        }

        let roster = match lookup.get_roster(team_id) {
            Ok(roster) => dedup_by_identity(roster),
            Err(err) => {
                record(out, upstream(game_id, format!("roster {team_id}"), &err));
                return;
            }
        };

        let rates = self.fetch_batter_rates(&roster, lookup);
        for (batter, rate) in roster.into_iter().zip(rates) {
            let batter_rate = match rate {
                Ok(rate) => rate,
                Err(err) => {
                    record(out, upstream(game_id, format!("batter {}", batter.id), &err));
                    continue;
                }
            };
            if !batter_rate.has_sample() || batter_rate.sample_size < self.min_batter_sample {
                record(
                    out,
                    DataGap::ThinBatterSample {
                        game_id,
                        batter_id: batter.id,
                        sample: batter_rate.sample_size,
                    },
                );
                continue;
            }
            out.matchups.push(Matchup {
                game_id,
                pitcher: pitcher.clone(),
                pitcher_rate,
                batter,
                batter_rate,
            });
        }
    }

    // Results come back in roster order on both paths.
    fn fetch_batter_rates(
        &self,
        roster: &[PlayerRef],
        lookup: &dyn StatLookup,
    ) -> Vec<Result<SeasonRate>> {
        match self.pool.as_ref() {
            Some(pool) => pool.install(|| {
                roster
                    .par_iter()
                    .map(|batter| lookup.get_batter_rate(batter.id))
                    .collect()
            }),
            None => roster
                .iter()
                .map(|batter| lookup.get_batter_rate(batter.id))
                .collect(),
        }
    }
}

/// Sequential build with no pitcher floor beyond a nonzero sample.
pub fn build(games: &[Game], lookup: &dyn StatLookup, min_batter_sample: f64) -> Vec<Matchup> {
    MatchupBuilder::new(min_batter_sample).build(games, lookup)
}

/// Keeps the first entry for each player id.
pub fn dedup_by_identity(players: Vec<PlayerRef>) -> Vec<PlayerRef> {
    let mut seen = HashSet::new();
    players
        .into_iter()
        .filter(|p| seen.insert(p.id))
        .collect()
}

fn upstream(game_id: u64, what: String, err: &anyhow::Error) -> DataGap {
    DataGap::Upstream {
        game_id,
        what,
        message: format!("{err:#}"),
    }
}

fn record(out: &mut BuildOutcome, gap: DataGap) {
    match &gap {
        DataGap::UnknownTeam { .. } | DataGap::Upstream { .. } => warn!(%gap, "skipping"),
        _ => debug!(%gap, "skipping"),
    }
    out.gaps.push(gap);
}

fn build_fetch_pool(threads: usize) -> Option<rayon::ThreadPool> {
    if threads <= 1 {
        return None;
    }
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dedup_keeps_first_occurrence() {
        let mut later = PlayerRef::new(7, "Seven (40-man)");
        later.position = Some("Outfielder".to_string());
        let players = vec![
            PlayerRef::new(7, "Seven"),
            PlayerRef::new(8, "Eight"),
            later,
        ];
        let out = dedup_by_identity(players);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].display_name, "Seven");
        assert_eq!(out[1].id, 8);
    }

    #[test]
    fn single_thread_has_no_pool() {
        assert!(build_fetch_pool(1).is_none());
        assert!(build_fetch_pool(0).is_none());
    }
}
