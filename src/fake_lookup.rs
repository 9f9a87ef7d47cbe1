use std::collections::{HashMap, HashSet};

use anyhow::{Context, Result, anyhow};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::stat_lookup::{StatLookup, candidate_seasons, resolve_season_rate};
use crate::types::{Game, PlayerId, PlayerRef, SeasonRate, TeamId};

const FAKE_SEASON: i32 = 2025;

/// In-memory [`StatLookup`] for offline runs, tests and benches.
///
/// Season lines without a `season` belong to `season`. Ids listed in
/// `failing_players` and names in `failing_teams` make their lookups return
/// `Err`, which is how upstream failures are simulated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FakeLookup {
    #[serde(default = "default_season")]
    pub season: i32,
    #[serde(default)]
    pub games: Vec<Game>,
    #[serde(default)]
    pub teams: HashMap<String, TeamId>,
    #[serde(default)]
    pub rosters: HashMap<TeamId, Vec<PlayerRef>>,
    #[serde(default)]
    pub pitching: HashMap<PlayerId, Vec<SeasonRate>>,
    #[serde(default)]
    pub hitting: HashMap<PlayerId, Vec<SeasonRate>>,
    #[serde(default)]
    pub failing_players: HashSet<PlayerId>,
    #[serde(default)]
    pub failing_teams: HashSet<String>,
}

fn default_season() -> i32 {
    FAKE_SEASON
}

impl Default for FakeLookup {
    fn default() -> Self {
        Self {
            season: FAKE_SEASON,
            games: Vec::new(),
            teams: HashMap::new(),
            rosters: HashMap::new(),
            pitching: HashMap::new(),
            hitting: HashMap::new(),
            failing_players: HashSet::new(),
            failing_teams: HashSet::new(),
        }
    }
}

impl FakeLookup {
    pub fn from_json(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).context("invalid lookup fixture json")
    }

    pub fn with_game(mut self, game: Game) -> Self {
        self.games.push(game);
        self
    }

    pub fn with_team(mut self, name: &str, id: TeamId, roster: Vec<PlayerRef>) -> Self {
        self.teams.insert(name.to_string(), id);
        self.rosters.entry(id).or_default().extend(roster);
        self
    }

    pub fn with_pitcher(mut self, id: PlayerId, strikeouts: f64, batters_faced: f64) -> Self {
        self.pitching
            .entry(id)
            .or_default()
            .push(SeasonRate::new(strikeouts, batters_faced));
        self
    }

    pub fn with_batter(mut self, id: PlayerId, strikeouts: f64, at_bats: f64) -> Self {
        self.hitting
            .entry(id)
            .or_default()
            .push(SeasonRate::new(strikeouts, at_bats));
        self
    }

    pub fn with_batter_season(mut self, id: PlayerId, rate: SeasonRate) -> Self {
        self.hitting.entry(id).or_default().push(rate);
        self
    }

    pub fn failing_player(mut self, id: PlayerId) -> Self {
        self.failing_players.insert(id);
        self
    }

    pub fn failing_team(mut self, name: &str) -> Self {
        self.failing_teams.insert(name.to_string());
        self
    }

    fn rate(&self, lines: &HashMap<PlayerId, Vec<SeasonRate>>, id: PlayerId) -> Result<SeasonRate> {
        if self.failing_players.contains(&id) {
            return Err(anyhow!("stats lookup failed for player {id}"));
        }
        let lines = lines.get(&id).map(Vec::as_slice).unwrap_or_default();
        Ok(resolve_season_rate(&candidate_seasons(self.season), |season| {
            Ok(lines
                .iter()
                .find(|line| line.season.unwrap_or(self.season) == season)
                .copied())
        }))
    }
}

impl StatLookup for FakeLookup {
    fn get_games_for_date(&self, _date: NaiveDate) -> Result<Vec<Game>> {
        Ok(self.games.clone())
    }

    fn resolve_team_id(&self, team_name: &str) -> Result<Option<TeamId>> {
        if self.failing_teams.contains(team_name) {
            return Err(anyhow!("teams lookup failed for {team_name:?}"));
        }
        Ok(self.teams.get(team_name).copied())
    }

    fn get_roster(&self, team_id: TeamId) -> Result<Vec<PlayerRef>> {
        Ok(self.rosters.get(&team_id).cloned().unwrap_or_default())
    }

    fn get_pitcher_rate(&self, player_id: PlayerId) -> Result<SeasonRate> {
        self.rate(&self.pitching, player_id)
    }

    fn get_batter_rate(&self, player_id: PlayerId) -> Result<SeasonRate> {
        self.rate(&self.hitting, player_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_player_is_zero_sample() {
        let lookup = FakeLookup::default();
        let rate = lookup.get_batter_rate(99).unwrap();
        assert!(!rate.has_sample());
    }

    #[test]
    fn prior_season_line_is_used() {
        let lookup = FakeLookup::default()
            .with_batter(5, 0.0, 0.0)
            .with_batter_season(5, SeasonRate::for_season(70.0, 280.0, FAKE_SEASON - 1));
        let rate = lookup.get_batter_rate(5).unwrap();
        assert_eq!(rate.season, Some(FAKE_SEASON - 1));
        assert_eq!(rate.rate_percent(), 25.0);
    }

    #[test]
    fn failing_player_errors() {
        let lookup = FakeLookup::default().with_pitcher(1, 50.0, 200.0).failing_player(1);
        assert!(lookup.get_pitcher_rate(1).is_err());
    }
}
