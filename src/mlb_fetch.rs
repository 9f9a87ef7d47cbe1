use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::config::MlbConfig;
use crate::http_cache::{CacheKey, ResponseCache, fetch_json_cached};
use crate::http_client::http_client;
use crate::stat_lookup::{StatLookup, candidate_seasons, resolve_season_rate};
use crate::types::{Game, PlayerId, PlayerRef, SeasonRate, TeamId};

const SPORT_ID: u32 = 1;
const SCHEDULE_HYDRATE: &str = "team,linescore,probablePitcher,lineups";
const ROSTER_TYPES: &[&str] = &["active", "fullSeason", "40Man"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatGroup {
    Pitching,
    Hitting,
}

impl StatGroup {
    fn api_name(self) -> &'static str {
        match self {
            StatGroup::Pitching => "pitching",
            StatGroup::Hitting => "hitting",
        }
    }

    fn sample_field(self) -> &'static str {
        match self {
            StatGroup::Pitching => "battersFaced",
            StatGroup::Hitting => "atBats",
        }
    }
}

/// [`StatLookup`] backed by the public MLB Stats API.
pub struct MlbStatLookup {
    client: &'static Client,
    cfg: MlbConfig,
    cache: Arc<ResponseCache>,
}

impl MlbStatLookup {
    pub fn new(cfg: MlbConfig) -> Result<Self> {
        let cache = Arc::new(ResponseCache::new(cfg.cache_ttl));
        Self::with_cache(cfg, cache)
    }

    pub fn with_cache(cfg: MlbConfig, cache: Arc<ResponseCache>) -> Result<Self> {
        Ok(Self {
            client: http_client()?,
            cfg,
            cache,
        })
    }

    fn get(&self, path: &str, key: CacheKey) -> Result<String> {
        let url = format!("{}{}", self.cfg.base_url, path);
        fetch_json_cached(self.client, &url, key, &self.cache)
    }

    fn season_rate(&self, player_id: PlayerId, group: StatGroup) -> SeasonRate {
        resolve_season_rate(&candidate_seasons(self.cfg.season), |season| {
            let path = format!(
                "/people/{player_id}/stats?stats=season&group={}&season={season}",
                group.api_name()
            );
            let body = self
                .get(&path, CacheKey::new(group.api_name(), player_id, Some(season)))
                .with_context(|| format!("{} stats for {player_id}", group.api_name()))?;
            parse_season_rate_json(&body, group)
        })
    }
}

impl StatLookup for MlbStatLookup {
    fn get_games_for_date(&self, date: NaiveDate) -> Result<Vec<Game>> {
        let date = date.format("%Y-%m-%d").to_string();
        let path = format!("/schedule?sportId={SPORT_ID}&date={date}&hydrate={SCHEDULE_HYDRATE}");
        let body = self
            .get(&path, CacheKey::new("schedule", &date, None))
            .context("schedule request failed")?;
        parse_schedule_json(&body)
    }

    fn resolve_team_id(&self, team_name: &str) -> Result<Option<TeamId>> {
        let path = format!("/teams?sportId={SPORT_ID}");
        let body = self
            .get(&path, CacheKey::new("teams", SPORT_ID, None))
            .context("teams request failed")?;
        let teams = parse_teams_json(&body)?;
        Ok(teams
            .into_iter()
            .find(|(_, name)| name == team_name)
            .map(|(id, _)| id))
    }

    fn get_roster(&self, team_id: TeamId) -> Result<Vec<PlayerRef>> {
        let mut out = Vec::new();
        for roster_type in ROSTER_TYPES {
            let path = format!("/teams/{team_id}/roster?rosterType={roster_type}");
            let key = CacheKey::new("roster", format!("{team_id}:{roster_type}"), None);
            match self.get(&path, key).and_then(|body| parse_roster_json(&body)) {
                Ok(players) => out.extend(players),
                Err(err) => {
                    debug!(team_id, roster_type = *roster_type, error = %err, "roster type unavailable")
                }
            }
        }
        Ok(out)
    }

    fn get_pitcher_rate(&self, player_id: PlayerId) -> Result<SeasonRate> {
        Ok(self.season_rate(player_id, StatGroup::Pitching))
    }

    fn get_batter_rate(&self, player_id: PlayerId) -> Result<SeasonRate> {
        Ok(self.season_rate(player_id, StatGroup::Hitting))
    }
}

#[derive(Debug, Deserialize)]
struct ScheduleResponse {
    #[serde(default)]
    dates: Vec<ScheduleDate>,
}

#[derive(Debug, Deserialize)]
struct ScheduleDate {
    #[serde(default)]
    games: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct ScheduleGame {
    #[serde(rename = "gamePk")]
    game_pk: u64,
    #[serde(rename = "gameDate", default)]
    game_date: Option<String>,
    #[serde(default)]
    status: Option<ScheduleStatus>,
    teams: ScheduleTeams,
}

#[derive(Debug, Deserialize)]
struct ScheduleStatus {
    #[serde(rename = "detailedState")]
    detailed_state: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ScheduleTeams {
    home: ScheduleSide,
    away: ScheduleSide,
}

#[derive(Debug, Deserialize)]
struct ScheduleSide {
    team: NamedTeam,
    #[serde(rename = "probablePitcher", default)]
    probable_pitcher: Option<Person>,
}

#[derive(Debug, Deserialize)]
struct NamedTeam {
    name: String,
}

#[derive(Debug, Deserialize)]
struct Person {
    id: PlayerId,
    #[serde(rename = "fullName", default)]
    full_name: Option<String>,
}

impl From<Person> for PlayerRef {
    fn from(p: Person) -> Self {
        PlayerRef::new(p.id, p.full_name.unwrap_or_default())
    }
}

/// Games in a schedule body. Entries missing required fields are skipped.
pub fn parse_schedule_json(raw: &str) -> Result<Vec<Game>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(Vec::new());
    }
    let data: ScheduleResponse = serde_json::from_str(trimmed).context("invalid schedule json")?;

    let mut games = Vec::new();
    for date in data.dates {
        for entry in date.games {
            let game = match serde_json::from_value::<ScheduleGame>(entry) {
                Ok(game) => game,
                Err(err) => {
                    debug!(error = %err, "skipping malformed schedule entry");
                    continue;
                }
            };
            games.push(Game {
                game_id: game.game_pk,
                home_team_name: game.teams.home.team.name,
                away_team_name: game.teams.away.team.name,
                home_pitcher: game.teams.home.probable_pitcher.map(PlayerRef::from),
                away_pitcher: game.teams.away.probable_pitcher.map(PlayerRef::from),
                scheduled_time: game.game_date.unwrap_or_default(),
                status: game
                    .status
                    .and_then(|s| s.detailed_state)
                    .unwrap_or_else(|| "Unknown".to_string()),
            });
        }
    }
    Ok(games)
}

pub fn parse_teams_json(raw: &str) -> Result<Vec<(TeamId, String)>> {
    let v: Value = serde_json::from_str(raw.trim()).context("invalid teams json")?;
    let Some(arr) = v.get("teams").and_then(|x| x.as_array()) else {
        return Ok(Vec::new());
    };
    Ok(arr
        .iter()
        .filter_map(|team| {
            let id = TeamId::try_from(team.get("id")?.as_u64()?).ok()?;
            let name = team.get("name")?.as_str()?.to_string();
            Some((id, name))
        })
        .collect())
}

/// Non-pitchers on a roster body, in listed order.
pub fn parse_roster_json(raw: &str) -> Result<Vec<PlayerRef>> {
    let v: Value = serde_json::from_str(raw.trim()).context("invalid roster json")?;
    let Some(arr) = v.get("roster").and_then(|x| x.as_array()) else {
        return Ok(Vec::new());
    };
    Ok(arr
        .iter()
        .filter_map(|entry| {
            let position = entry.get("position");
            let kind = position
                .and_then(|p| p.get("type"))
                .and_then(|x| x.as_str())
                .unwrap_or_default();
            if kind == "Pitcher" {
                return None;
            }
            let person = entry.get("person")?;
            let id = PlayerId::try_from(person.get("id")?.as_u64()?).ok()?;
            let name = person
                .get("fullName")
                .and_then(|x| x.as_str())
                .unwrap_or_default();
            let mut player = PlayerRef::new(id, name);
            player.position = position
                .and_then(|p| p.get("name"))
                .and_then(|x| x.as_str())
                .map(|s| s.to_string());
            Some(player)
        })
        .collect())
}

/// Season line from a `/people/{id}/stats` body, `None` when there are no
/// splits.
pub fn parse_season_rate_json(raw: &str, group: StatGroup) -> Result<Option<SeasonRate>> {
    let v: Value = serde_json::from_str(raw.trim()).context("invalid stats json")?;
    let Some(stat) = v
        .get("stats")
        .and_then(|x| x.get(0))
        .and_then(|x| x.get("splits"))
        .and_then(|x| x.get(0))
        .and_then(|x| x.get("stat"))
    else {
        return Ok(None);
    };
    let strikeouts = stat_number(stat, "strikeOuts").unwrap_or(0.0);
    let sample = stat_number(stat, group.sample_field()).unwrap_or(0.0);
    Ok(Some(SeasonRate::new(strikeouts, sample)))
}

// Counting stats come back as numbers, rate stats as strings.
fn stat_number(stat: &Value, key: &str) -> Option<f64> {
    let v = stat.get(key)?;
    v.as_f64()
        .or_else(|| v.as_str().and_then(|s| s.trim().parse::<f64>().ok()))
}
