use serde::{Deserialize, Serialize};

pub type PlayerId = u32;
pub type TeamId = u32;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerRef {
    pub id: PlayerId,
    pub display_name: String,
    #[serde(default)]
    pub position: Option<String>,
}

impl PlayerRef {
    pub fn new(id: PlayerId, display_name: impl Into<String>) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            position: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Home,
    Away,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Home, Side::Away];

    pub fn label(self) -> &'static str {
        match self {
            Side::Home => "home",
            Side::Away => "away",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    pub game_id: u64,
    pub home_team_name: String,
    pub away_team_name: String,
    #[serde(default)]
    pub home_pitcher: Option<PlayerRef>,
    #[serde(default)]
    pub away_pitcher: Option<PlayerRef>,
    #[serde(default)]
    pub scheduled_time: String,
    #[serde(default = "unknown_status")]
    pub status: String,
}

fn unknown_status() -> String {
    "Unknown".to_string()
}

impl Game {
    /// Probable pitcher for `side`, if one was announced.
    pub fn pitcher(&self, side: Side) -> Option<&PlayerRef> {
        match side {
            Side::Home => self.home_pitcher.as_ref(),
            Side::Away => self.away_pitcher.as_ref(),
        }
    }

    /// Name of the team the `side` pitcher faces.
    pub fn opponent_team_name(&self, side: Side) -> &str {
        match side {
            Side::Home => &self.away_team_name,
            Side::Away => &self.home_team_name,
        }
    }
}

/// Season strikeout line. `sample_size` is batters faced for pitchers and
/// at-bats for batters.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SeasonRate {
    pub strikeouts: f64,
    pub sample_size: f64,
    #[serde(default)]
    pub season: Option<i32>,
}

impl SeasonRate {
    pub fn new(strikeouts: f64, sample_size: f64) -> Self {
        Self {
            strikeouts,
            sample_size,
            season: None,
        }
    }

    pub fn for_season(strikeouts: f64, sample_size: f64, season: i32) -> Self {
        Self {
            strikeouts,
            sample_size,
            season: Some(season),
        }
    }

    /// Placeholder returned when no candidate season had usable data.
    pub fn zero() -> Self {
        Self::default()
    }

    pub fn has_sample(&self) -> bool {
        self.sample_size > 0.0
    }

    /// Strikeouts per sample as a percentage; 0 when there is no sample.
    pub fn rate_percent(&self) -> f64 {
        if self.has_sample() {
            self.strikeouts / self.sample_size * 100.0
        } else {
            0.0
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matchup {
    pub game_id: u64,
    pub pitcher: PlayerRef,
    pub pitcher_rate: SeasonRate,
    pub batter: PlayerRef,
    pub batter_rate: SeasonRate,
}

impl Matchup {
    pub fn pitcher_rate_percent(&self) -> f64 {
        self.pitcher_rate.rate_percent()
    }

    pub fn batter_rate_percent(&self) -> f64 {
        self.batter_rate.rate_percent()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredMatchup {
    pub matchup: Matchup,
    pub confidence_score: f64,
    pub strikeout_probability: f64,
    pub prediction_reason: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedMatchup {
    pub scored: ScoredMatchup,
    pub ranking_score: f64,
    pub rank: u32,
}

/// Flat record handed to presentation layers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRow {
    pub pitcher_name: String,
    pub pitcher_so_rate: f64,
    pub pitcher_batters_faced: f64,
    pub batter_name: String,
    pub batter_so_rate: f64,
    pub batter_at_bats: f64,
    pub confidence_score: f64,
    pub strikeout_probability: f64,
    pub prediction_reason: String,
    pub ranking_score: f64,
    pub prediction_rank: u32,
}

impl From<&RankedMatchup> for PredictionRow {
    fn from(row: &RankedMatchup) -> Self {
        let m = &row.scored.matchup;
        Self {
            pitcher_name: m.pitcher.display_name.clone(),
            pitcher_so_rate: m.pitcher_rate_percent(),
            pitcher_batters_faced: m.pitcher_rate.sample_size,
            batter_name: m.batter.display_name.clone(),
            batter_so_rate: m.batter_rate_percent(),
            batter_at_bats: m.batter_rate.sample_size,
            confidence_score: row.scored.confidence_score,
            strikeout_probability: row.scored.strikeout_probability,
            prediction_reason: row.scored.prediction_reason.clone(),
            ranking_score: row.ranking_score,
            prediction_rank: row.rank,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PredictionSummary {
    pub total_predictions: usize,
    pub high_confidence: usize,
    pub medium_confidence: usize,
    pub low_confidence: usize,
    pub avg_confidence: f64,
    pub avg_strikeout_prob: f64,
}
