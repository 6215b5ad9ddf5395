//! On-disk match dataset shape (one JSON file per match).
//!
//! Field names use `camelCase` on disk and `snake_case` in Rust code via
//! `#[serde(rename_all = "camelCase")]`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchDataset {
    pub team_id: String,
    pub match_id: String,
    pub metadata: MatchMetadata,
    #[serde(default)]
    pub player_bios: Vec<PlayerBio>,
    #[serde(default)]
    pub coach_strategies: Vec<CoachStrategy>,
    #[serde(default)]
    pub events: Vec<MatchEvent>,
    pub metrics: MatchMetrics,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchMetadata {
    pub opponent: String,
    /// ISO calendar date (`YYYY-MM-DD`).
    pub date: String,
    pub location: String,
    pub competition: String,
    pub result: String,
    pub score: Score,
    pub narrative: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub team: u32,
    pub opponent: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerBio {
    pub player_id: String,
    pub name: String,
    pub position: String,
    pub experience: String,
    pub playing_style: String,
    pub season_notes: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoachStrategy {
    pub coach_id: String,
    pub name: String,
    pub role: String,
    pub game_plan: String,
    #[serde(default)]
    pub adjustments: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchEvent {
    pub clock: String,
    pub description: String,
    pub impact: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchMetrics {
    pub pace: f64,
    pub offensive_rating: f64,
    pub defensive_rating: f64,
    pub turnover_rate: f64,
    pub effective_field_goal_percentage: f64,
    pub rebound_margin: String,
    pub notes: String,
}
