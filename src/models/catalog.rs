use serde::{Deserialize, Serialize};

use super::lenient;

/// `GET /teams`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TeamsResponse {
    #[serde(deserialize_with = "lenient::labels")]
    pub teams: Option<Vec<String>>,
}

/// Where a team list came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TeamSource {
    Teams,
    /// `/teams` failed; names were collected from the upcoming-match cache.
    MatchesFallback,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamList {
    pub teams: Vec<String>,
    pub source: TeamSource,
}

/// `GET /standings`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StandingsResponse {
    #[serde(deserialize_with = "lenient::list_of")]
    pub standings: Vec<StandingRow>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StandingRow {
    #[serde(deserialize_with = "lenient::count_or_zero")]
    pub rank: i64,
    #[serde(deserialize_with = "lenient::label_or_empty")]
    pub team: String,
    #[serde(deserialize_with = "lenient::count_or_zero")]
    pub points: i64,
    #[serde(deserialize_with = "lenient::count_or_zero")]
    pub played: i64,
    #[serde(deserialize_with = "lenient::count_or_zero")]
    pub wins: i64,
    #[serde(deserialize_with = "lenient::count_or_zero")]
    pub draws: i64,
    #[serde(deserialize_with = "lenient::count_or_zero")]
    pub losses: i64,
    #[serde(deserialize_with = "lenient::count_or_zero")]
    pub gf: i64,
    #[serde(deserialize_with = "lenient::count_or_zero")]
    pub ga: i64,
    #[serde(deserialize_with = "lenient::count_or_zero")]
    pub gd: i64,
}

/// `GET /matches` (upcoming, not yet finished)
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MatchesResponse {
    #[serde(deserialize_with = "lenient::list_of")]
    pub matches: Vec<UpcomingMatch>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpcomingMatch {
    #[serde(deserialize_with = "lenient::count_or_zero")]
    pub id: i64,
    #[serde(deserialize_with = "lenient::label_or_empty")]
    pub date: String,
    #[serde(deserialize_with = "lenient::label_or_empty")]
    pub competition: String,
    /// Compared as text: the backend sends `2024`, filters arrive as `"2024"`.
    #[serde(deserialize_with = "lenient::label_or_empty")]
    pub season: String,
    #[serde(deserialize_with = "lenient::label_or_empty")]
    pub home_team: String,
    #[serde(deserialize_with = "lenient::label_or_empty")]
    pub away_team: String,
}
