use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;

use super::lenient;

/// Raw payload of `GET /stats`, exactly as the statistics service sends it.
///
/// Every field is optional: the view-model resolver decides what an absent
/// value means, so nothing here is defaulted.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct TeamStatsDocument {
    #[serde(deserialize_with = "lenient::label")]
    pub team: Option<String>,
    /// Filter echo; `"All"` when the request was unfiltered.
    #[serde(deserialize_with = "lenient::label")]
    pub competition: Option<String>,
    #[serde(deserialize_with = "lenient::label")]
    pub season: Option<String>,

    #[serde(deserialize_with = "lenient::count")]
    pub matches_played: Option<i64>,
    #[serde(deserialize_with = "lenient::count")]
    pub wins: Option<i64>,
    #[serde(deserialize_with = "lenient::count")]
    pub draws: Option<i64>,
    #[serde(deserialize_with = "lenient::count")]
    pub losses: Option<i64>,
    #[serde(deserialize_with = "lenient::number")]
    pub win_rate: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub draw_rate: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub loss_rate: Option<f64>,

    #[serde(deserialize_with = "lenient::count")]
    pub goals_scored: Option<i64>,
    #[serde(deserialize_with = "lenient::count")]
    pub goals_conceded: Option<i64>,
    #[serde(deserialize_with = "lenient::nested")]
    pub goals: Option<GoalsBlock>,

    #[serde(deserialize_with = "lenient::nested")]
    pub failed_to_score: Option<FailedToScoreBlock>,
    #[serde(deserialize_with = "lenient::nested")]
    pub over_under: Option<OverUnderBlock>,
    #[serde(deserialize_with = "lenient::nested")]
    pub form: Option<FormBlock>,

    #[serde(deserialize_with = "lenient::nested")]
    pub home: Option<VenueBlock>,
    #[serde(deserialize_with = "lenient::nested")]
    pub away: Option<VenueBlock>,

    #[serde(deserialize_with = "lenient::nested")]
    pub vs_rank_groups: Option<RankGroupsBlock>,
}

impl TeamStatsDocument {
    /// Never fails: a payload that is not even a JSON object is an empty document.
    pub fn from_value(value: Value) -> Self {
        lenient::from_object(value).unwrap_or_default()
    }

    /// Fails only on JSON syntax errors.
    pub fn from_json_str(raw: &str) -> Result<Self, serde_json::Error> {
        let value: Value = serde_json::from_str(raw)?;
        Ok(Self::from_value(value))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct GoalsBlock {
    #[serde(deserialize_with = "lenient::count")]
    pub scored: Option<i64>,
    #[serde(deserialize_with = "lenient::count")]
    pub conceded: Option<i64>,
    #[serde(deserialize_with = "lenient::count")]
    pub goal_difference: Option<i64>,
    #[serde(deserialize_with = "lenient::number")]
    pub avg_scored: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub avg_conceded: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub avg_total_goals: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct FailedToScoreBlock {
    #[serde(deserialize_with = "lenient::count")]
    pub count: Option<i64>,
    #[serde(deserialize_with = "lenient::number")]
    pub rate: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct OverUnderBlock {
    #[serde(deserialize_with = "lenient::count")]
    pub over_25: Option<i64>,
    #[serde(deserialize_with = "lenient::count")]
    pub under_25: Option<i64>,
    #[serde(deserialize_with = "lenient::number")]
    pub over_25_rate: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub under_25_rate: Option<f64>,
    #[serde(deserialize_with = "lenient::count")]
    pub btts: Option<i64>,
    #[serde(deserialize_with = "lenient::number")]
    pub btts_rate: Option<f64>,
    /// Keyed by line identifier: `"0_5"`, `"1_5"`, `"2_5"`, ...
    #[serde(deserialize_with = "lenient::map_of")]
    pub lines: Option<HashMap<String, GoalLineBlock>>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct GoalLineBlock {
    #[serde(deserialize_with = "lenient::number")]
    pub line: Option<f64>,
    #[serde(deserialize_with = "lenient::count")]
    pub over: Option<i64>,
    #[serde(deserialize_with = "lenient::count")]
    pub under: Option<i64>,
    #[serde(deserialize_with = "lenient::number")]
    pub over_rate: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub under_rate: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct FormBlock {
    #[serde(deserialize_with = "lenient::nested")]
    pub last_5: Option<FormWindowBlock>,
    #[serde(deserialize_with = "lenient::nested")]
    pub last_10: Option<FormWindowBlock>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct FormWindowBlock {
    /// e.g. `"3W-1D-1L"`
    #[serde(deserialize_with = "lenient::label")]
    pub record: Option<String>,
    #[serde(deserialize_with = "lenient::count")]
    pub wins: Option<i64>,
    #[serde(deserialize_with = "lenient::count")]
    pub draws: Option<i64>,
    #[serde(deserialize_with = "lenient::count")]
    pub losses: Option<i64>,
    #[serde(deserialize_with = "lenient::count")]
    pub points: Option<i64>,
    #[serde(deserialize_with = "lenient::count")]
    pub goals_scored: Option<i64>,
    #[serde(deserialize_with = "lenient::count")]
    pub goals_conceded: Option<i64>,
}

/// The `home` / `away` sub-documents: the same statistics restricted to one venue.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct VenueBlock {
    #[serde(deserialize_with = "lenient::count")]
    pub matches: Option<i64>,
    #[serde(deserialize_with = "lenient::count")]
    pub wins: Option<i64>,
    #[serde(deserialize_with = "lenient::count")]
    pub draws: Option<i64>,
    #[serde(deserialize_with = "lenient::count")]
    pub losses: Option<i64>,
    #[serde(deserialize_with = "lenient::number")]
    pub win_rate: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub draw_rate: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub loss_rate: Option<f64>,

    #[serde(deserialize_with = "lenient::count")]
    pub goals_scored: Option<i64>,
    #[serde(deserialize_with = "lenient::count")]
    pub goals_conceded: Option<i64>,
    #[serde(deserialize_with = "lenient::count")]
    pub goal_difference: Option<i64>,
    #[serde(deserialize_with = "lenient::number")]
    pub avg_scored: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub avg_conceded: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub avg_total_goals: Option<f64>,

    #[serde(deserialize_with = "lenient::nested")]
    pub failed_to_score: Option<FailedToScoreBlock>,
    #[serde(deserialize_with = "lenient::nested")]
    pub over_under: Option<OverUnderBlock>,
    #[serde(deserialize_with = "lenient::nested")]
    pub form: Option<FormBlock>,
}

/// Results against opponents grouped by their league rank at kick-off.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RankGroupsBlock {
    /// Present (and truthy) when the sample was insufficient.
    pub note: Option<Value>,

    #[serde(deserialize_with = "lenient::count")]
    pub top_n: Option<i64>,
    #[serde(deserialize_with = "lenient::count")]
    pub bottom_n: Option<i64>,
    #[serde(deserialize_with = "lenient::count")]
    pub total_teams: Option<i64>,
    #[serde(deserialize_with = "lenient::count")]
    pub bottom_threshold_rank: Option<i64>,

    #[serde(deserialize_with = "lenient::nested")]
    pub vs_top: Option<BucketBlock>,
    #[serde(deserialize_with = "lenient::nested")]
    pub vs_mid: Option<BucketBlock>,
    #[serde(deserialize_with = "lenient::nested")]
    pub vs_bottom: Option<BucketBlock>,

    #[serde(deserialize_with = "lenient::nested")]
    pub home: Option<RankGroupsSplit>,
    #[serde(deserialize_with = "lenient::nested")]
    pub away: Option<RankGroupsSplit>,

    /// Ordered band names, e.g. `["1-5", "6-10", "11-15", "16-20"]`.
    #[serde(deserialize_with = "lenient::labels")]
    pub rank_bands: Option<Vec<String>>,
    #[serde(deserialize_with = "lenient::map_of")]
    pub bands: Option<HashMap<String, BucketBlock>>,
    #[serde(deserialize_with = "lenient::map_of")]
    pub bands_home: Option<HashMap<String, BucketBlock>>,
    #[serde(deserialize_with = "lenient::map_of")]
    pub bands_away: Option<HashMap<String, BucketBlock>>,
}

impl RankGroupsBlock {
    pub fn is_insufficient(&self) -> bool {
        self.note.as_ref().is_some_and(lenient::is_truthy)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RankGroupsSplit {
    #[serde(deserialize_with = "lenient::nested")]
    pub vs_top: Option<BucketBlock>,
    #[serde(deserialize_with = "lenient::nested")]
    pub vs_mid: Option<BucketBlock>,
    #[serde(deserialize_with = "lenient::nested")]
    pub vs_bottom: Option<BucketBlock>,
}

/// One opponent bucket: a top/mid/bottom group or a named rank band.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct BucketBlock {
    #[serde(deserialize_with = "lenient::count")]
    pub matches: Option<i64>,
    #[serde(deserialize_with = "lenient::count")]
    pub wins: Option<i64>,
    #[serde(deserialize_with = "lenient::count")]
    pub draws: Option<i64>,
    #[serde(deserialize_with = "lenient::count")]
    pub losses: Option<i64>,
    #[serde(deserialize_with = "lenient::number")]
    pub win_rate: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub ppg: Option<f64>,
    #[serde(deserialize_with = "lenient::count")]
    pub goals_for: Option<i64>,
    #[serde(deserialize_with = "lenient::count")]
    pub goals_against: Option<i64>,
}
