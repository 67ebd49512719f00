use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DashboardError;

pub const EMPTY_RECORD: &str = "0W-0D-0L";

/// Which subset of a team's matches the view is computed over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewScope {
    #[default]
    Overall,
    Home,
    Away,
}

impl ViewScope {
    pub const ALL: [ViewScope; 3] = [ViewScope::Overall, ViewScope::Home, ViewScope::Away];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Overall => "overall",
            Self::Home => "home",
            Self::Away => "away",
        }
    }
}

impl fmt::Display for ViewScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViewScope {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "overall" => Ok(Self::Overall),
            "home" => Ok(Self::Home),
            "away" => Ok(Self::Away),
            other => Err(DashboardError::validation(format!(
                "Unknown view '{}': use overall, home or away",
                other
            ))),
        }
    }
}

/// Competition / season filter echoed back by the statistics service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterEcho {
    All,
    Only(String),
}

impl FilterEcho {
    pub fn from_raw(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            None | Some("") | Some("All") => Self::All,
            Some(value) => Self::Only(value.to_string()),
        }
    }

    pub fn display(&self) -> &str {
        match self {
            Self::All => "All",
            Self::Only(value) => value,
        }
    }
}

/// Fully defaulted statistics view for one team and one scope.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsViewModel {
    pub team: String,
    pub competition: FilterEcho,
    pub season: FilterEcho,
    pub scope: ViewScope,
    pub record: RecordView,
    pub goals: GoalsView,
    pub failed_to_score: FailedToScoreView,
    pub over_under: OverUnderView,
    pub form: FormView,
    pub rank_groups: RankGroupsView,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordView {
    pub matches_played: i64,
    pub wins: i64,
    pub draws: i64,
    pub losses: i64,
    pub win_rate: f64,
    pub draw_rate: f64,
    pub loss_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GoalsView {
    pub scored: i64,
    pub conceded: i64,
    pub goal_difference: i64,
    pub avg_scored: f64,
    pub avg_conceded: f64,
    pub avg_total_goals: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FailedToScoreView {
    pub count: i64,
    pub rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverUnderView {
    pub over_25: i64,
    pub under_25: i64,
    pub over_25_rate: f64,
    pub under_25_rate: f64,
    pub btts: i64,
    pub btts_rate: f64,
    /// Additional goal lines, in fixed order, present lines only.
    pub extra_lines: Vec<GoalLineView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GoalLineView {
    pub key: String,
    pub line: f64,
    pub over: i64,
    pub under: i64,
    pub over_rate: f64,
    pub under_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormView {
    pub last_5: FormWindowView,
    pub last_10: FormWindowView,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormWindowView {
    pub record: String,
    pub wins: i64,
    pub draws: i64,
    pub losses: i64,
    pub points: i64,
    pub goals_scored: i64,
    pub goals_conceded: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankGroupsView {
    /// False when the backend flagged the sample as insufficient (or sent nothing).
    pub available: bool,
    pub top_n: i64,
    pub bottom_n: i64,
    pub total_teams: i64,
    pub bottom_threshold_rank: i64,
    pub vs_top: GroupRecordView,
    pub vs_mid: GroupRecordView,
    pub vs_bottom: GroupRecordView,
    pub bands: Vec<BandView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupRecordView {
    pub matches: i64,
    pub wins: i64,
    pub draws: i64,
    pub losses: i64,
    pub win_rate: f64,
    /// `"<w>W-<d>D-<l>L"`
    pub record: String,
}

impl GroupRecordView {
    pub fn zero() -> Self {
        Self {
            matches: 0,
            wins: 0,
            draws: 0,
            losses: 0,
            win_rate: 0.0,
            record: EMPTY_RECORD.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BandView {
    pub name: String,
    pub matches: i64,
    pub wins: i64,
    pub draws: i64,
    pub losses: i64,
    pub ppg: f64,
    pub goals_for: i64,
    pub goals_against: i64,
}

/// Outcome probabilities exactly as the model produced them (no renormalization).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Probabilities {
    pub home_win: f64,
    pub draw: f64,
    pub away_win: f64,
}

/// Human-readable breakdown of a prediction, one entry per line.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Explanation {
    pub lines: Vec<String>,
}

impl Explanation {
    /// Lines joined by `\n`; empty when nothing could be explained.
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// What the presentation layer receives for a prediction request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionView {
    pub match_id: i64,
    pub home_team: String,
    pub away_team: String,
    pub model: String,
    pub probabilities: Probabilities,
    pub explanation_lines: Vec<String>,
    pub explanation: String,
}
