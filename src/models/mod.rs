pub mod catalog;
pub mod lenient;
pub mod prediction;
pub mod stats;
pub mod view;

use chrono::{DateTime, Utc};
use serde::Serialize;

pub use catalog::{
    MatchesResponse, StandingRow, StandingsResponse, TeamList, TeamSource, TeamsResponse,
    UpcomingMatch,
};
pub use prediction::{PredictRequest, PredictionModel, PredictionResponse};
pub use stats::TeamStatsDocument;
pub use view::{
    BandView, Explanation, FailedToScoreView, FilterEcho, FormView, FormWindowView, GoalLineView,
    GoalsView, GroupRecordView, OverUnderView, PredictionView, Probabilities, RankGroupsView,
    RecordView, StatsViewModel, ViewScope,
};

// API Response types
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            timestamp: Utc::now(),
        }
    }

    pub fn error(message: String) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message),
            timestamp: Utc::now(),
        }
    }
}
