use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::lenient;
use crate::error::{DashboardError, DashboardResult};

/// Body of `POST /predict`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictRequest {
    pub match_id: i64,
    /// Backend model identifier, see [`PredictionModel::backend_id`].
    pub model: String,
}

/// Prediction models the dashboard knows about.
///
/// The backend accepts a closed set of identifiers; only the base rules model
/// is wired end to end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PredictionModel {
    Base,
}

impl PredictionModel {
    pub fn backend_id(self) -> &'static str {
        match self {
            Self::Base => "rules_v1",
        }
    }

    /// Map a model id chosen in the UI to a wired model.
    pub fn from_ui(id: &str) -> DashboardResult<Self> {
        match id.trim() {
            "" => Err(DashboardError::validation(
                "Select competition, season, match and model.",
            )),
            "modello_base" | "base" | "rules_v1" | "rules" => Ok(Self::Base),
            other => Err(DashboardError::validation(format!(
                "Model '{}' is not available yet. Use 'base'.",
                other
            ))),
        }
    }
}

/// Raw payload of `POST /predict`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct PredictionResponse {
    #[serde(deserialize_with = "lenient::nested")]
    pub ok: Option<bool>,
    #[serde(deserialize_with = "lenient::label")]
    pub error: Option<String>,
    #[serde(deserialize_with = "lenient::count")]
    pub match_id: Option<i64>,
    #[serde(deserialize_with = "lenient::label")]
    pub competition: Option<String>,
    #[serde(deserialize_with = "lenient::label")]
    pub season: Option<String>,
    #[serde(deserialize_with = "lenient::label")]
    pub date: Option<String>,
    #[serde(deserialize_with = "lenient::label")]
    pub home_team: Option<String>,
    #[serde(deserialize_with = "lenient::label")]
    pub away_team: Option<String>,
    #[serde(deserialize_with = "lenient::label")]
    pub model: Option<String>,
    #[serde(deserialize_with = "lenient::nested")]
    pub probabilities: Option<ProbabilitiesBlock>,
    #[serde(deserialize_with = "lenient::nested")]
    pub debug: Option<DebugBlock>,
}

impl PredictionResponse {
    pub fn from_value(value: Value) -> Self {
        lenient::from_object(value).unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ProbabilitiesBlock {
    #[serde(deserialize_with = "lenient::number")]
    pub home_win: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub draw: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub away_win: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct DebugBlock {
    #[serde(deserialize_with = "lenient::nested")]
    pub ranks: Option<RanksBlock>,
    /// Named scoring contributions. Kept raw: non-numeric entries are skipped
    /// by the explainer rather than rejected here.
    #[serde(deserialize_with = "lenient::object")]
    pub components: Option<Map<String, Value>>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RanksBlock {
    #[serde(deserialize_with = "lenient::count")]
    pub home_rank_before: Option<i64>,
    #[serde(deserialize_with = "lenient::count")]
    pub away_rank_before: Option<i64>,
    #[serde(deserialize_with = "lenient::count")]
    pub total_teams: Option<i64>,
    #[serde(deserialize_with = "lenient::count")]
    pub rank_diff: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_model_catalog() {
        assert_eq!(PredictionModel::from_ui("modello_base").unwrap(), PredictionModel::Base);
        assert_eq!(PredictionModel::from_ui(" base ").unwrap(), PredictionModel::Base);
        assert_eq!(PredictionModel::Base.backend_id(), "rules_v1");

        assert!(PredictionModel::from_ui("").unwrap_err().is_validation());
        assert!(PredictionModel::from_ui("xg_poisson").unwrap_err().is_validation());
    }

    #[test]
    fn test_response_parses_backend_shape() {
        let resp = PredictionResponse::from_value(json!({
            "ok": true,
            "match_id": 812,
            "home_team": "Inter",
            "away_team": "Lazio",
            "season": 2024,
            "model": "rules_v1",
            "probabilities": { "home_win": 0.52, "draw": "0.27", "away_win": null },
            "debug": {
                "ranks": { "home_rank_before": 2, "away_rank_before": 7, "rank_diff": 5 },
                "components": { "rank_score": 2.5, "vs_score": "n/a" },
                "inputs": { "ignored": true }
            }
        }));

        assert_eq!(resp.match_id, Some(812));
        assert_eq!(resp.season.as_deref(), Some("2024"));
        let probs = resp.probabilities.unwrap();
        assert_eq!(probs.home_win, Some(0.52));
        assert_eq!(probs.draw, Some(0.27));
        assert_eq!(probs.away_win, None);
        let debug = resp.debug.unwrap();
        assert_eq!(debug.ranks.unwrap().rank_diff, Some(5));
        assert_eq!(debug.components.unwrap().len(), 2);
    }

    #[test]
    fn test_non_object_response_is_empty() {
        let resp = PredictionResponse::from_value(json!([true, null, 812]));
        assert_eq!(resp, PredictionResponse::default());

        let resp = PredictionResponse::from_value(json!({ "probabilities": [0.5, 0.3, 0.2] }));
        assert!(resp.probabilities.is_none());
    }

    #[test]
    fn test_predict_request_body() {
        let body = serde_json::to_value(PredictRequest {
            match_id: 812,
            model: PredictionModel::Base.backend_id().to_string(),
        })
        .unwrap();
        assert_eq!(body, json!({ "match_id": 812, "model": "rules_v1" }));
    }
}
