use std::sync::Arc;

use serde::Serialize;
use tokio::sync::RwLock;

use crate::error::DashboardResult;
use crate::models::{
    PredictionResponse, PredictionView, StatsViewModel, TeamStatsDocument, ViewScope,
};
use crate::services::{PredictionExplainer, StatsViewResolver};

pub type SharedSession = Arc<RwLock<DashboardSession>>;

/// What one dashboard user is looking at: the last statistics document, the
/// selected scope, and the views rendered from them.
///
/// Documents are replaced wholesale on every successful fetch. A failed
/// fetch leaves the previous render in place.
#[derive(Debug, Default)]
pub struct DashboardSession {
    document: Option<TeamStatsDocument>,
    scope: ViewScope,
    stats_view: Option<StatsViewModel>,
    prediction: Option<PredictionView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub scope: ViewScope,
    pub stats: Option<StatsViewModel>,
    pub prediction: Option<PredictionView>,
}

impl DashboardSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> SharedSession {
        Arc::new(RwLock::new(Self::new()))
    }

    pub fn scope(&self) -> ViewScope {
        self.scope
    }

    pub fn stats_view(&self) -> Option<&StatsViewModel> {
        self.stats_view.as_ref()
    }

    pub fn prediction(&self) -> Option<&PredictionView> {
        self.prediction.as_ref()
    }

    pub fn apply_stats(&mut self, document: TeamStatsDocument) -> &StatsViewModel {
        let view = StatsViewResolver::resolve(&document, self.scope);
        self.document = Some(document);
        self.stats_view.insert(view)
    }

    /// Applies a fetch outcome. On error the last good render is kept and the
    /// error is handed back for the caller to show.
    pub fn apply_stats_result(
        &mut self,
        result: DashboardResult<TeamStatsDocument>,
    ) -> DashboardResult<&StatsViewModel> {
        match result {
            Ok(document) => Ok(self.apply_stats(document)),
            Err(e) => {
                tracing::warn!("Stats refresh failed, keeping previous view: {}", e);
                Err(e)
            }
        }
    }

    /// Switches scope and re-renders the held document, if any.
    pub fn set_scope(&mut self, scope: ViewScope) -> Option<&StatsViewModel> {
        self.scope = scope;
        let view = StatsViewResolver::resolve(self.document.as_ref()?, scope);
        Some(self.stats_view.insert(view))
    }

    pub fn apply_prediction(&mut self, response: &PredictionResponse) -> &PredictionView {
        self.prediction.insert(PredictionExplainer::view(response))
    }

    pub fn apply_prediction_result(
        &mut self,
        result: DashboardResult<PredictionResponse>,
    ) -> DashboardResult<&PredictionView> {
        match result {
            Ok(response) => Ok(self.apply_prediction(&response)),
            Err(e) => {
                tracing::warn!("Prediction failed, keeping previous view: {}", e);
                Err(e)
            }
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            scope: self.scope,
            stats: self.stats_view.clone(),
            prediction: self.prediction.clone(),
        }
    }
}
