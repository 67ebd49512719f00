use axum::http::StatusCode;
use thiserror::Error;

pub type DashboardResult<T> = Result<T, DashboardError>;

/// Everything that can go wrong between a user action and a rendered view.
///
/// Partial or malformed payloads are deliberately absent here: those resolve
/// to defaults inside the view-model resolvers and never surface as errors.
#[derive(Debug, Error)]
pub enum DashboardError {
    /// Input rejected before any request was issued.
    #[error("{0}")]
    Validation(String),

    /// The backend answered with a non-2xx status.
    #[error("{label}: {message} (HTTP {status})")]
    Transport {
        label: String,
        status: u16,
        message: String,
    },

    #[error("{label}: timeout")]
    Timeout { label: String },

    #[error("{label}: backend unreachable: {source}")]
    Network {
        label: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{label}: invalid JSON response: {source}")]
    Decode {
        label: String,
        #[source]
        source: serde_json::Error,
    },
}

impl DashboardError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// HTTP status used when the error is relayed by the dashboard API.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Timeout { .. } => StatusCode::GATEWAY_TIMEOUT,
            Self::Transport { .. } | Self::Network { .. } | Self::Decode { .. } => {
                StatusCode::BAD_GATEWAY
            }
        }
    }
}
