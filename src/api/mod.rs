use std::path::Path;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
    routing::{get, post, put},
    Router,
};
use serde::{Deserialize, Serialize};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

use crate::config::Config;
use crate::error::DashboardError;
use crate::models::{
    ApiResponse, PredictionView, StandingRow, StatsViewModel, TeamList, UpcomingMatch, ViewScope,
};
use crate::services::{
    DashboardSession, SessionSnapshot, SharedSession, StatsClient, StatsViewResolver,
};
use crate::utils::{filter_matches, filter_options, match_label};

type ApiError = (StatusCode, Json<ApiResponse<()>>);
type ApiResult<T> = Result<Json<ApiResponse<T>>, ApiError>;

#[derive(Clone)]
pub struct AppState {
    pub client: StatsClient,
    pub session: SharedSession,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            client: StatsClient::new(config),
            session: DashboardSession::shared(),
        }
    }
}

pub async fn serve(config: Config) -> anyhow::Result<()> {
    let app = create_router(AppState::new(&config), config.static_dir.as_deref());

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port)).await?;
    tracing::info!(
        "Stats dashboard listening on port {} (backend {})",
        config.port,
        config.stats_api_url
    );

    axum::serve(listener, app).await?;
    Ok(())
}

pub fn create_router(state: AppState, static_dir: Option<&Path>) -> Router {
    let router = Router::new()
        .route("/health", get(health_check))
        .route("/api/view/teams", get(teams_handler))
        .route("/api/view/stats", get(stats_handler))
        .route("/api/view/standings", get(standings_handler))
        .route("/api/view/matches", get(matches_handler))
        .route("/api/view/predict", post(predict_handler))
        .route("/api/session", get(session_handler))
        .route("/api/session/stats", post(session_stats_handler))
        .route("/api/session/scope", put(session_scope_handler))
        .with_state(state);

    let router = match static_dir {
        Some(dir) => {
            tracing::info!("Serving static files from {}", dir.display());
            router.fallback_service(ServeDir::new(dir))
        }
        None => router,
    };

    router.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive()),
    )
}

fn reject(e: DashboardError) -> ApiError {
    let status = e.status_code();
    if e.is_validation() {
        tracing::debug!("Rejected request: {}", e);
    } else {
        tracing::error!("Upstream failure: {}", e);
    }
    (status, Json(ApiResponse::error(e.to_string())))
}

// Health check endpoint
async fn health_check() -> Json<ApiResponse<&'static str>> {
    Json(ApiResponse::success("Stats dashboard is running"))
}

#[derive(Deserialize)]
struct FilterQuery {
    competition: Option<String>,
    season: Option<String>,
}

// GET /api/view/teams - Team list, falling back to upcoming matches
async fn teams_handler(
    State(state): State<AppState>,
    Query(params): Query<FilterQuery>,
) -> ApiResult<TeamList> {
    state
        .client
        .teams_with_fallback(params.competition.as_deref(), params.season.as_deref())
        .await
        .map(|teams| Json(ApiResponse::success(teams)))
        .map_err(reject)
}

#[derive(Deserialize)]
struct StatsQuery {
    team: Option<String>,
    competition: Option<String>,
    season: Option<String>,
    scope: Option<String>,
}

// GET /api/view/stats - Resolved stats view for one team and scope
async fn stats_handler(
    State(state): State<AppState>,
    Query(params): Query<StatsQuery>,
) -> ApiResult<StatsViewModel> {
    let scope: ViewScope = params
        .scope
        .as_deref()
        .unwrap_or_default()
        .parse()
        .map_err(reject)?;

    let document = state
        .client
        .stats(
            params.team.as_deref().unwrap_or_default(),
            params.competition.as_deref(),
            params.season.as_deref(),
        )
        .await
        .map_err(reject)?;

    Ok(Json(ApiResponse::success(StatsViewResolver::resolve(
        &document, scope,
    ))))
}

#[derive(Deserialize)]
struct StandingsQuery {
    competition: Option<String>,
    season: Option<String>,
    date: Option<String>,
}

// GET /api/view/standings - Table at a cut-off date
async fn standings_handler(
    State(state): State<AppState>,
    Query(params): Query<StandingsQuery>,
) -> ApiResult<Vec<StandingRow>> {
    state
        .client
        .standings(
            params.competition.as_deref().unwrap_or_default(),
            params.season.as_deref().unwrap_or_default(),
            params.date.as_deref().unwrap_or_default(),
        )
        .await
        .map(|rows| Json(ApiResponse::success(rows)))
        .map_err(reject)
}

#[derive(Serialize)]
struct MatchOption {
    #[serde(flatten)]
    info: UpcomingMatch,
    label: String,
}

#[derive(Serialize)]
struct UpcomingMatchesView {
    competitions: Vec<String>,
    seasons: Vec<String>,
    matches: Vec<MatchOption>,
}

// GET /api/view/matches - Upcoming matches plus the filter choices
async fn matches_handler(
    State(state): State<AppState>,
    Query(params): Query<FilterQuery>,
) -> ApiResult<UpcomingMatchesView> {
    let matches = state.client.upcoming_matches().await.map_err(reject)?;
    let (competitions, seasons) = filter_options(&matches);

    let matches = filter_matches(
        &matches,
        params.competition.as_deref(),
        params.season.as_deref(),
    )
    .into_iter()
    .map(|m| MatchOption {
        label: match_label(m),
        info: m.clone(),
    })
    .collect();

    Ok(Json(ApiResponse::success(UpcomingMatchesView {
        competitions,
        seasons,
        matches,
    })))
}

#[derive(Deserialize)]
struct PredictBody {
    match_id: Option<i64>,
    #[serde(default)]
    model: String,
}

// POST /api/view/predict - Probabilities and explanation for one match
async fn predict_handler(
    State(state): State<AppState>,
    Json(body): Json<PredictBody>,
) -> ApiResult<PredictionView> {
    let result = state.client.predict(body.match_id, &body.model).await;

    let mut session = state.session.write().await;
    session
        .apply_prediction_result(result)
        .map(|view| Json(ApiResponse::success(view.clone())))
        .map_err(reject)
}

// GET /api/session - Current render
async fn session_handler(State(state): State<AppState>) -> Json<ApiResponse<SessionSnapshot>> {
    Json(ApiResponse::success(state.session.read().await.snapshot()))
}

#[derive(Deserialize)]
struct SessionStatsBody {
    #[serde(default)]
    team: String,
    competition: Option<String>,
    season: Option<String>,
}

// POST /api/session/stats - Refresh the held document from the backend
async fn session_stats_handler(
    State(state): State<AppState>,
    Json(body): Json<SessionStatsBody>,
) -> ApiResult<StatsViewModel> {
    // Fetch outside the lock; the last completed refresh wins.
    let result = state
        .client
        .stats(&body.team, body.competition.as_deref(), body.season.as_deref())
        .await;

    let mut session = state.session.write().await;
    session
        .apply_stats_result(result)
        .map(|view| Json(ApiResponse::success(view.clone())))
        .map_err(reject)
}

#[derive(Deserialize)]
struct ScopeBody {
    #[serde(default)]
    scope: String,
}

// PUT /api/session/scope - Re-resolve the held document for another scope
async fn session_scope_handler(
    State(state): State<AppState>,
    Json(body): Json<ScopeBody>,
) -> ApiResult<SessionSnapshot> {
    let scope: ViewScope = body.scope.parse().map_err(reject)?;

    let mut session = state.session.write().await;
    session.set_scope(scope);
    Ok(Json(ApiResponse::success(session.snapshot())))
}
