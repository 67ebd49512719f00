use std::time::Duration;

use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::Config;
use crate::error::{DashboardError, DashboardResult};
use crate::models::{
    MatchesResponse, PredictRequest, PredictionModel, PredictionResponse, StandingRow,
    StandingsResponse, TeamList, TeamSource, TeamStatsDocument, TeamsResponse, UpcomingMatch,
};
use crate::utils::{parse_standings_date, teams_from_matches, validate_team_name};

/// Client for the statistics/prediction service.
///
/// Transport failures come back as labeled [`DashboardError`]s; missing
/// user input is rejected before any request goes out.
#[derive(Debug, Clone)]
pub struct StatsClient {
    client: Client,
    base_url: String,
    request_timeout: Duration,
    stats_timeout: Duration,
}

impl StatsClient {
    pub fn new(config: &Config) -> Self {
        Self {
            client: Client::new(),
            base_url: config.stats_api_url.trim_end_matches('/').to_string(),
            request_timeout: config.request_timeout,
            stats_timeout: config.stats_timeout,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ── Teams ────────────────────────────────────────────────────────────────

    pub async fn teams(
        &self,
        competition: Option<&str>,
        season: Option<&str>,
    ) -> DashboardResult<Vec<String>> {
        let query = filters(&[("competition", competition), ("season", season)]);
        let request = self.client.get(self.url("/teams")).query(&query);
        let data: TeamsResponse = self.send("fetch teams", request, self.request_timeout).await?;
        Ok(data.teams.unwrap_or_default())
    }

    /// Team list for the filters. When `/teams` is down the names are
    /// collected from the upcoming matches instead.
    pub async fn teams_with_fallback(
        &self,
        competition: Option<&str>,
        season: Option<&str>,
    ) -> DashboardResult<TeamList> {
        match self.teams(competition, season).await {
            Ok(teams) => Ok(TeamList {
                teams,
                source: TeamSource::Teams,
            }),
            Err(e) => {
                tracing::warn!("Team list unavailable ({}), falling back to /matches", e);
                let matches = self.send_matches("fallback matches").await?;
                Ok(TeamList {
                    teams: teams_from_matches(&matches, competition, season),
                    source: TeamSource::MatchesFallback,
                })
            }
        }
    }

    // ── Stats ────────────────────────────────────────────────────────────────

    pub async fn stats(
        &self,
        team: &str,
        competition: Option<&str>,
        season: Option<&str>,
    ) -> DashboardResult<TeamStatsDocument> {
        if !validate_team_name(team) {
            return Err(DashboardError::validation("Select a team."));
        }

        let mut query = vec![("team", team.trim().to_string())];
        query.extend(filters(&[("competition", competition), ("season", season)]));

        tracing::info!("Fetching stats for {}", team.trim());
        let request = self.client.get(self.url("/stats")).query(&query);
        let raw: Value = self.send("fetch stats", request, self.stats_timeout).await?;
        Ok(TeamStatsDocument::from_value(raw))
    }

    // ── Standings ────────────────────────────────────────────────────────────

    pub async fn standings(
        &self,
        competition: &str,
        season: &str,
        date: &str,
    ) -> DashboardResult<Vec<StandingRow>> {
        let (competition, season, date) = (competition.trim(), season.trim(), date.trim());
        if competition.is_empty() || season.is_empty() || date.is_empty() {
            return Err(DashboardError::validation(
                "Select competition, season and date.",
            ));
        }
        if parse_standings_date(date).is_none() {
            return Err(DashboardError::validation(format!(
                "Invalid date '{}': expected YYYY-MM-DD",
                date
            )));
        }

        let request = self.client.get(self.url("/standings")).query(&[
            ("competition", competition),
            ("season", season),
            ("date", date),
        ]);
        let data: StandingsResponse = self
            .send("fetch standings", request, self.stats_timeout)
            .await?;
        Ok(data.standings)
    }

    // ── Matches & predictions ────────────────────────────────────────────────

    pub async fn upcoming_matches(&self) -> DashboardResult<Vec<UpcomingMatch>> {
        self.send_matches("fetch matches").await
    }

    pub async fn predict(
        &self,
        match_id: Option<i64>,
        model: &str,
    ) -> DashboardResult<PredictionResponse> {
        let Some(match_id) = match_id.filter(|id| *id > 0) else {
            return Err(DashboardError::validation(
                "Select competition, season, match and model.",
            ));
        };
        let model = PredictionModel::from_ui(model)?;

        let body = PredictRequest {
            match_id,
            model: model.backend_id().to_string(),
        };
        tracing::info!("Requesting prediction for match {} ({})", match_id, body.model);

        let request = self.client.post(self.url("/predict")).json(&body);
        let raw: Value = self.send("predict", request, self.stats_timeout).await?;
        Ok(PredictionResponse::from_value(raw))
    }

    // ── Internal helpers ─────────────────────────────────────────────────────

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send_matches(&self, label: &str) -> DashboardResult<Vec<UpcomingMatch>> {
        let request = self.client.get(self.url("/matches"));
        let data: MatchesResponse = self.send(label, request, self.stats_timeout).await?;
        Ok(data.matches)
    }

    /// Sends the request and decodes a JSON body. Non-2xx answers carry the
    /// backend's own error message when the body has one.
    async fn send<T: DeserializeOwned>(
        &self,
        label: &str,
        request: RequestBuilder,
        timeout: Duration,
    ) -> DashboardResult<T> {
        let response = request
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| transport_error(label, e))?;

        let status = response.status();
        let url = response.url().to_string();
        let body = response
            .text()
            .await
            .map_err(|e| transport_error(label, e))?;

        if !status.is_success() {
            let parsed: Option<Value> = serde_json::from_str(&body).ok();
            let message = error_message(parsed.as_ref(), label, status.as_u16());
            tracing::error!("[{}] HTTP {} {} {}", label, status, url, body);
            return Err(DashboardError::Transport {
                label: label.to_string(),
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&body).map_err(|source| {
            tracing::error!("[{}] undecodable body from {}: {}", label, url, source);
            DashboardError::Decode {
                label: label.to_string(),
                source,
            }
        })
    }
}

fn transport_error(label: &str, e: reqwest::Error) -> DashboardError {
    if e.is_timeout() {
        tracing::error!("[{}] timeout", label);
        DashboardError::Timeout {
            label: label.to_string(),
        }
    } else {
        tracing::error!("[{}] {}", label, e);
        DashboardError::Network {
            label: label.to_string(),
            source: e,
        }
    }
}

/// Best-effort message from an error body: `error`, then `message`, then a
/// generic `"<label> failed (<status>)"`.
pub fn error_message(body: Option<&Value>, label: &str, status: u16) -> String {
    body.and_then(|data| {
        ["error", "message"].iter().find_map(|key| {
            data.get(*key)
                .and_then(Value::as_str)
                .filter(|msg| !msg.trim().is_empty())
                .map(str::to_string)
        })
    })
    .unwrap_or_else(|| format!("{} failed ({})", label, status))
}

/// Query pairs for the filters that were actually set.
fn filters(pairs: &[(&'static str, Option<&str>)]) -> Vec<(&'static str, String)> {
    pairs
        .iter()
        .filter_map(|(key, value)| {
            value
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(|v| (*key, v.to_string()))
        })
        .collect()
}
