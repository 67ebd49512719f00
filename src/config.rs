use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_STATS_API_URL: &str = "http://127.0.0.1:5000/api";
pub const DEFAULT_PORT: u16 = 3000;

/// Runtime settings, read once from the environment (after `.env` is loaded).
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the statistics/prediction service, without trailing slash.
    pub stats_api_url: String,
    pub request_timeout: Duration,
    /// Stats, standings and predictions are slower upstream queries.
    pub stats_timeout: Duration,
    pub port: u16,
    pub static_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            stats_api_url: DEFAULT_STATS_API_URL.to_string(),
            request_timeout: Duration::from_secs(20),
            stats_timeout: Duration::from_secs(25),
            port: DEFAULT_PORT,
            static_dir: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let stats_api_url = env::var("STATS_API_URL")
            .ok()
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or(defaults.stats_api_url);

        Self {
            stats_api_url,
            request_timeout: Duration::from_secs(parse_var(
                "REQUEST_TIMEOUT_SECS",
                defaults.request_timeout.as_secs(),
            )),
            stats_timeout: Duration::from_secs(parse_var(
                "STATS_TIMEOUT_SECS",
                defaults.stats_timeout.as_secs(),
            )),
            port: parse_var("DASHBOARD_PORT", defaults.port),
            static_dir: env::var("STATIC_DIR")
                .ok()
                .filter(|dir| !dir.trim().is_empty())
                .map(PathBuf::from),
        }
    }
}

fn parse_var<T: FromStr + Copy + std::fmt::Display>(name: &str, default: T) -> T {
    match env::var(name) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!("Ignoring invalid {}='{}', using {}", name, raw, default);
            default
        }),
        Err(_) => default,
    }
}
