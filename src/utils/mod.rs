use std::collections::BTreeSet;

use chrono::NaiveDate;

use crate::models::UpcomingMatch;

/// Minimum Jaro-Winkler similarity for a loosely typed team name to match.
pub const TEAM_MATCH_THRESHOLD: f64 = 0.85;

const BAR_WIDTH: usize = 20;

/// Fraction clamped to [0, 1]; non-finite values become 0.
pub fn clamp_fraction(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// [`clamp_fraction`], warning when the value had to be changed.
///
/// The resolvers pass backend rates through untouched; display is the only
/// place where out-of-range values are clamped. Only the percentage text
/// warns, so a value shown as text and bar is reported once.
pub fn display_fraction(value: f64) -> f64 {
    let shown = clamp_fraction(value);
    if shown != value {
        tracing::warn!("Out-of-range rate {} displayed as {}", value, shown);
    }
    shown
}

/// Format a 0..1 fraction as a percentage with one decimal (e.g. "54.5%")
pub fn pct(value: f64) -> String {
    format!("{:.1}%", display_fraction(value) * 100.0)
}

/// Format a number with a fixed number of decimals
pub fn fixed(value: f64, digits: usize) -> String {
    let value = if value.is_finite() { value } else { 0.0 };
    format!("{:.*}", digits, value)
}

/// Horizontal bar for terminal output, proportional to a 0..1 fraction
pub fn bar(value: f64) -> String {
    let filled = (clamp_fraction(value) * BAR_WIDTH as f64).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}

/// Validate team name format
pub fn validate_team_name(name: &str) -> bool {
    !name.trim().is_empty() && name.len() <= 100
}

/// Parse the standings cut-off date (YYYY-MM-DD)
pub fn parse_standings_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}

/// Unique, non-empty values in ascending order
pub fn uniq_sorted<I, S>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    values
        .into_iter()
        .map(|v| v.as_ref().trim().to_string())
        .filter(|v| !v.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Upcoming matches restricted to an optional competition and season.
/// Empty filters match everything; seasons are compared as text.
pub fn filter_matches<'a>(
    matches: &'a [UpcomingMatch],
    competition: Option<&str>,
    season: Option<&str>,
) -> Vec<&'a UpcomingMatch> {
    let competition = competition.map(str::trim).filter(|c| !c.is_empty());
    let season = season.map(str::trim).filter(|s| !s.is_empty());

    matches
        .iter()
        .filter(|m| competition.map_or(true, |c| m.competition == c))
        .filter(|m| season.map_or(true, |s| m.season == s))
        .collect()
}

/// Team names playing in the filtered upcoming matches, sorted
pub fn teams_from_matches(
    matches: &[UpcomingMatch],
    competition: Option<&str>,
    season: Option<&str>,
) -> Vec<String> {
    uniq_sorted(
        filter_matches(matches, competition, season)
            .into_iter()
            .flat_map(|m| [m.home_team.as_str(), m.away_team.as_str()]),
    )
}

/// Competition and season choices offered by the prediction filters
pub fn filter_options(matches: &[UpcomingMatch]) -> (Vec<String>, Vec<String>) {
    (
        uniq_sorted(matches.iter().map(|m| m.competition.as_str())),
        uniq_sorted(matches.iter().map(|m| m.season.as_str())),
    )
}

/// "2025-01-12 — Roma vs Milan (SA, 2024)"
pub fn match_label(m: &UpcomingMatch) -> String {
    format!(
        "{} — {} vs {} ({}, {})",
        m.date, m.home_team, m.away_team, m.competition, m.season
    )
}

/// Resolve a loosely typed team name against the known teams.
///
/// An exact case-insensitive match wins; otherwise the most similar name
/// above [`TEAM_MATCH_THRESHOLD`] is returned.
pub fn best_team_match<'a>(query: &str, teams: &'a [String]) -> Option<&'a str> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return None;
    }

    if let Some(exact) = teams.iter().find(|t| t.to_lowercase() == needle) {
        return Some(exact.as_str());
    }

    teams
        .iter()
        .map(|t| (t, strsim::jaro_winkler(&needle, &t.to_lowercase())))
        .filter(|(_, score)| *score >= TEAM_MATCH_THRESHOLD)
        .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(t, _)| t.as_str())
}
