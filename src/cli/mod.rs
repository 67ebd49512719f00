use std::path::Path;

use anyhow::Result;

use crate::config::Config;
use crate::models::{PredictionView, StatsViewModel, TeamSource, ViewScope};
use crate::services::{DashboardSession, PredictionExplainer, StatsClient};
use crate::utils::{bar, best_team_match, filter_matches, filter_options, fixed, match_label, pct};

pub async fn list_teams(config: &Config, competition: Option<&str>, season: Option<&str>) -> Result<()> {
    let client = StatsClient::new(config);

    println!("👥 Loading teams...");
    let list = client.teams_with_fallback(competition, season).await?;

    if list.source == TeamSource::MatchesFallback {
        println!("⚠️  /teams unavailable, list derived from upcoming matches");
    }
    if list.teams.is_empty() {
        println!("📭 No teams found for these filters");
        return Ok(());
    }

    for team in &list.teams {
        println!("  • {}", team);
    }
    println!("✅ {} teams", list.teams.len());
    Ok(())
}

/// Shows a team's stats. `scopes` holds the views to print, in order.
pub async fn show_stats(
    config: &Config,
    team: &str,
    competition: Option<&str>,
    season: Option<&str>,
    scopes: &[ViewScope],
    json: bool,
) -> Result<()> {
    let client = StatsClient::new(config);
    let typed = team.trim();
    let team = resolve_team_name(&client, typed, competition, season).await;

    if !json {
        if team != typed {
            println!("🔎 Using '{}' for '{}'", team, typed);
        }
        println!("📊 Fetching stats for {}...", team);
    }
    let document = client.stats(&team, competition, season).await?;

    let mut session = DashboardSession::new();
    session.apply_stats(document);

    let mut views = Vec::with_capacity(scopes.len());
    for scope in scopes {
        if let Some(view) = session.set_scope(*scope) {
            views.push(view.clone());
        }
    }

    if json {
        let output = match views.as_slice() {
            [single] => serde_json::to_string_pretty(single)?,
            all => serde_json::to_string_pretty(all)?,
        };
        println!("{}", output);
        return Ok(());
    }

    for view in &views {
        print_stats(view);
    }
    Ok(())
}

/// Falls back to the name as typed when the team list is unavailable or
/// nothing is close enough.
async fn resolve_team_name(
    client: &StatsClient,
    team: &str,
    competition: Option<&str>,
    season: Option<&str>,
) -> String {
    let teams = match client.teams_with_fallback(competition, season).await {
        Ok(list) => list.teams,
        Err(e) => {
            tracing::debug!("No team list for name lookup: {}", e);
            return team.to_string();
        }
    };

    best_team_match(team, &teams).unwrap_or(team).to_string()
}

fn print_stats(view: &StatsViewModel) {
    println!(
        "\n🏟️  {} | {} {} | view: {}",
        view.team,
        view.competition.display(),
        view.season.display(),
        view.scope
    );

    let r = &view.record;
    println!(
        "   Played {} | W {} ({}) D {} ({}) L {} ({})",
        r.matches_played,
        r.wins,
        pct(r.win_rate),
        r.draws,
        pct(r.draw_rate),
        r.losses,
        pct(r.loss_rate)
    );

    let g = &view.goals;
    println!(
        "⚽ Goals {}-{} (diff {}) | avg for {} against {} total {}",
        g.scored,
        g.conceded,
        g.goal_difference,
        fixed(g.avg_scored, 2),
        fixed(g.avg_conceded, 2),
        fixed(g.avg_total_goals, 2)
    );
    println!(
        "   Failed to score: {} ({})",
        view.failed_to_score.count,
        pct(view.failed_to_score.rate)
    );

    let ou = &view.over_under;
    println!(
        "📈 Over 2.5: {} ({}) | Under 2.5: {} ({}) | BTTS: {} ({})",
        ou.over_25,
        pct(ou.over_25_rate),
        ou.under_25,
        pct(ou.under_25_rate),
        ou.btts,
        pct(ou.btts_rate)
    );
    for line in &ou.extra_lines {
        println!(
            "   {:>4}: over {} ({}) | under {} ({})",
            fixed(line.line, 1),
            line.over,
            pct(line.over_rate),
            line.under,
            pct(line.under_rate)
        );
    }

    for (label, window) in [("last 5", &view.form.last_5), ("last 10", &view.form.last_10)] {
        println!(
            "🔥 Form {}: {} | {} pts | goals {}-{}",
            label, window.record, window.points, window.goals_scored, window.goals_conceded
        );
    }

    let rg = &view.rank_groups;
    if !rg.available {
        println!("📭 Not enough data for results by opponent rank");
        return;
    }
    println!(
        "🎯 Vs top {}: {} ({}) | vs mid: {} ({}) | vs bottom {}: {} ({})",
        rg.top_n,
        rg.vs_top.record,
        pct(rg.vs_top.win_rate),
        rg.vs_mid.record,
        pct(rg.vs_mid.win_rate),
        rg.bottom_n,
        rg.vs_bottom.record,
        pct(rg.vs_bottom.win_rate)
    );
    for band in &rg.bands {
        println!(
            "   {:<8} {:>2} played | {}W-{}D-{}L | ppg {} | goals {}-{}",
            band.name,
            band.matches,
            band.wins,
            band.draws,
            band.losses,
            fixed(band.ppg, 2),
            band.goals_for,
            band.goals_against
        );
    }
}

pub async fn show_standings(
    config: &Config,
    competition: &str,
    season: &str,
    date: &str,
    csv_path: Option<&Path>,
) -> Result<()> {
    let client = StatsClient::new(config);

    println!("🏆 Standings {} {} at {}", competition, season, date);
    let rows = client.standings(competition, season, date).await?;

    if rows.is_empty() {
        println!("📭 No standings for this date");
        return Ok(());
    }

    println!(
        "  #  {:<24} {:>3} {:>3} {:>3} {:>3} {:>3} {:>3}:{:<3} {:>4}",
        "Team", "Pts", "P", "W", "D", "L", "GF", "GA", "GD"
    );
    for row in &rows {
        println!(
            "{:>3}  {:<24} {:>3} {:>3} {:>3} {:>3} {:>3} {:>3}:{:<3} {:>4}",
            row.rank, row.team, row.points, row.played, row.wins, row.draws, row.losses, row.gf, row.ga, row.gd
        );
    }

    if let Some(path) = csv_path {
        let mut writer = csv::Writer::from_path(path)?;
        for row in &rows {
            writer.serialize(row)?;
        }
        writer.flush()?;
        println!("💾 Wrote {} rows to {}", rows.len(), path.display());
    }

    Ok(())
}

pub async fn list_matches(config: &Config, competition: Option<&str>, season: Option<&str>) -> Result<()> {
    let client = StatsClient::new(config);

    println!("📅 Loading upcoming matches...");
    let matches = client.upcoming_matches().await?;
    let (competitions, seasons) = filter_options(&matches);
    println!("   Competitions: {}", competitions.join(", "));
    println!("   Seasons: {}", seasons.join(", "));

    let selected = filter_matches(&matches, competition, season);
    if selected.is_empty() {
        println!("📭 No upcoming matches for these filters");
        return Ok(());
    }

    for m in &selected {
        println!("  [{}] {}", m.id, match_label(m));
    }
    println!("✅ {} matches", selected.len());
    Ok(())
}

pub async fn predict(config: &Config, match_id: Option<i64>, model: &str) -> Result<()> {
    let client = StatsClient::new(config);

    println!("🔮 Requesting prediction...");
    let response = client.predict(match_id, model).await?;
    print_prediction(&PredictionExplainer::view(&response));
    Ok(())
}

fn print_prediction(view: &PredictionView) {
    if !view.home_team.is_empty() || !view.away_team.is_empty() {
        println!("\n⚽ {} vs {} (match {}, {})", view.home_team, view.away_team, view.match_id, view.model);
    }

    let p = view.probabilities;
    for (label, value) in [("Home", p.home_win), ("Draw", p.draw), ("Away", p.away_win)] {
        println!("   {:<5} {} {:>6}", label, bar(value), pct(value));
    }

    println!("\n📝 Explanation:");
    if view.explanation_lines.is_empty() {
        println!("   —");
    }
    for line in &view.explanation_lines {
        println!("   {}", line);
    }
}
