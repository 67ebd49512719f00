use std::collections::HashMap;

use crate::models::stats::{BucketBlock, FormWindowBlock, OverUnderBlock, VenueBlock};
use crate::models::view::EMPTY_RECORD;
use crate::models::{
    BandView, FailedToScoreView, FilterEcho, FormView, FormWindowView, GoalLineView, GoalsView,
    GroupRecordView, OverUnderView, RankGroupsView, RecordView, StatsViewModel, TeamStatsDocument,
    ViewScope,
};

/// Additional over/under lines shown next to the 2.5 line, in display order.
pub const EXTRA_LINE_KEYS: [&str; 4] = ["0_5", "1_5", "3_5", "4_5"];

pub const DEFAULT_TOP_N: i64 = 6;
pub const DEFAULT_BOTTOM_N: i64 = 5;

/// Turns a raw statistics document into a fully defaulted view model.
///
/// Stateless: every call reads only its arguments, so the same document can
/// be re-resolved for another scope at any time.
pub struct StatsViewResolver;

impl StatsViewResolver {
    /// Total function: missing or malformed fields resolve to zero values,
    /// never to an error. Rates are passed through unclamped.
    pub fn resolve(doc: &TeamStatsDocument, scope: ViewScope) -> StatsViewModel {
        StatsViewModel {
            team: doc.team.clone().unwrap_or_default(),
            competition: FilterEcho::from_raw(doc.competition.as_deref()),
            season: FilterEcho::from_raw(doc.season.as_deref()),
            scope,
            record: resolve_record(doc, scope),
            goals: resolve_goals(doc, scope),
            failed_to_score: resolve_failed_to_score(doc, scope),
            over_under: resolve_over_under(doc, scope),
            form: resolve_form(doc, scope),
            rank_groups: resolve_rank_groups(doc, scope),
        }
    }

    /// One view per scope, in `overall, home, away` order.
    pub fn resolve_all(doc: &TeamStatsDocument) -> Vec<StatsViewModel> {
        ViewScope::ALL
            .iter()
            .map(|scope| Self::resolve(doc, *scope))
            .collect()
    }
}

fn venue(doc: &TeamStatsDocument, scope: ViewScope) -> Option<&VenueBlock> {
    match scope {
        ViewScope::Overall => None,
        ViewScope::Home => doc.home.as_ref(),
        ViewScope::Away => doc.away.as_ref(),
    }
}

fn count(value: Option<i64>) -> i64 {
    value.unwrap_or(0)
}

fn finite(value: Option<f64>) -> f64 {
    value.filter(|v| v.is_finite()).unwrap_or(0.0)
}

/// W/D/L counts and rates. Scoped views fall back to the root values when
/// the venue block omits them; matches played does not.
pub fn resolve_record(doc: &TeamStatsDocument, scope: ViewScope) -> RecordView {
    let venue = venue(doc, scope);
    let matches_played = match scope {
        ViewScope::Overall => count(doc.matches_played),
        ViewScope::Home | ViewScope::Away => count(venue.and_then(|v| v.matches)),
    };

    RecordView {
        matches_played,
        wins: count(venue.and_then(|v| v.wins).or(doc.wins)),
        draws: count(venue.and_then(|v| v.draws).or(doc.draws)),
        losses: count(venue.and_then(|v| v.losses).or(doc.losses)),
        win_rate: finite(venue.and_then(|v| v.win_rate).or(doc.win_rate)),
        draw_rate: finite(venue.and_then(|v| v.draw_rate).or(doc.draw_rate)),
        loss_rate: finite(venue.and_then(|v| v.loss_rate).or(doc.loss_rate)),
    }
}

/// Goal aggregates. Average total goals is scope-specific and never derived.
pub fn resolve_goals(doc: &TeamStatsDocument, scope: ViewScope) -> GoalsView {
    let (scored, conceded, goal_difference, avg_scored, avg_conceded, avg_total_goals) =
        match venue(doc, scope) {
            None if scope == ViewScope::Overall => {
                let goals = doc.goals.as_ref();
                (
                    doc.goals_scored.or(goals.and_then(|g| g.scored)),
                    doc.goals_conceded.or(goals.and_then(|g| g.conceded)),
                    goals.and_then(|g| g.goal_difference),
                    goals.and_then(|g| g.avg_scored),
                    goals.and_then(|g| g.avg_conceded),
                    goals.and_then(|g| g.avg_total_goals),
                )
            }
            None => (None, None, None, None, None, None),
            Some(v) => (
                v.goals_scored,
                v.goals_conceded,
                v.goal_difference,
                v.avg_scored,
                v.avg_conceded,
                v.avg_total_goals,
            ),
        };

    let scored = count(scored);
    let conceded = count(conceded);
    GoalsView {
        scored,
        conceded,
        goal_difference: goal_difference.unwrap_or(scored.saturating_sub(conceded)),
        avg_scored: finite(avg_scored),
        avg_conceded: finite(avg_conceded),
        avg_total_goals: finite(avg_total_goals),
    }
}

pub fn resolve_failed_to_score(doc: &TeamStatsDocument, scope: ViewScope) -> FailedToScoreView {
    let block = match scope {
        ViewScope::Overall => doc.failed_to_score.as_ref(),
        ViewScope::Home | ViewScope::Away => {
            venue(doc, scope).and_then(|v| v.failed_to_score.as_ref())
        }
    };

    FailedToScoreView {
        count: count(block.and_then(|b| b.count)),
        rate: finite(block.and_then(|b| b.rate)),
    }
}

/// Over/under and BTTS. A scope without its own block uses the top-level one.
pub fn resolve_over_under(doc: &TeamStatsDocument, scope: ViewScope) -> OverUnderView {
    let block = venue(doc, scope)
        .and_then(|v| v.over_under.as_ref())
        .or(doc.over_under.as_ref());

    OverUnderView {
        over_25: count(block.and_then(|b| b.over_25)),
        under_25: count(block.and_then(|b| b.under_25)),
        over_25_rate: finite(block.and_then(|b| b.over_25_rate)),
        under_25_rate: finite(block.and_then(|b| b.under_25_rate)),
        btts: count(block.and_then(|b| b.btts)),
        btts_rate: finite(block.and_then(|b| b.btts_rate)),
        extra_lines: block.map(resolve_extra_lines).unwrap_or_default(),
    }
}

/// Lines absent from the document are skipped, not rendered as zeros.
pub fn resolve_extra_lines(block: &OverUnderBlock) -> Vec<GoalLineView> {
    let Some(lines) = block.lines.as_ref() else {
        return Vec::new();
    };

    EXTRA_LINE_KEYS
        .iter()
        .filter_map(|key| {
            let line = lines.get(*key)?;
            Some(GoalLineView {
                key: key.to_string(),
                line: line
                    .line
                    .filter(|v| v.is_finite())
                    .unwrap_or_else(|| line_from_key(key)),
                over: count(line.over),
                under: count(line.under),
                over_rate: finite(line.over_rate),
                under_rate: finite(line.under_rate),
            })
        })
        .collect()
}

/// `"3_5"` -> 3.5
fn line_from_key(key: &str) -> f64 {
    key.replace('_', ".").parse().unwrap_or(0.0)
}

pub fn resolve_form(doc: &TeamStatsDocument, scope: ViewScope) -> FormView {
    let block = match scope {
        ViewScope::Overall => doc.form.as_ref(),
        ViewScope::Home | ViewScope::Away => venue(doc, scope).and_then(|v| v.form.as_ref()),
    };

    FormView {
        last_5: form_window(block.and_then(|f| f.last_5.as_ref())),
        last_10: form_window(block.and_then(|f| f.last_10.as_ref())),
    }
}

fn form_window(block: Option<&FormWindowBlock>) -> FormWindowView {
    FormWindowView {
        record: block
            .and_then(|w| w.record.clone())
            .filter(|r| !r.trim().is_empty())
            .unwrap_or_else(|| EMPTY_RECORD.to_string()),
        wins: count(block.and_then(|w| w.wins)),
        draws: count(block.and_then(|w| w.draws)),
        losses: count(block.and_then(|w| w.losses)),
        points: count(block.and_then(|w| w.points)),
        goals_scored: count(block.and_then(|w| w.goals_scored)),
        goals_conceded: count(block.and_then(|w| w.goals_conceded)),
    }
}

/// Opponent-strength breakdown. The top/mid/bottom split and the band map
/// follow the same scope as the rest of the view.
pub fn resolve_rank_groups(doc: &TeamStatsDocument, scope: ViewScope) -> RankGroupsView {
    let Some(vsg) = doc
        .vs_rank_groups
        .as_ref()
        .filter(|vsg| !vsg.is_insufficient())
    else {
        return no_rank_data();
    };

    let (top, mid, bottom) = match scope {
        ViewScope::Overall => (vsg.vs_top.as_ref(), vsg.vs_mid.as_ref(), vsg.vs_bottom.as_ref()),
        ViewScope::Home => vsg
            .home
            .as_ref()
            .map(|s| (s.vs_top.as_ref(), s.vs_mid.as_ref(), s.vs_bottom.as_ref()))
            .unwrap_or_default(),
        ViewScope::Away => vsg
            .away
            .as_ref()
            .map(|s| (s.vs_top.as_ref(), s.vs_mid.as_ref(), s.vs_bottom.as_ref()))
            .unwrap_or_default(),
    };

    let band_map = match scope {
        ViewScope::Overall => vsg.bands.as_ref(),
        ViewScope::Home => vsg.bands_home.as_ref(),
        ViewScope::Away => vsg.bands_away.as_ref(),
    };

    RankGroupsView {
        available: true,
        top_n: vsg.top_n.unwrap_or(DEFAULT_TOP_N),
        bottom_n: vsg.bottom_n.unwrap_or(DEFAULT_BOTTOM_N),
        total_teams: count(vsg.total_teams),
        bottom_threshold_rank: count(vsg.bottom_threshold_rank),
        vs_top: group_record(top),
        vs_mid: group_record(mid),
        vs_bottom: group_record(bottom),
        bands: vsg
            .rank_bands
            .iter()
            .flatten()
            .map(|name| band_view(name, band_map))
            .collect(),
    }
}

fn no_rank_data() -> RankGroupsView {
    RankGroupsView {
        available: false,
        top_n: DEFAULT_TOP_N,
        bottom_n: DEFAULT_BOTTOM_N,
        total_teams: 0,
        bottom_threshold_rank: 0,
        vs_top: GroupRecordView::zero(),
        vs_mid: GroupRecordView::zero(),
        vs_bottom: GroupRecordView::zero(),
        bands: Vec::new(),
    }
}

fn group_record(block: Option<&BucketBlock>) -> GroupRecordView {
    let Some(b) = block else {
        return GroupRecordView::zero();
    };

    let (wins, draws, losses) = (count(b.wins), count(b.draws), count(b.losses));
    GroupRecordView {
        matches: count(b.matches),
        wins,
        draws,
        losses,
        win_rate: finite(b.win_rate),
        record: format!("{}W-{}D-{}L", wins, draws, losses),
    }
}

/// A band named in `rank_bands` but missing from the map renders all-zero.
fn band_view(name: &str, band_map: Option<&HashMap<String, BucketBlock>>) -> BandView {
    let band = band_map.and_then(|m| m.get(name));
    BandView {
        name: name.to_string(),
        matches: count(band.and_then(|b| b.matches)),
        wins: count(band.and_then(|b| b.wins)),
        draws: count(band.and_then(|b| b.draws)),
        losses: count(band.and_then(|b| b.losses)),
        ppg: finite(band.and_then(|b| b.ppg)),
        goals_for: count(band.and_then(|b| b.goals_for)),
        goals_against: count(band.and_then(|b| b.goals_against)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn doc(value: Value) -> TeamStatsDocument {
        TeamStatsDocument::from_value(value)
    }

    fn full_document() -> TeamStatsDocument {
        doc(json!({
            "team": "Atalanta BC",
            "competition": "SA",
            "season": 2024,
            "matches_played": 20,
            "wins": 12, "draws": 5, "losses": 3,
            "win_rate": 0.6, "draw_rate": 0.25, "loss_rate": 0.15,
            "goals_scored": 41, "goals_conceded": 19,
            "goals": { "goal_difference": 22, "avg_scored": 2.05, "avg_conceded": 0.95, "avg_total_goals": 3.0 },
            "failed_to_score": { "count": 2, "rate": 0.1 },
            "over_under": {
                "over_25": 13, "under_25": 7, "over_25_rate": 0.65, "under_25_rate": 0.35,
                "btts": 11, "btts_rate": 0.55,
                "lines": {
                    "4_5": { "line": 4.5, "over": 3, "under": 17, "over_rate": 0.15, "under_rate": 0.85 },
                    "2_5": { "line": 2.5, "over": 13, "under": 7 },
                    "0_5": { "line": 0.5, "over": 19, "under": 1, "over_rate": 0.95, "under_rate": 0.05 }
                }
            },
            "form": {
                "last_5": { "record": "3W-1D-1L", "points": 10, "goals_scored": 9, "goals_conceded": 4 },
                "last_10": { "record": "6W-2D-2L", "points": 20, "goals_scored": 19, "goals_conceded": 9 }
            },
            "home": {
                "matches": 10, "wins": 8, "draws": 1, "losses": 1,
                "win_rate": 0.8, "draw_rate": 0.1, "loss_rate": 0.1,
                "goals_scored": 25, "goals_conceded": 7,
                "avg_scored": 2.5, "avg_conceded": 0.7, "avg_total_goals": 3.2,
                "failed_to_score": { "count": 0, "rate": 0.0 },
                "over_under": { "over_25": 8, "under_25": 2, "btts": 5, "lines": { "1_5": { "over": 9, "under": 1 } } },
                "form": { "last_5": { "record": "4W-1D-0L", "points": 13 } }
            },
            "away": {
                "matches": 10,
                "goals_scored": 16, "goals_conceded": 12
            },
            "vs_rank_groups": {
                "top_n": 6, "bottom_n": 5, "total_teams": 20, "bottom_threshold_rank": 16,
                "vs_top": { "matches": 5, "wins": 2, "draws": 1, "losses": 2, "win_rate": 0.4 },
                "vs_mid": { "matches": 10, "wins": 6, "draws": 3, "losses": 1, "win_rate": 0.6 },
                "vs_bottom": { "matches": 5, "wins": 4, "draws": 1, "losses": 0, "win_rate": 0.8 },
                "home": {
                    "vs_top": { "matches": 3, "wins": 2, "draws": 0, "losses": 1, "win_rate": 0.667 }
                },
                "rank_bands": ["1-5", "6-10", "11-15", "16-20"],
                "bands": {
                    "1-5": { "matches": 4, "wins": 1, "draws": 1, "losses": 2, "ppg": 1.0, "goals_for": 5, "goals_against": 7 },
                    "6-10": { "matches": 6, "wins": 4, "draws": 1, "losses": 1, "ppg": 2.17, "goals_for": 12, "goals_against": 6 }
                },
                "bands_home": {
                    "1-5": { "matches": 2, "wins": 1, "draws": 0, "losses": 1, "ppg": 1.5, "goals_for": 3, "goals_against": 3 }
                }
            }
        }))
    }

    /// Walks the serialized view model and fails on any null or non-finite leaf.
    fn assert_no_absent_leaves(value: &Value, path: &str) {
        match value {
            Value::Null => panic!("absent leaf at {}", path),
            Value::Number(n) => assert!(
                n.as_f64().is_some_and(f64::is_finite),
                "non-finite number at {}",
                path
            ),
            Value::Array(items) => {
                for (i, item) in items.iter().enumerate() {
                    assert_no_absent_leaves(item, &format!("{}[{}]", path, i));
                }
            }
            Value::Object(fields) => {
                for (key, field) in fields {
                    assert_no_absent_leaves(field, &format!("{}.{}", path, key));
                }
            }
            Value::Bool(_) | Value::String(_) => {}
        }
    }

    #[test]
    fn test_every_scope_is_fully_populated() {
        for source in [full_document(), TeamStatsDocument::default()] {
            for scope in ViewScope::ALL {
                let view = StatsViewResolver::resolve(&source, scope);
                let serialized = serde_json::to_value(&view).unwrap();
                assert_no_absent_leaves(&serialized, scope.as_str());
            }
        }
    }

    #[test]
    fn test_empty_document_overall() {
        let view = StatsViewResolver::resolve(&TeamStatsDocument::default(), ViewScope::Overall);

        assert_eq!(view.team, "");
        assert_eq!(view.competition, FilterEcho::All);
        assert_eq!(view.record.matches_played, 0);
        assert_eq!((view.record.wins, view.record.draws, view.record.losses), (0, 0, 0));
        assert_eq!(view.record.win_rate, 0.0);
        assert_eq!(view.goals.goal_difference, 0);
        assert_eq!(view.failed_to_score.count, 0);
        assert_eq!(view.over_under.over_25, 0);
        assert!(view.over_under.extra_lines.is_empty());
        assert_eq!(view.form.last_5.record, "0W-0D-0L");
        assert_eq!(view.form.last_10.record, "0W-0D-0L");
        assert!(!view.rank_groups.available);
        assert!(view.rank_groups.bands.is_empty());
    }

    #[test]
    fn test_resolve_is_idempotent_and_leaves_input_untouched() {
        let source = full_document();
        let before = source.clone();

        for scope in ViewScope::ALL {
            let first = StatsViewResolver::resolve(&source, scope);
            let second = StatsViewResolver::resolve(&source, scope);
            assert_eq!(first, second);
        }
        assert_eq!(source, before);
    }

    #[test]
    fn test_overall_reads_top_level_fields() {
        let view = StatsViewResolver::resolve(&full_document(), ViewScope::Overall);

        assert_eq!(view.team, "Atalanta BC");
        assert_eq!(view.competition, FilterEcho::Only("SA".into()));
        assert_eq!(view.season.display(), "2024");
        assert_eq!(view.record.matches_played, 20);
        assert_eq!(view.record.wins, 12);
        assert_eq!(view.goals.scored, 41);
        assert_eq!(view.goals.goal_difference, 22);
        assert_eq!(view.goals.avg_total_goals, 3.0);
        assert_eq!(view.failed_to_score.rate, 0.1);
        assert_eq!(view.form.last_10.points, 20);
    }

    #[test]
    fn test_home_scope_uses_venue_block() {
        let view = StatsViewResolver::resolve(&full_document(), ViewScope::Home);

        assert_eq!(view.record.matches_played, 10);
        assert_eq!(view.record.wins, 8);
        assert_eq!(view.record.win_rate, 0.8);
        assert_eq!(view.goals.scored, 25);
        assert_eq!(view.goals.goal_difference, 18);
        assert_eq!(view.goals.avg_total_goals, 3.2);
        assert_eq!(view.over_under.over_25, 8);
        assert_eq!(view.form.last_5.record, "4W-1D-0L");
        assert_eq!(view.form.last_10.record, "0W-0D-0L");
    }

    #[test]
    fn test_away_scope_falls_back_for_counts_only() {
        let view = StatsViewResolver::resolve(&full_document(), ViewScope::Away);

        // W/D/L missing from the away block: root values are used.
        assert_eq!(view.record.matches_played, 10);
        assert_eq!((view.record.wins, view.record.draws, view.record.losses), (12, 5, 3));
        assert_eq!(view.record.win_rate, 0.6);

        // Scope-specific numbers do not fall back.
        assert_eq!(view.goals.avg_scored, 0.0);
        assert_eq!(view.goals.avg_total_goals, 0.0);
        assert_eq!(view.failed_to_score.count, 0);
        assert_eq!(view.form.last_5.record, "0W-0D-0L");

        // No over/under block of its own: the top-level one is shown.
        assert_eq!(view.over_under.over_25, 13);
        assert_eq!(view.over_under.btts_rate, 0.55);
    }

    #[test]
    fn test_scope_without_venue_block() {
        let source = doc(json!({ "matches_played": 4, "wins": 3, "goals_scored": 9 }));
        let view = StatsViewResolver::resolve(&source, ViewScope::Home);

        assert_eq!(view.record.matches_played, 0);
        assert_eq!(view.record.wins, 3);
        assert_eq!(view.goals.scored, 0);
    }

    #[test]
    fn test_goal_difference_derived_when_missing() {
        let source = doc(json!({ "goals_scored": 30, "goals_conceded": 34, "goals": { "avg_scored": 1.5 } }));
        let view = StatsViewResolver::resolve(&source, ViewScope::Overall);

        assert_eq!(view.goals.goal_difference, -4);
        assert_eq!(view.goals.avg_scored, 1.5);
        assert_eq!(view.goals.avg_total_goals, 0.0);
    }

    #[test]
    fn test_extreme_goal_counts_saturate() {
        let source = doc(json!({ "goals_scored": i64::MAX, "goals_conceded": -1 }));
        let view = StatsViewResolver::resolve(&source, ViewScope::Overall);
        assert_eq!(view.goals.goal_difference, i64::MAX);

        let source = doc(json!({ "home": { "goals_scored": i64::MIN, "goals_conceded": 1 } }));
        let view = StatsViewResolver::resolve(&source, ViewScope::Home);
        assert_eq!(view.goals.goal_difference, i64::MIN);
    }

    #[test]
    fn test_extra_lines_follow_fixed_order_and_skip_missing() {
        let source = doc(json!({
            "over_under": {
                "lines": {
                    "4_5": { "line": 4.5, "over": 1, "under": 9 },
                    "0_5": { "line": 0.5, "over": 10, "under": 0 }
                }
            }
        }));
        let lines = StatsViewResolver::resolve(&source, ViewScope::Overall)
            .over_under
            .extra_lines;

        let keys: Vec<&str> = lines.iter().map(|l| l.key.as_str()).collect();
        assert_eq!(keys, vec!["0_5", "4_5"]);
        assert_eq!(lines[0].over, 10);
        assert_eq!(lines[1].line, 4.5);
    }

    #[test]
    fn test_base_line_is_not_an_extra_line() {
        let lines = StatsViewResolver::resolve(&full_document(), ViewScope::Overall)
            .over_under
            .extra_lines;

        let keys: Vec<&str> = lines.iter().map(|l| l.key.as_str()).collect();
        assert_eq!(keys, vec!["0_5", "4_5"]);
    }

    #[test]
    fn test_line_value_derived_from_key() {
        let view = StatsViewResolver::resolve(&full_document(), ViewScope::Home);
        let line = &view.over_under.extra_lines[0];

        assert_eq!(line.key, "1_5");
        assert_eq!(line.line, 1.5);
        assert_eq!(line.over_rate, 0.0);
    }

    #[test]
    fn test_note_gives_no_data_view() {
        let source = doc(json!({
            "vs_rank_groups": {
                "note": true,
                "top_n": 4,
                "bottom_n": 3,
                "total_teams": 20,
                "vs_top": { "matches": 5, "wins": 5 },
                "rank_bands": ["1-5"],
                "bands": { "1-5": { "matches": 5 } }
            }
        }));

        for scope in ViewScope::ALL {
            let groups = StatsViewResolver::resolve(&source, scope).rank_groups;
            assert!(!groups.available);
            assert_eq!(groups.top_n, 6);
            assert_eq!(groups.bottom_n, 5);
            assert_eq!(groups.total_teams, 0);
            assert_eq!(groups.vs_top, GroupRecordView::zero());
            assert_eq!(groups.vs_mid, GroupRecordView::zero());
            assert_eq!(groups.vs_bottom, GroupRecordView::zero());
            assert!(groups.bands.is_empty());
        }
    }

    #[test]
    fn test_rank_groups_overall() {
        let groups = StatsViewResolver::resolve(&full_document(), ViewScope::Overall).rank_groups;

        assert!(groups.available);
        assert_eq!(groups.bottom_threshold_rank, 16);
        assert_eq!(groups.vs_top.record, "2W-1D-2L");
        assert_eq!(groups.vs_bottom.win_rate, 0.8);

        let names: Vec<&str> = groups.bands.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["1-5", "6-10", "11-15", "16-20"]);
        assert_eq!(groups.bands[1].ppg, 2.17);
        // Named in rank_bands but missing from the map: zeroed, not omitted.
        assert_eq!(groups.bands[3].matches, 0);
        assert_eq!(groups.bands[3].ppg, 0.0);
    }

    #[test]
    fn test_rank_groups_track_view_scope() {
        let home = StatsViewResolver::resolve(&full_document(), ViewScope::Home).rank_groups;
        assert_eq!(home.vs_top.matches, 3);
        assert_eq!(home.vs_mid, GroupRecordView::zero());
        assert_eq!(home.bands.len(), 4);
        assert_eq!(home.bands[0].ppg, 1.5);
        assert_eq!(home.bands[1].matches, 0);

        // No `away` split and no `bands_away` map: zero records, bands still listed.
        let away = StatsViewResolver::resolve(&full_document(), ViewScope::Away).rank_groups;
        assert!(away.available);
        assert_eq!(away.vs_top, GroupRecordView::zero());
        assert_eq!(away.bands.len(), 4);
        assert!(away.bands.iter().all(|b| b.matches == 0));
    }

    #[test]
    fn test_out_of_range_rates_are_not_clamped() {
        let source = doc(json!({ "win_rate": 1.4, "loss_rate": -0.2 }));
        let view = StatsViewResolver::resolve(&source, ViewScope::Overall);

        assert_eq!(view.record.win_rate, 1.4);
        assert_eq!(view.record.loss_rate, -0.2);
    }

    #[test]
    fn test_non_finite_rates_resolve_to_zero() {
        let source = TeamStatsDocument {
            win_rate: Some(f64::NAN),
            draw_rate: Some(f64::INFINITY),
            ..Default::default()
        };
        let view = StatsViewResolver::resolve(&source, ViewScope::Overall);

        assert_eq!(view.record.win_rate, 0.0);
        assert_eq!(view.record.draw_rate, 0.0);
    }

    #[test]
    fn test_empty_form_record_string_defaults() {
        let source = doc(json!({ "form": { "last_5": { "record": "", "points": 7 } } }));
        let form = StatsViewResolver::resolve(&source, ViewScope::Overall).form;

        assert_eq!(form.last_5.record, "0W-0D-0L");
        assert_eq!(form.last_5.points, 7);
    }

    #[test]
    fn test_form_window_counts() {
        let source = doc(json!({
            "home": { "form": { "last_5": { "record": "3W-1D-1L", "wins": 3, "draws": 1, "losses": "1" } } }
        }));
        let form = StatsViewResolver::resolve(&source, ViewScope::Home).form;

        assert_eq!((form.last_5.wins, form.last_5.draws, form.last_5.losses), (3, 1, 1));
        assert_eq!((form.last_10.wins, form.last_10.draws, form.last_10.losses), (0, 0, 0));
    }

    #[test]
    fn test_resolve_all_order() {
        let views = StatsViewResolver::resolve_all(&full_document());
        let scopes: Vec<ViewScope> = views.iter().map(|v| v.scope).collect();
        assert_eq!(scopes, ViewScope::ALL.to_vec());
    }
}
