use crate::models::prediction::DebugBlock;
use crate::models::{Explanation, PredictionResponse, PredictionView, Probabilities};

/// Scoring components in display order, with their labels.
pub const COMPONENTS: [(&str, &str); 8] = [
    ("rank_score", "Rank score"),
    ("home_perf_score", "Home perf"),
    ("away_perf_score_subtracted", "Away perf (sub)"),
    ("vs_score", "Vs fascia"),
    ("goals_score", "Goal score"),
    ("form_score", "Forma (last5)"),
    ("home_score_total", "Totale"),
    ("draw_score", "Draw score"),
];

pub const COMPONENTS_LABEL: &str = "Componenti (punti): ";
pub const COMPONENTS_SEPARATOR: &str = " | ";

/// Explains a model prediction from its `debug` block.
pub struct PredictionExplainer;

impl PredictionExplainer {
    /// Probabilities are surfaced as the model produced them, even when they
    /// do not sum to one.
    pub fn explain(resp: &PredictionResponse) -> (Probabilities, Explanation) {
        let probs = resp.probabilities.as_ref();
        let pick = |v: Option<f64>| v.filter(|p| p.is_finite()).unwrap_or(0.0);

        let probabilities = Probabilities {
            home_win: pick(probs.and_then(|p| p.home_win)),
            draw: pick(probs.and_then(|p| p.draw)),
            away_win: pick(probs.and_then(|p| p.away_win)),
        };

        let lines = match resp.debug.as_ref() {
            Some(debug) => explanation_lines(debug),
            None => Vec::new(),
        };

        (probabilities, Explanation { lines })
    }

    /// Explanation plus the match metadata echoed by the backend.
    pub fn view(resp: &PredictionResponse) -> PredictionView {
        let (probabilities, explanation) = Self::explain(resp);
        PredictionView {
            match_id: resp.match_id.unwrap_or(0),
            home_team: resp.home_team.clone().unwrap_or_default(),
            away_team: resp.away_team.clone().unwrap_or_default(),
            model: resp.model.clone().unwrap_or_default(),
            probabilities,
            explanation: explanation.text(),
            explanation_lines: explanation.lines,
        }
    }
}

fn explanation_lines(debug: &DebugBlock) -> Vec<String> {
    let mut lines = Vec::new();

    if let Some(ranks) = debug.ranks.as_ref() {
        let home = ranks.home_rank_before.unwrap_or(0);
        let away = ranks.away_rank_before.unwrap_or(0);
        if home != 0 || away != 0 {
            lines.push(format!(
                "Rank pre-match: Home {} — Away {} (diff {})",
                home,
                away,
                ranks.rank_diff.unwrap_or(0)
            ));
        }
    }

    let components: Vec<String> = debug
        .components
        .as_ref()
        .map(|values| {
            COMPONENTS
                .iter()
                .filter_map(|(key, label)| {
                    let value = values.get(*key)?.as_f64().filter(|v| v.is_finite())?;
                    Some(format!("{}: {:.2}", label, value))
                })
                .collect()
        })
        .unwrap_or_default();

    if !components.is_empty() {
        lines.push(format!(
            "{}{}",
            COMPONENTS_LABEL,
            components.join(COMPONENTS_SEPARATOR)
        ));
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response(value: serde_json::Value) -> PredictionResponse {
        PredictionResponse::from_value(value)
    }

    #[test]
    fn test_partial_components() {
        let resp = response(json!({
            "probabilities": { "home_win": 0.5, "draw": 0.3, "away_win": 0.2 },
            "debug": { "components": { "rank_score": 1.23, "home_score_total": 4.5 } }
        }));
        let (probs, explanation) = PredictionExplainer::explain(&resp);

        assert_eq!(probs, Probabilities { home_win: 0.5, draw: 0.3, away_win: 0.2 });
        let text = explanation.text();
        assert!(text.contains("Rank score: 1.23"));
        assert!(text.contains("Totale: 4.50"));
        assert!(!text.contains("Home perf"));
        assert!(!text.contains("Draw score"));
        assert_eq!(text, "Componenti (punti): Rank score: 1.23 | Totale: 4.50");
    }

    #[test]
    fn test_empty_debug_gives_empty_explanation() {
        let resp = response(json!({
            "probabilities": { "home_win": 0.4, "draw": 0.3, "away_win": 0.3 },
            "debug": {}
        }));
        let (_, explanation) = PredictionExplainer::explain(&resp);

        assert!(explanation.is_empty());
        assert_eq!(explanation.text(), "");
    }

    #[test]
    fn test_missing_probabilities_default_to_zero_without_renormalizing() {
        let resp = response(json!({ "probabilities": { "home_win": 0.7, "draw": "oops" } }));
        let (probs, _) = PredictionExplainer::explain(&resp);

        assert_eq!(probs.home_win, 0.7);
        assert_eq!(probs.draw, 0.0);
        assert_eq!(probs.away_win, 0.0);

        let (empty, _) = PredictionExplainer::explain(&PredictionResponse::default());
        assert_eq!(empty, Probabilities::default());
    }

    #[test]
    fn test_rank_line_and_component_order() {
        let resp = response(json!({
            "debug": {
                "ranks": { "home_rank_before": 3, "away_rank_before": 11, "rank_diff": 8, "total_teams": 20 },
                "components": {
                    "draw_score": 1.9,
                    "home_score_total": 2.0,
                    "form_score": 0.32,
                    "goals_score": -0.4,
                    "vs_score": "not a number",
                    "away_perf_score_subtracted": -0.75,
                    "home_perf_score": 1.1,
                    "rank_score": 4.0
                }
            }
        }));
        let (_, explanation) = PredictionExplainer::explain(&resp);

        assert_eq!(explanation.lines.len(), 2);
        assert_eq!(explanation.lines[0], "Rank pre-match: Home 3 — Away 11 (diff 8)");
        assert_eq!(
            explanation.lines[1],
            "Componenti (punti): Rank score: 4.00 | Home perf: 1.10 | Away perf (sub): -0.75 | \
             Goal score: -0.40 | Forma (last5): 0.32 | Totale: 2.00 | Draw score: 1.90"
        );
    }

    #[test]
    fn test_zero_ranks_are_skipped() {
        let resp = response(json!({
            "debug": { "ranks": { "home_rank_before": 0, "away_rank_before": 0, "rank_diff": 0 } }
        }));
        let (_, explanation) = PredictionExplainer::explain(&resp);
        assert!(explanation.is_empty());
    }

    #[test]
    fn test_view_carries_match_metadata() {
        let resp = response(json!({
            "match_id": 77,
            "home_team": "Bologna",
            "away_team": "Torino",
            "model": "rules_v1",
            "probabilities": { "home_win": 0.45, "draw": 0.3, "away_win": 0.25 },
            "debug": { "components": { "draw_score": 2.0 } }
        }));
        let view = PredictionExplainer::view(&resp);

        assert_eq!(view.match_id, 77);
        assert_eq!(view.home_team, "Bologna");
        assert_eq!(view.explanation, "Componenti (punti): Draw score: 2.00");
        assert_eq!(view.explanation_lines.len(), 1);
    }
}
