use serde::{Deserialize, Serialize};

/// Heuristic structural scoring of free-text prompts.
///
/// Five signals, each detected by case-insensitive substring matching, each
/// worth a fixed number of points. The word lists are deliberately naive
/// (the context markers fire on any "for"); the table is data, so tightening
/// a signal is a table edit.
const PERSONA_MARKERS: &[&str] = &["act as", "you are", "assume the role", "as a"];
const TASK_VERBS: &[&str] = &["create", "write", "analyze", "develop", "explain", "generate"];
const CONTEXT_MARKERS: &[&str] = &["for", "targeting", "in the context", "considering", "given"];
const FORMAT_MARKERS: &[&str] =
    &["format", "structure", "in bullet", "as a list", "paragraph", "summary"];

/// Per-signal point values and length cutoffs. Injected at call time so
/// callers can rebalance without touching the detection table.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    pub persona: u32,
    pub task: u32,
    pub context: u32,
    pub format: u32,
    pub detail: u32,
    /// Minimum prompt length (chars) before the task signal can fire.
    pub task_min_chars: usize,
    /// Minimum prompt length (chars) for the detail signal.
    pub detail_min_chars: usize,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            persona: 20,
            task: 25,
            context: 20,
            format: 15,
            detail: 20,
            task_min_chars: 20,
            detail_min_chars: 100,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Excellent,
    Good,
    NeedsImprovement,
    Poor,
}

impl Category {
    pub fn from_score(score: u32) -> Self {
        match score {
            80.. => Category::Excellent,
            60..=79 => Category::Good,
            40..=59 => Category::NeedsImprovement,
            _ => Category::Poor,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::Excellent => "excellent",
            Category::Good => "good",
            Category::NeedsImprovement => "needs-improvement",
            Category::Poor => "poor",
        }
    }
}

/// Result of one scoring pass. Immutable; built fresh on every call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityScore {
    pub score: u32,
    pub category: Category,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub suggestions: Vec<String>,
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| haystack.contains(n))
}

/// Score a free-text prompt. Deterministic; no I/O.
pub fn score(prompt: &str, weights: &ScoreWeights) -> QualityScore {
    let lower = prompt.to_lowercase();
    let chars = prompt.chars().count();

    struct Row {
        hit: bool,
        points: u32,
        strength: &'static str,
        weakness: Option<&'static str>,
        suggestion: &'static str,
    }

    let rows = [
        Row {
            hit: contains_any(&lower, PERSONA_MARKERS),
            points: weights.persona,
            strength: "Clear persona/role specification",
            weakness: Some("Missing persona or role definition"),
            suggestion: "Add a persona like 'Act as a [expert type]'",
        },
        Row {
            hit: chars > weights.task_min_chars && contains_any(&lower, TASK_VERBS),
            points: weights.task,
            strength: "Specific task clearly defined",
            weakness: Some("Task is too vague"),
            suggestion: "Be more specific about what you want",
        },
        Row {
            hit: contains_any(&lower, CONTEXT_MARKERS),
            points: weights.context,
            strength: "Good contextual information",
            weakness: Some("Lacks sufficient context"),
            suggestion: "Provide background or target audience info",
        },
        Row {
            hit: contains_any(&lower, FORMAT_MARKERS),
            points: weights.format,
            strength: "Output format specified",
            weakness: None,
            suggestion: "Specify desired output format (bullets, paragraphs, etc.)",
        },
        Row {
            hit: chars > weights.detail_min_chars,
            points: weights.detail,
            strength: "Detailed and comprehensive",
            weakness: Some("Could be more detailed"),
            suggestion: "Add more specific requirements or constraints",
        },
    ];

    let mut total = 0u32;
    let mut strengths = Vec::new();
    let mut weaknesses = Vec::new();
    let mut suggestions = Vec::new();

    for row in rows {
        if row.hit {
            total += row.points;
            strengths.push(row.strength.to_string());
        } else {
            if let Some(w) = row.weakness {
                weaknesses.push(w.to_string());
            }
            suggestions.push(row.suggestion.to_string());
        }
    }

    let total = total.min(100);
    QualityScore {
        score: total,
        category: Category::from_score(total),
        strengths,
        weaknesses,
        suggestions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_prompt_scores_zero_with_every_finding() {
        let q = score("", &ScoreWeights::default());
        assert_eq!(q.score, 0);
        assert_eq!(q.category, Category::Poor);
        // Format contributes a suggestion but no weakness.
        assert_eq!(q.weaknesses.len(), 4);
        assert_eq!(q.suggestions.len(), 5);
        assert!(q.strengths.is_empty());
    }

    #[test]
    fn category_thresholds_are_exact() {
        assert_eq!(Category::from_score(80), Category::Excellent);
        assert_eq!(Category::from_score(79), Category::Good);
        assert_eq!(Category::from_score(60), Category::Good);
        assert_eq!(Category::from_score(59), Category::NeedsImprovement);
        assert_eq!(Category::from_score(40), Category::NeedsImprovement);
        assert_eq!(Category::from_score(39), Category::Poor);
    }

    #[test]
    fn more_signals_never_score_lower() {
        let rich = score(
            "Act as a teacher. Explain quantum computing for beginners in bullet points, \
             providing a thorough, detailed walkthrough exceeding 100 characters in total \
             length for the learner.",
            &ScoreWeights::default(),
        );
        let bare = score("Explain quantum computing", &ScoreWeights::default());
        assert!(rich.score >= bare.score);
        assert_eq!(rich.score, 100);
        assert_eq!(rich.category, Category::Excellent);
    }

    #[test]
    fn task_signal_needs_both_length_and_a_verb() {
        // Contains "write" but is too short to count as a clear task.
        let q = score("write it", &ScoreWeights::default());
        assert!(q.weaknesses.iter().any(|w| w == "Task is too vague"));
    }

    #[test]
    fn detection_is_case_insensitive() {
        let q = score("ACT AS A CRITIC and ANALYZE this draft FOR structure", &ScoreWeights::default());
        assert!(q.strengths.iter().any(|s| s == "Clear persona/role specification"));
        assert!(q.strengths.iter().any(|s| s == "Specific task clearly defined"));
        assert!(q.strengths.iter().any(|s| s == "Good contextual information"));
        assert!(q.strengths.iter().any(|s| s == "Output format specified"));
    }

    #[test]
    fn weights_are_injected_not_ambient() {
        let mut w = ScoreWeights::default();
        w.detail = 0;
        w.detail_min_chars = 0;
        let q = score("x", &w);
        // Detail fires (1 > 0) but contributes nothing.
        assert!(q.strengths.iter().any(|s| s == "Detailed and comprehensive"));
        assert_eq!(q.score, 0);
    }

    #[test]
    fn partial_weight_tables_fall_back_to_defaults() {
        let w: ScoreWeights = serde_json::from_str(r#"{"detail":30}"#).unwrap();
        assert_eq!(w.detail, 30);
        assert_eq!(w.persona, 20);
        assert_eq!(w.detail_min_chars, 100);
    }

    #[test]
    fn scoring_is_deterministic() {
        let w = ScoreWeights::default();
        let a = score("Write a summary for the board, given last quarter's numbers", &w);
        let b = score("Write a summary for the board, given last quarter's numbers", &w);
        assert_eq!(a, b);
    }
}
