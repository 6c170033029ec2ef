//! Candidate-facing feedback and the filter that keeps it score-free.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackStage {
    Resume,
    Assignment,
}

impl fmt::Display for FeedbackStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedbackStage::Resume => f.write_str("resume"),
            FeedbackStage::Assignment => f.write_str("assignment"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateFeedback {
    pub stage: FeedbackStage,
    pub strengths: Vec<String>,
    pub gaps: Vec<String>,
    pub recommendations: Vec<String>,
    pub growth_note: Option<String>,
}

/// Percentages, fractions, and wording that reveals scoring or rejection.
static BANNED_FEEDBACK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\d+\s*%|\d+\s*/\s*\d+|score|reject|fail|not selected|other candidates")
        .expect("valid banned-feedback regex")
});

/// True when `text` is safe to show a candidate.
pub fn is_candidate_safe(text: &str) -> bool {
    !BANNED_FEEDBACK.is_match(text)
}

/// Trims items and drops blank or unsafe ones.
pub fn clean_feedback_items(items: Vec<String>) -> Vec<String> {
    items
        .into_iter()
        .map(|item| item.trim().to_string())
        .filter(|item| !item.is_empty() && is_candidate_safe(item))
        .collect()
}

impl CandidateFeedback {
    /// Builds feedback from raw model lists, filtering every field.
    pub fn sanitized(
        stage: FeedbackStage,
        strengths: Vec<String>,
        gaps: Vec<String>,
        recommendations: Vec<String>,
        growth_note: Option<String>,
    ) -> Self {
        Self {
            stage,
            strengths: clean_feedback_items(strengths),
            gaps: clean_feedback_items(gaps),
            recommendations: clean_feedback_items(recommendations),
            growth_note: growth_note
                .map(|note| note.trim().to_string())
                .filter(|note| !note.is_empty() && is_candidate_safe(note)),
        }
    }

    /// Plain-text rendering shared by the verdict table and candidate emails.
    pub fn format_plain(&self) -> String {
        let mut parts = Vec::new();
        for (heading, items) in [
            ("STRENGTHS", &self.strengths),
            ("GAPS", &self.gaps),
            ("RECOMMENDATIONS", &self.recommendations),
        ] {
            if !items.is_empty() {
                let bullets: Vec<String> = items.iter().map(|i| format!("• {i}")).collect();
                parts.push(format!("{heading}:\n{}", bullets.join("\n")));
            }
        }
        if let Some(note) = &self.growth_note {
            parts.push(format!("GROWTH NOTE: {note}"));
        }
        parts.join("\n\n")
    }
}
