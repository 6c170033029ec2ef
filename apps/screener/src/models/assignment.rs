use serde::{Deserialize, Serialize};

pub const DEFAULT_ASSIGNMENT_TITLE: &str = "Technical Assessment";
pub const MIN_TIMEBOX_HOURS: u32 = 2;
pub const MAX_TIMEBOX_HOURS: u32 = 6;
pub const DEFAULT_TIMEBOX_HOURS: u32 = 4;

/// A take-home exercise. One is generated per job description and handed to
/// every candidate of the campaign.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    pub title: String,
    pub objective: String,
    pub context: String,
    pub requirements: Vec<String>,
    pub evaluation_criteria: Vec<String>,
    pub optional_parts: Vec<String>,
    pub timebox_hours: u32,
    pub deliverables: Vec<String>,
}

/// Rounds and clamps a model-provided timebox; absent or non-finite values
/// fall back to the default.
pub fn clamp_timebox(hours: Option<f64>) -> u32 {
    match hours {
        Some(h) if h.is_finite() && h > 0.0 => {
            (h.round() as u32).clamp(MIN_TIMEBOX_HOURS, MAX_TIMEBOX_HOURS)
        }
        _ => DEFAULT_TIMEBOX_HOURS,
    }
}
