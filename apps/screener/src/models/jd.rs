use serde::{Deserialize, Serialize};

use super::assignment::Assignment;
use super::role::RoleContext;

pub const CRITICALITY_MIN: f64 = 0.6;
pub const CRITICALITY_MAX: f64 = 1.0;
/// Used when the model omits the factor or returns something non-numeric.
pub const CRITICALITY_DEFAULT: f64 = 0.8;

/// Ownership and pressure expectations share one four-step scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum IntensityLevel {
    Low,
    #[default]
    Medium,
    High,
    #[serde(rename = "Very High")]
    VeryHigh,
}

impl IntensityLevel {
    pub fn label(self) -> &'static str {
        match self {
            IntensityLevel::Low => "Low",
            IntensityLevel::Medium => "Medium",
            IntensityLevel::High => "High",
            IntensityLevel::VeryHigh => "Very High",
        }
    }

    pub fn from_label(label: &str) -> Self {
        match normalize(label).as_str() {
            "low" => IntensityLevel::Low,
            "high" => IntensityLevel::High,
            "veryhigh" => IntensityLevel::VeryHigh,
            _ => IntensityLevel::Medium,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AmbiguityLevel {
    Low,
    #[default]
    Medium,
    High,
}

impl AmbiguityLevel {
    pub fn label(self) -> &'static str {
        match self {
            AmbiguityLevel::Low => "Low",
            AmbiguityLevel::Medium => "Medium",
            AmbiguityLevel::High => "High",
        }
    }

    pub fn from_label(label: &str) -> Self {
        match normalize(label).as_str() {
            "low" => AmbiguityLevel::Low,
            "high" => AmbiguityLevel::High,
            _ => AmbiguityLevel::Medium,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RoleDuration {
    #[serde(rename = "Short-term")]
    ShortTerm,
    #[default]
    #[serde(rename = "Medium-term")]
    MediumTerm,
    #[serde(rename = "Long-term")]
    LongTerm,
}

impl RoleDuration {
    pub fn label(self) -> &'static str {
        match self {
            RoleDuration::ShortTerm => "Short-term",
            RoleDuration::MediumTerm => "Medium-term",
            RoleDuration::LongTerm => "Long-term",
        }
    }

    pub fn from_label(label: &str) -> Self {
        match normalize(label).as_str() {
            "shortterm" | "short" => RoleDuration::ShortTerm,
            "longterm" | "long" => RoleDuration::LongTerm,
            _ => RoleDuration::MediumTerm,
        }
    }
}

/// Lowercases and drops spaces, hyphens and underscores so "Very High",
/// "very-high" and "VERY_HIGH" compare equal.
fn normalize(label: &str) -> String {
    label
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Clamps the model's criticality into [0.6, 1.0].
pub fn clamp_criticality(value: Option<f64>) -> f64 {
    match value {
        Some(v) if v.is_finite() => v.clamp(CRITICALITY_MIN, CRITICALITY_MAX),
        _ => CRITICALITY_DEFAULT,
    }
}

/// The structured reading of one job description. Built once per campaign
/// and JD content hash, then shared by every resume of the campaign.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JdSpec {
    pub core_work: String,
    pub non_negotiable_skills: Vec<String>,
    pub ownership_level: IntensityLevel,
    pub ambiguity_level: AmbiguityLevel,
    pub pressure_level: IntensityLevel,
    pub expected_role_duration: RoleDuration,
    pub role_context: RoleContext,
    pub criticality_factor: f64,
    pub standard_assignment: Option<Assignment>,
    pub raw_text: String,
    pub content_hash: String,
}
