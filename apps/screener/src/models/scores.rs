//! Score types and the deterministic formulas behind them.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::role::{BehavioralWeights, RelevanceWeights, RoleContext};

/// Clamps into [0, 1]. NaN becomes 0.
pub fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// Clamps into [0, 100]. NaN becomes 0.
pub fn clamp_percent(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 100.0)
    }
}

/// Accepts numbers, numeric strings, or anything else (read as 0).
/// Model output is not trusted to honour the declared types.
pub fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(value_as_f64).unwrap_or(0.0))
}

/// Like `lenient_f64` but keeps "absent" distinguishable from zero.
pub fn lenient_opt_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(value_as_f64))
}

fn value_as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

// ─── Technical (execution fit) ───────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TechnicalJustifications {
    pub skill_relevance: String,
    pub depth_evidence: String,
    pub work_similarity: String,
    pub risk_penalty: String,
}

/// S (skill relevance), D (depth evidence), W (work similarity), R (risk).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TechnicalMetrics {
    pub s: f64,
    pub d: f64,
    pub w: f64,
    pub r: f64,
    pub justifications: TechnicalJustifications,
}

impl TechnicalMetrics {
    pub fn clamped(mut self) -> Self {
        self.s = clamp_unit(self.s);
        self.d = clamp_unit(self.d);
        self.w = clamp_unit(self.w);
        self.r = clamp_unit(self.r);
        self
    }
}

/// `100 × (0.35·S + 0.30·D + 0.25·W − 0.10·R)`, clamped to [0, 100].
/// The positive weights sum to 0.9, so a perfect candidate scores 90.
pub fn execution_fit(metrics: &TechnicalMetrics) -> f64 {
    clamp_percent(35.0 * metrics.s + 30.0 * metrics.d + 25.0 * metrics.w - 10.0 * metrics.r)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionFitScore {
    pub score: f64,
    pub metrics: TechnicalMetrics,
    pub explanation: String,
}

// ─── Behavioral (founder confidence) ─────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FounderJustifications {
    pub ownership: String,
    pub longevity: String,
    pub pressure_handling: String,
    pub growth_trajectory: String,
}

/// O (ownership), L (longevity), P (pressure handling), G (growth).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FounderMetrics {
    pub o: f64,
    pub l: f64,
    pub p: f64,
    pub g: f64,
    pub justifications: FounderJustifications,
}

impl FounderMetrics {
    pub fn clamped(mut self) -> Self {
        self.o = clamp_unit(self.o);
        self.l = clamp_unit(self.l);
        self.p = clamp_unit(self.p);
        self.g = clamp_unit(self.g);
        self
    }

    /// The metric value for a dimension named by `BehavioralWeights::dominant_dimension`.
    pub fn value_of(&self, dimension: &str) -> f64 {
        match dimension {
            "ownership" => self.o,
            "longevity" => self.l,
            "pressure handling" => self.p,
            _ => self.g,
        }
    }
}

/// `100 × (wO·O + wL·L + wP·P + wG·G)` with the role's weights, clamped.
pub fn founder_confidence(metrics: &FounderMetrics, weights: &BehavioralWeights) -> f64 {
    let weighted = weights.w_o * metrics.o
        + weights.w_l * metrics.l
        + weights.w_p * metrics.p
        + weights.w_g * metrics.g;
    clamp_percent(100.0 * weighted)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FounderConfidenceScore {
    pub score: f64,
    pub metrics: FounderMetrics,
    pub weights: BehavioralWeights,
    pub role_context: RoleContext,
    pub explanation: String,
}

// ─── Relevance ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelevanceScore {
    pub score: f64,
    pub execution_fit: f64,
    pub founder_confidence: f64,
    pub criticality_factor: f64,
    pub alpha: f64,
    pub beta: f64,
    pub threshold: f64,
    pub passed_threshold: bool,
    pub explanation: String,
}

/// `(α·ExecutionFit + β·FounderConfidence) × criticality`, clamped to [0, 100].
pub fn relevance(
    execution_fit: f64,
    founder_confidence: f64,
    weights: &RelevanceWeights,
    criticality: f64,
) -> f64 {
    clamp_percent((weights.alpha * execution_fit + weights.beta * founder_confidence) * criticality)
}
