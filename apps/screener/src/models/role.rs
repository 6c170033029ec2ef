//! Role context: the category a job description falls into, and the weight
//! tables it selects.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RoleContext {
    #[serde(rename = "Early_Startup_Execution")]
    EarlyStartupExecution,
    #[serde(rename = "High_Ownership_Critical")]
    HighOwnershipCritical,
    #[default]
    #[serde(rename = "Stable_Long_Term")]
    StableLongTerm,
    #[serde(rename = "High_Pressure_Delivery")]
    HighPressureDelivery,
    #[serde(rename = "Exploratory_RnD")]
    ExploratoryRnD,
}

/// Behavioral weights applied to O, L, P and G.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BehavioralWeights {
    pub w_o: f64,
    pub w_l: f64,
    pub w_p: f64,
    pub w_g: f64,
}

impl BehavioralWeights {
    /// The dimension with the largest weight, as a human label.
    pub fn dominant_dimension(&self) -> (&'static str, f64) {
        [
            ("ownership", self.w_o),
            ("longevity", self.w_l),
            ("pressure handling", self.w_p),
            ("growth trajectory", self.w_g),
        ]
        .into_iter()
        .fold(("ownership", f64::MIN), |best, next| {
            if next.1 > best.1 {
                next
            } else {
                best
            }
        })
    }
}

/// α (execution fit) and β (behavioral fit) for relevance synthesis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RelevanceWeights {
    pub alpha: f64,
    pub beta: f64,
}

impl RoleContext {
    pub const ALL: [RoleContext; 5] = [
        RoleContext::EarlyStartupExecution,
        RoleContext::HighOwnershipCritical,
        RoleContext::StableLongTerm,
        RoleContext::HighPressureDelivery,
        RoleContext::ExploratoryRnD,
    ];

    pub fn label(self) -> &'static str {
        match self {
            RoleContext::EarlyStartupExecution => "Early_Startup_Execution",
            RoleContext::HighOwnershipCritical => "High_Ownership_Critical",
            RoleContext::StableLongTerm => "Stable_Long_Term",
            RoleContext::HighPressureDelivery => "High_Pressure_Delivery",
            RoleContext::ExploratoryRnD => "Exploratory_RnD",
        }
    }

    /// Parses a model-produced label. Returns `None` for anything unrecognized;
    /// callers fall back to the default (`Stable_Long_Term`).
    pub fn from_label(label: &str) -> Option<RoleContext> {
        let wanted = label.trim();
        Self::ALL
            .into_iter()
            .find(|ctx| ctx.label().eq_ignore_ascii_case(wanted))
    }

    pub fn behavioral_weights(self) -> BehavioralWeights {
        let (w_o, w_l, w_p, w_g) = match self {
            RoleContext::EarlyStartupExecution => (0.35, 0.15, 0.30, 0.20),
            RoleContext::HighOwnershipCritical => (0.40, 0.20, 0.25, 0.15),
            RoleContext::StableLongTerm => (0.20, 0.40, 0.15, 0.25),
            RoleContext::HighPressureDelivery => (0.20, 0.15, 0.45, 0.20),
            RoleContext::ExploratoryRnD => (0.25, 0.15, 0.20, 0.40),
        };
        BehavioralWeights { w_o, w_l, w_p, w_g }
    }

    pub fn relevance_weights(self) -> RelevanceWeights {
        let (alpha, beta) = match self {
            RoleContext::EarlyStartupExecution => (0.55, 0.45),
            RoleContext::HighOwnershipCritical => (0.45, 0.55),
            RoleContext::StableLongTerm => (0.60, 0.40),
            RoleContext::HighPressureDelivery => (0.50, 0.50),
            RoleContext::ExploratoryRnD => (0.40, 0.60),
        };
        RelevanceWeights { alpha, beta }
    }
}

impl fmt::Display for RoleContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
