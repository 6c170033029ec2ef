use crate::models::scores::relevance;
use crate::models::{
    ExecutionFitScore, FounderConfidenceScore, RelevanceScore, RelevanceWeights, RoleContext,
};

pub const DEFAULT_RELEVANCE_THRESHOLD: f64 = 60.0;

/// Combines execution fit and founder confidence into the final relevance score:
/// `(α·EF + β·FC) × C`, with α/β taken from the role context.
#[derive(Debug, Clone, Copy)]
pub struct RelevanceSynthesizer {
    threshold: f64,
}

impl Default for RelevanceSynthesizer {
    fn default() -> Self {
        Self::new(DEFAULT_RELEVANCE_THRESHOLD)
    }
}

impl RelevanceSynthesizer {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn synthesize(
        &self,
        execution_fit: &ExecutionFitScore,
        founder_confidence: &FounderConfidenceScore,
        criticality_factor: f64,
        role_context: RoleContext,
    ) -> RelevanceScore {
        let weights = role_context.relevance_weights();
        let score = relevance(
            execution_fit.score,
            founder_confidence.score,
            &weights,
            criticality_factor,
        );
        let passed_threshold = score >= self.threshold;

        RelevanceScore {
            explanation: self.explain(
                execution_fit.score,
                founder_confidence.score,
                score,
                &weights,
                criticality_factor,
                role_context,
                passed_threshold,
            ),
            score,
            execution_fit: execution_fit.score,
            founder_confidence: founder_confidence.score,
            criticality_factor,
            alpha: weights.alpha,
            beta: weights.beta,
            threshold: self.threshold,
            passed_threshold,
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn explain(
        &self,
        execution_fit: f64,
        founder_confidence: f64,
        score: f64,
        weights: &RelevanceWeights,
        criticality: f64,
        role_context: RoleContext,
        passed: bool,
    ) -> String {
        let mut parts = vec![
            format!(
                "For {}, Execution Fit is weighted {:.0}% and Founder Confidence {:.0}%.",
                role_context.label().replace('_', " "),
                weights.alpha * 100.0,
                weights.beta * 100.0
            ),
            format!(
                "Execution Fit: {execution_fit:.1}/100, Founder Confidence: {founder_confidence:.1}/100."
            ),
        ];

        if criticality < 0.8 {
            parts.push(format!(
                "Role criticality factor ({criticality:.2}) indicates a support-level position."
            ));
        } else if criticality >= 0.9 {
            parts.push(format!(
                "High role criticality ({criticality:.2}) reflects a senior/critical position."
            ));
        }

        parts.push(format!("Final Relevance Score: {score:.1}/100."));
        parts.push(if passed {
            format!("Candidate passes the interview threshold (>= {}).", self.threshold)
        } else {
            format!(
                "Candidate is below the interview threshold ({}). Constructive feedback will be provided.",
                self.threshold
            )
        });

        parts.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fixtures;

    #[test]
    fn test_stable_long_term_scenario() {
        let ef = fixtures::execution_fit(0.8, 0.7, 0.6, 0.1);
        let fc = fixtures::founder_confidence(0.5, 0.9, 0.4, 0.6);

        let rel = RelevanceSynthesizer::default().synthesize(&ef, &fc, 0.85, RoleContext::StableLongTerm);

        assert!((rel.score - 54.91).abs() < 1e-9);
        assert_eq!((rel.alpha, rel.beta), (0.60, 0.40));
        assert!(!rel.passed_threshold);
        assert_eq!(rel.threshold, 60.0);
        assert_eq!(
            rel.explanation,
            "For Stable Long Term, Execution Fit is weighted 60% and Founder Confidence 40%. \
             Execution Fit: 63.0/100, Founder Confidence: 67.0/100. \
             Final Relevance Score: 54.9/100. \
             Candidate is below the interview threshold (60). Constructive feedback will be provided."
        );
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let ef = fixtures::execution_fit(1.0, 1.0, 1.0, 0.0);
        let fc = fixtures::founder_confidence(1.0, 1.0, 1.0, 1.0);
        // 0.5·90 + 0.5·100 = 95
        let rel = RelevanceSynthesizer::new(95.0).synthesize(&ef, &fc, 1.0, RoleContext::HighPressureDelivery);

        assert_eq!(rel.score, 95.0);
        assert!(rel.passed_threshold);
        assert!(rel.explanation.contains("High role criticality (1.00)"));
        assert!(rel.explanation.ends_with("Candidate passes the interview threshold (>= 95)."));
    }

    #[test]
    fn test_support_level_criticality() {
        let ef = fixtures::execution_fit(0.5, 0.5, 0.5, 0.0);
        let fc = fixtures::founder_confidence(0.5, 0.5, 0.5, 0.5);
        let rel = RelevanceSynthesizer::default().synthesize(&ef, &fc, 0.6, RoleContext::ExploratoryRnD);

        assert!(rel.explanation.contains("Role criticality factor (0.60) indicates a support-level position."));
        assert!(rel.score <= 100.0 && rel.score >= 0.0);
    }

    #[test]
    fn test_role_context_selects_weights() {
        let ef = fixtures::execution_fit(0.5, 0.5, 0.5, 0.0);
        let fc = fixtures::founder_confidence(0.5, 0.5, 0.5, 0.5);
        let synth = RelevanceSynthesizer::default();

        for ctx in RoleContext::ALL {
            let rel = synth.synthesize(&ef, &fc, 0.8, ctx);
            assert_eq!(rel.alpha, ctx.relevance_weights().alpha);
            assert_eq!(rel.beta, ctx.relevance_weights().beta);
        }
    }
}
