//! Completion-backed transforms.
//!
//! Every agent is a `Transform` (prompts, validation, confidence) run by the
//! generic `Agent<T>`, which owns the call → parse → repair → validate cycle.

use std::sync::Arc;
use std::time::Instant;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::errors::PipelineError;
use crate::llm_client::json_repair::parse_value;
use crate::llm_client::prompts::with_json_instruction;
use crate::llm_client::{CompletionClient, CompletionOptions, LlmError};
use crate::models::scores::clamp_unit;
use crate::models::{CandidateProfile, JdSpec};

pub mod assignment;
pub mod candidate_feedback;
pub mod founder_confidence;
pub mod jd_reality;
pub mod prompts;
pub mod resume_structuring;
pub mod technical;

pub use assignment::{AssignmentGeneration, AssignmentInput};
pub use candidate_feedback::{CandidateFeedbackGeneration, FeedbackInput};
pub use founder_confidence::FounderConfidence;
pub use jd_reality::{JdInput, JdReality};
pub use resume_structuring::{ResumeInput, ResumeStructuring};
pub use technical::TechnicalChecking;

/// Input shared by the two scoring agents.
pub struct EvaluationInput<'a> {
    pub candidate: &'a CandidateProfile,
    pub jd: &'a JdSpec,
}

/// Per-invocation progress. Only ever moves forward, or to `Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentStage {
    Idle,
    PromptBuilt,
    Completed,
    Parsed,
    Validated,
    Done,
    Failed,
}

#[derive(Debug, Clone)]
pub struct AgentResult<T> {
    pub data: T,
    pub explanation: String,
    /// Heuristic over the output's shape, in [0, 1].
    pub confidence: f64,
}

/// The agent-specific half of an agent: what to ask and how to read the answer.
pub trait Transform: Send + Sync {
    const NAME: &'static str;

    type Input<'a>: Sync;
    type Raw: DeserializeOwned;
    type Output: Send;

    fn system_prompt(&self) -> &'static str;

    fn build_prompt(&self, input: &Self::Input<'_>) -> String;

    /// Clamps and completes the raw model answer into the final output.
    fn validate(&self, raw: Self::Raw, input: &Self::Input<'_>) -> Self::Output;

    /// Output to use when the answer cannot be parsed even after repair.
    fn fallback(&self, _input: &Self::Input<'_>) -> Option<Self::Output> {
        None
    }

    /// `response` is the parsed JSON, or `Value::Null` for a fallback.
    fn confidence(&self, output: &Self::Output, response: &Value) -> f64;

    fn explain(&self, _output: &Self::Output, response: &Value) -> String {
        ["explanation", "reasoning"]
            .iter()
            .find_map(|key| response.get(*key).and_then(Value::as_str))
            .unwrap_or_default()
            .to_string()
    }
}

/// Runs one `Transform` against the completion client.
pub struct Agent<T: Transform> {
    transform: T,
    llm: Arc<CompletionClient>,
    options: CompletionOptions,
}

impl<T: Transform> Agent<T> {
    pub fn new(transform: T, llm: Arc<CompletionClient>) -> Self {
        Self {
            transform,
            llm,
            options: CompletionOptions::default(),
        }
    }

    pub fn transform(&self) -> &T {
        &self.transform
    }

    pub async fn execute(
        &self,
        input: &T::Input<'_>,
    ) -> Result<AgentResult<T::Output>, PipelineError> {
        let started = Instant::now();
        let mut stage = AgentStage::Idle;
        info!("[{}] Starting analysis...", T::NAME);

        let system = with_json_instruction(self.transform.system_prompt());
        let user = self.transform.build_prompt(input);
        advance(&mut stage, AgentStage::PromptBuilt);

        let text = match self.llm.complete(&system, &user, &self.options).await {
            Ok(text) => text,
            // No content is handled like any other unreadable answer.
            Err(LlmError::EmptyContent) => String::new(),
            Err(e) => {
                advance(&mut stage, AgentStage::Failed);
                return Err(e.into());
            }
        };
        advance(&mut stage, AgentStage::Completed);

        let parsed = parse_value(&text)
            .and_then(|value| serde_json::from_value::<T::Raw>(value.clone()).map(|raw| (raw, value)));

        let (output, response) = match parsed {
            Ok((raw, value)) => {
                advance(&mut stage, AgentStage::Parsed);
                let output = self.transform.validate(raw, input);
                advance(&mut stage, AgentStage::Validated);
                (output, value)
            }
            Err(e) => match self.transform.fallback(input) {
                Some(output) => {
                    warn!("[{}] Could not parse response ({}), using fallback", T::NAME, e);
                    (output, Value::Null)
                }
                None => {
                    advance(&mut stage, AgentStage::Failed);
                    return Err(PipelineError::UnparseableResponse {
                        agent: T::NAME,
                        detail: e.to_string(),
                    });
                }
            },
        };

        let explanation = self.transform.explain(&output, &response);
        let confidence = clamp_unit(self.transform.confidence(&output, &response));
        advance(&mut stage, AgentStage::Done);

        info!(
            "[{}] Completed in {}ms (confidence {:.2})",
            T::NAME,
            started.elapsed().as_millis(),
            confidence
        );

        Ok(AgentResult {
            data: output,
            explanation,
            confidence,
        })
    }
}

fn advance(stage: &mut AgentStage, next: AgentStage) {
    debug!("agent stage {:?} -> {:?}", stage, next);
    *stage = next;
}

/// Treats a missing or blank string as absent.
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Fills `{key}` placeholders in one pass. Substituted text is never rescanned,
/// so resume or JD content that happens to contain `{summary}` stays literal.
/// Unknown placeholders and other braces are left untouched.
pub(crate) fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let tail = &rest[open..];
        let replacement = tail[1..].find('}').and_then(|close| {
            let key = &tail[1..close + 1];
            values
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, value)| (close + 2, *value))
        });
        match replacement {
            Some((consumed, value)) => {
                out.push_str(value);
                rest = &tail[consumed..];
            }
            None => {
                out.push('{');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

// ─── Lenient field readers for model output ──────────────────────────────────

/// Reads a list of strings. `null` becomes empty, numbers are stringified,
/// other non-string items are dropped.
pub(crate) fn string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::Deserialize;

    let value = Option::<Value>::deserialize(deserializer)?;
    let items = match value {
        Some(Value::Array(items)) => items,
        Some(single @ Value::String(_)) => vec![single],
        _ => return Ok(Vec::new()),
    };
    Ok(items
        .into_iter()
        .filter_map(|item| match item {
            Value::String(s) => Some(s),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
        .collect())
}

/// Reads an optional string, accepting numbers and treating anything else as absent.
pub(crate) fn opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::Deserialize;

    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::mock::{self, MockBackend};
    use crate::llm_client::LlmError;
    use serde::Deserialize;

    struct Echo {
        with_fallback: bool,
    }

    #[derive(Deserialize)]
    struct EchoRaw {
        #[serde(default)]
        value: f64,
    }

    impl Transform for Echo {
        const NAME: &'static str = "Echo Agent";
        type Input<'a> = String;
        type Raw = EchoRaw;
        type Output = f64;

        fn system_prompt(&self) -> &'static str {
            "You echo numbers."
        }

        fn build_prompt(&self, input: &String) -> String {
            format!("Echo {input}")
        }

        fn validate(&self, raw: EchoRaw, _input: &String) -> f64 {
            clamp_unit(raw.value)
        }

        fn fallback(&self, _input: &String) -> Option<f64> {
            self.with_fallback.then_some(-1.0)
        }

        fn confidence(&self, output: &f64, _response: &Value) -> f64 {
            *output * 2.0
        }
    }

    #[tokio::test]
    async fn test_execute_parses_validates_and_explains() {
        let backend = Arc::new(MockBackend::replying(
            r#"{"value": 0.4, "reasoning": "because"}"#,
        ));
        let agent = Agent::new(Echo { with_fallback: false }, mock::client(backend.clone()));

        let result = agent.execute(&"x".to_string()).await.unwrap();
        assert_eq!(result.data, 0.4);
        assert_eq!(result.explanation, "because");
        assert!((result.confidence - 0.8).abs() < 1e-9);
        assert_eq!(backend.calls(), 1);
    }

    #[tokio::test]
    async fn test_system_prompt_carries_json_instruction() {
        let backend = Arc::new(MockBackend::new(|messages| {
            assert!(messages[0].content.starts_with("You echo numbers."));
            assert!(messages[0].content.contains("valid JSON only"));
            assert_eq!(messages[1].content, "Echo 7");
            Ok(r#"{"value": 2}"#.to_string())
        }));
        let agent = Agent::new(Echo { with_fallback: false }, mock::client(backend));

        let result = agent.execute(&"7".to_string()).await.unwrap();
        assert_eq!(result.data, 1.0);
        assert_eq!(result.confidence, 1.0);
    }

    #[tokio::test]
    async fn test_repairs_truncated_response() {
        let backend = Arc::new(MockBackend::replying("```json\n{\"value\": 0.3, \"explanation\": \"cut of"));
        let agent = Agent::new(Echo { with_fallback: false }, mock::client(backend));

        let result = agent.execute(&"x".to_string()).await.unwrap();
        assert_eq!(result.data, 0.3);
        assert_eq!(result.explanation, "cut of");
    }

    #[tokio::test]
    async fn test_unparseable_without_fallback_fails() {
        let backend = Arc::new(MockBackend::replying("no json here"));
        let agent = Agent::new(Echo { with_fallback: false }, mock::client(backend));

        let err = agent.execute(&"x".to_string()).await.unwrap_err();
        assert!(matches!(
            err,
            PipelineError::UnparseableResponse { agent: "Echo Agent", .. }
        ));
    }

    #[tokio::test]
    async fn test_unparseable_with_fallback_returns_fallback() {
        let backend = Arc::new(MockBackend::replying("no json here"));
        let agent = Agent::new(Echo { with_fallback: true }, mock::client(backend));

        let result = agent.execute(&"x".to_string()).await.unwrap();
        assert_eq!(result.data, -1.0);
        assert_eq!(result.explanation, "");
        assert_eq!(result.confidence, 0.0);
    }

    #[tokio::test]
    async fn test_model_rejection_propagates() {
        let backend = Arc::new(MockBackend::new(|_| {
            Err(LlmError::Rejected {
                status: 401,
                message: "bad key".to_string(),
            })
        }));
        let agent = Agent::new(Echo { with_fallback: true }, mock::client(backend));

        let err = agent.execute(&"x".to_string()).await.unwrap_err();
        assert!(matches!(err, PipelineError::Model(_)));
    }

    #[tokio::test]
    async fn test_missing_content_goes_through_fallback() {
        // An exhausted sequence answers with no content at all.
        let backend = Arc::new(MockBackend::sequence(vec![]));
        let agent = Agent::new(Echo { with_fallback: true }, mock::client(backend));
        assert_eq!(agent.execute(&"x".to_string()).await.unwrap().data, -1.0);

        let backend = Arc::new(MockBackend::replying(""));
        let agent = Agent::new(Echo { with_fallback: false }, mock::client(backend));
        let err = agent.execute(&"x".to_string()).await.unwrap_err();
        assert!(matches!(err, PipelineError::UnparseableResponse { .. }));
    }

    #[test]
    fn test_fill_template_is_single_pass() {
        let filled = fill_template(
            "Name: {name}\nSummary: {summary}\nSchema: {\"a\": 1} {unknown}",
            &[("name", "{summary}"), ("summary", "Strong")],
        );
        assert_eq!(
            filled,
            "Name: {summary}\nSummary: Strong\nSchema: {\"a\": 1} {unknown}"
        );
    }
}
