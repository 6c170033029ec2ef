//! Mail notifications through an HTTP relay.
//!
//! The relay accepts `{to, subject, body}` and owns SMTP. Without a webhook
//! URL, messages are only logged.

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, info};

use crate::models::{ExternalVerdict, InternalVerdict};
use crate::workflow::collaborators::Notifier;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MailMessage {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Reviewer-facing summary. Carries every score.
pub fn reviewer_message(to: &str, verdict: &InternalVerdict) -> MailMessage {
    let mut body = format!(
        "Candidate: {}\nEmail: {}\nPhone: {}\nResume: {}\n\n\
         Recommendation: {}\nRole context: {}\n\
         Relevance: {:.1}/100\nExecution Fit: {:.1}/100\nFounder Confidence: {:.1}/100\n\n{}\n",
        verdict.candidate_name,
        verdict.email.as_deref().unwrap_or("-"),
        verdict.phone.as_deref().unwrap_or("-"),
        verdict.resume_link,
        verdict.recommendation,
        verdict.role_context,
        verdict.relevance.score,
        verdict.execution_fit.score,
        verdict.founder_confidence.score,
        verdict.relevance.explanation,
    );

    for (heading, items) in [
        ("INTERVIEW FOCUS", &verdict.interview_focus_areas),
        ("RISK NOTES", &verdict.risk_notes),
    ] {
        if !items.is_empty() {
            body.push_str(&format!("\n{heading}\n"));
            for item in items {
                body.push_str(&format!("• {item}\n"));
            }
        }
    }
    if let Some(assignment) = &verdict.assignment {
        body.push_str(&format!(
            "\nAssignment: {} ({}h)\n",
            assignment.title, assignment.timebox_hours
        ));
    }

    MailMessage {
        to: to.to_string(),
        subject: format!(
            "[{}] {} for {}",
            verdict.recommendation, verdict.candidate_name, verdict.role_context
        ),
        body,
    }
}

/// Candidate-facing message. Built only from the external verdict, so no
/// score can reach it.
pub fn candidate_message(email: &str, name: &str, verdict: &ExternalVerdict) -> MailMessage {
    let mut body = format!("Hi {name},\n\nThank you for your application. Here is our feedback.\n\n");
    body.push_str(&verdict.feedback.format_plain());
    body.push_str("\n\nNEXT STEPS\n");
    for step in &verdict.next_steps {
        body.push_str(&format!("• {step}\n"));
    }

    MailMessage {
        to: email.to_string(),
        subject: "Your application: feedback".to_string(),
        body,
    }
}

pub struct WebhookNotifier {
    http: reqwest::Client,
    webhook_url: Option<String>,
    reviewer_email: Option<String>,
}

impl WebhookNotifier {
    pub fn new(webhook_url: Option<String>, reviewer_email: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            webhook_url,
            reviewer_email,
        }
    }

    async fn deliver(&self, message: &MailMessage) -> Result<()> {
        let Some(url) = &self.webhook_url else {
            info!("Notification (not sent, no webhook): {} -> {}", message.subject, message.to);
            return Ok(());
        };

        self.http
            .post(url)
            .json(message)
            .send()
            .await
            .context("Posting to mail relay")?
            .error_for_status()
            .context("Mail relay rejected the message")?;

        debug!("Notification sent: {} -> {}", message.subject, message.to);
        Ok(())
    }
}

#[async_trait]
impl Notifier for WebhookNotifier {
    async fn notify_reviewer(&self, verdict: &InternalVerdict) -> Result<()> {
        let Some(to) = &self.reviewer_email else {
            info!(
                "No reviewer email configured; {} scored {:.1} ({})",
                verdict.candidate_name, verdict.relevance.score, verdict.recommendation
            );
            return Ok(());
        };
        self.deliver(&reviewer_message(to, verdict)).await
    }

    async fn notify_candidate(&self, email: &str, name: &str, verdict: &ExternalVerdict) -> Result<()> {
        self.deliver(&candidate_message(email, name, verdict)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::feedback::is_candidate_safe;
    use crate::models::{CandidateFeedback, FeedbackStage, RoleContext};
    use crate::synthesis::{RelevanceSynthesizer, VerdictSynthesizer};
    use crate::testing::fixtures;

    fn verdicts() -> (InternalVerdict, ExternalVerdict) {
        let candidate = fixtures::candidate();
        let jd = fixtures::jd_spec();
        let ef = fixtures::execution_fit(0.8, 0.7, 0.6, 0.1);
        let fc = fixtures::founder_confidence(0.5, 0.9, 0.4, 0.6);
        let rel = RelevanceSynthesizer::default().synthesize(&ef, &fc, 0.85, RoleContext::StableLongTerm);
        let feedback = CandidateFeedback::sanitized(
            FeedbackStage::Resume,
            vec!["Clear ownership of the ledger service".to_string()],
            vec!["Limited detail on Kafka operations".to_string()],
            vec!["Describe a Kafka incident you handled".to_string()],
            None,
        );
        let synth = VerdictSynthesizer;
        let assignment = fixtures::assignment();
        (
            synth.internal_verdict(&candidate, &jd, &ef, &fc, &rel, Some(&assignment)),
            synth.external_verdict(&feedback, &rel),
        )
    }

    #[test]
    fn test_reviewer_message_carries_scores() {
        let (internal, _) = verdicts();
        let message = reviewer_message("founders@example.com", &internal);

        assert_eq!(message.subject, "[Maybe] Jordan Lee for Stable_Long_Term");
        assert!(message.body.contains("Relevance: 54.9/100"));
        assert!(message.body.contains("Execution Fit: 63.0/100"));
        assert!(message.body.contains("Assignment: Idempotent payment ingestion (4h)"));
    }

    #[test]
    fn test_candidate_message_is_score_free() {
        let (_, external) = verdicts();
        let message = candidate_message("jordan.lee@example.com", "Jordan Lee", &external);

        assert_eq!(message.to, "jordan.lee@example.com");
        assert!(message.body.starts_with("Hi Jordan Lee,"));
        assert!(message.body.contains("• Describe a Kafka incident you handled"));
        assert!(message.body.contains("Feel free to reapply in the future"));
        for line in message.body.lines() {
            assert!(is_candidate_safe(line), "unsafe line: {line}");
        }
    }

    #[tokio::test]
    async fn test_without_webhook_nothing_is_sent() {
        let (internal, external) = verdicts();
        let notifier = WebhookNotifier::new(None, Some("founders@example.com".to_string()));

        notifier.notify_reviewer(&internal).await.unwrap();
        notifier
            .notify_candidate("jordan.lee@example.com", "Jordan Lee", &external)
            .await
            .unwrap();
    }
}
