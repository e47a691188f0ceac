//! Investor profile generation.

use std::sync::Arc;

use crate::analysis::prompts;
use crate::analysis::scores::{self, MissingScore, ScoreSet};
use crate::error::LlmError;
use crate::llm::{ChatMessage, CompletionRequest, LlmProvider};

/// The derived investor profile: the model's narrative plus the four
/// extracted scores.
#[derive(Debug, Clone)]
pub struct InvestorProfile {
    pub scores: ScoreSet,
    pub narrative: String,
}

/// Why profile generation failed.
///
/// Transport failures and malformed replies are handled differently by the
/// flow: the former surface through the channel, the latter become an
/// in-chat error with a retry on the next turn.
#[derive(Debug, thiserror::Error)]
pub enum ProfileError {
    #[error(transparent)]
    Llm(#[from] LlmError),

    #[error(transparent)]
    Extract(#[from] MissingScore),
}

/// Generates the final profile from the collected reactions.
pub struct Profiler {
    llm: Arc<dyn LlmProvider>,
}

impl Profiler {
    pub fn new(llm: Arc<dyn LlmProvider>) -> Self {
        Self { llm }
    }

    /// Join the reactions, ask the model for a profile, and extract the
    /// embedded scores.
    pub async fn generate(&self, reactions: &[String]) -> Result<InvestorProfile, ProfileError> {
        let joined = reactions.join("\n");
        let request =
            CompletionRequest::new(vec![ChatMessage::user(prompts::profile_prompt(&joined))])
                .with_temperature(0.0);

        let response = self.llm.complete(request).await?;
        tracing::debug!(
            model = self.llm.model_name(),
            input_tokens = response.input_tokens,
            output_tokens = response.output_tokens,
            "profile generated"
        );

        let scores = scores::extract_scores(&response.content)?;
        Ok(InvestorProfile {
            scores,
            narrative: response.content,
        })
    }
}
