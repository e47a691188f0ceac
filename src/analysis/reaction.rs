//! Per-reaction sentiment analysis.

use std::sync::Arc;

use crate::analysis::prompts;
use crate::error::LlmError;
use crate::llm::{ChatMessage, CompletionRequest, LlmProvider};

/// Free-text analysis of one news reaction: sentiment, the dominant
/// ESG/risk category, and a follow-up question, as produced by the model.
#[derive(Debug, Clone)]
pub struct ReactionAnalysis {
    pub text: String,
}

/// Analyzes individual news reactions via the LLM.
pub struct ReactionAnalyzer {
    llm: Arc<dyn LlmProvider>,
}

impl ReactionAnalyzer {
    pub fn new(llm: Arc<dyn LlmProvider>) -> Self {
        Self { llm }
    }

    /// Analyze a single reaction.
    pub async fn analyze(&self, reaction: &str) -> Result<ReactionAnalysis, LlmError> {
        let request = CompletionRequest::new(vec![ChatMessage::user(prompts::reaction_prompt(
            reaction,
        ))])
        .with_temperature(0.0);

        let response = self.llm.complete(request).await?;
        tracing::debug!(
            input_tokens = response.input_tokens,
            output_tokens = response.output_tokens,
            "reaction analyzed"
        );

        Ok(ReactionAnalysis {
            text: response.content,
        })
    }
}
