//! Bounded retries for transient LLM errors.
//!
//! Wraps an LlmProvider and retries rate limits and request failures up to a
//! configured count. Transparent to callers --- same LlmProvider trait.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::LlmError;
use crate::llm::provider::{CompletionRequest, CompletionResponse, LlmProvider};

/// Returns `true` if the error is transient and the request may succeed on a
/// retry against the same provider.
///
/// Auth failures propagate immediately; retrying won't fix credentials.
fn is_retryable(err: &LlmError) -> bool {
    matches!(
        err,
        LlmError::RequestFailed { .. }
            | LlmError::RateLimited { .. }
            | LlmError::InvalidResponse { .. }
            | LlmError::Http(_)
    )
}

/// Delay before the next attempt.
///
/// Honors a provider-supplied retry-after when present, otherwise backs off
/// linearly per attempt.
fn retry_delay(err: &LlmError, attempt: u32) -> Duration {
    if let LlmError::RateLimited {
        retry_after: Some(delay),
        ..
    } = err
    {
        return *delay;
    }
    Duration::from_millis(200 * u64::from(attempt))
}

/// An LLM provider that retries transient failures a bounded number of times.
pub struct RetryProvider {
    inner: Arc<dyn LlmProvider>,
    max_retries: u32,
}

impl RetryProvider {
    /// Create a new retry wrapper. `max_retries` counts attempts after the
    /// first, so `2` means up to three requests in total.
    pub fn new(inner: Arc<dyn LlmProvider>, max_retries: u32) -> Self {
        Self { inner, max_retries }
    }
}

#[async_trait]
impl LlmProvider for RetryProvider {
    async fn complete(&self, req: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        let mut attempt = 0;
        loop {
            match self.inner.complete(req.clone()).await {
                Ok(response) => return Ok(response),
                Err(err) if attempt < self.max_retries && is_retryable(&err) => {
                    attempt += 1;
                    let delay = retry_delay(&err, attempt);
                    tracing::warn!(
                        attempt,
                        error = %err,
                        "transient LLM error, retrying after {:?}",
                        delay
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(err) => return Err(err),
            }
        }
    }

    fn model_name(&self) -> &str {
        self.inner.model_name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    use crate::llm::provider::{ChatMessage, FinishReason};

    /// Fails with a retryable error `failures` times, then succeeds.
    struct FlakyProvider {
        failures: u32,
        calls: AtomicU32,
    }

    impl FlakyProvider {
        fn new(failures: u32) -> Self {
            Self {
                failures,
                calls: AtomicU32::new(0),
            }
        }
    }

    #[async_trait]
    impl LlmProvider for FlakyProvider {
        async fn complete(&self, _req: CompletionRequest) -> Result<CompletionResponse, LlmError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if call < self.failures {
                return Err(LlmError::RequestFailed {
                    provider: "flaky".to_string(),
                    reason: "boom".to_string(),
                });
            }
            Ok(CompletionResponse {
                content: "ok".to_string(),
                input_tokens: 1,
                output_tokens: 1,
                finish_reason: FinishReason::Stop,
            })
        }

        fn model_name(&self) -> &str {
            "flaky"
        }
    }

    /// Always fails with a non-retryable auth error.
    struct AuthFailProvider {
        calls: AtomicU32,
    }

    #[async_trait]
    impl LlmProvider for AuthFailProvider {
        async fn complete(&self, _req: CompletionRequest) -> Result<CompletionResponse, LlmError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(LlmError::AuthFailed {
                provider: "flaky".to_string(),
            })
        }

        fn model_name(&self) -> &str {
            "flaky"
        }
    }

    fn request() -> CompletionRequest {
        CompletionRequest::new(vec![ChatMessage::user("hola")])
    }

    #[tokio::test(start_paused = true)]
    async fn recovers_within_retry_limit() {
        let inner = Arc::new(FlakyProvider::new(2));
        let provider = RetryProvider::new(inner.clone(), 2);

        let response = provider.complete(request()).await.unwrap();
        assert_eq!(response.content, "ok");
        assert_eq!(inner.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn gives_up_after_max_retries() {
        let inner = Arc::new(FlakyProvider::new(5));
        let provider = RetryProvider::new(inner.clone(), 2);

        let err = provider.complete(request()).await.unwrap_err();
        assert!(matches!(err, LlmError::RequestFailed { .. }));
        assert_eq!(inner.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn auth_failure_is_not_retried() {
        let inner = Arc::new(AuthFailProvider {
            calls: AtomicU32::new(0),
        });
        let provider = RetryProvider::new(inner.clone(), 2);

        let err = provider.complete(request()).await.unwrap_err();
        assert!(matches!(err, LlmError::AuthFailed { .. }));
        assert_eq!(inner.calls.load(Ordering::SeqCst), 1);
    }
}
