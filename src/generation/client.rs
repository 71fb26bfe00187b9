use std::time::Duration;

use tracing::{debug, info, warn};

use super::backend::GenerationBackend;
use super::error::{GenerationError, PreconditionError};
use super::safety::SafetyPolicy;
use super::types::GenerateContentRequest;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Submits one prompt under one safety policy and returns the generated text.
///
/// Preconditions are checked before the backend is touched. No caching, no
/// deduplication and no retries: identical prompts are resubmitted fresh.
pub struct GenerativeModelClient<B> {
    backend: B,
    timeout: Duration,
}

impl<B: GenerationBackend> GenerativeModelClient<B> {
    pub fn new(backend: B) -> Self {
        Self::with_timeout(backend, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(backend: B, timeout: Duration) -> Self {
        Self { backend, timeout }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub async fn generate(
        &self,
        prompt: &str,
        policy: &SafetyPolicy,
    ) -> Result<String, GenerationError> {
        self.generate_within(prompt, policy, self.timeout).await
    }

    /// Like [`generate`](Self::generate) with a per-call timeout.
    /// Expiry reports [`GenerationError::TransportFailure`].
    pub async fn generate_within(
        &self,
        prompt: &str,
        policy: &SafetyPolicy,
        timeout: Duration,
    ) -> Result<String, GenerationError> {
        if prompt.trim().is_empty() {
            return Err(PreconditionError::EmptyPrompt.into());
        }
        policy.ensure_complete()?;
        if !self.backend.has_credential() {
            return Err(GenerationError::AuthenticationFailure {
                status: 0,
                message: "no API key configured".into(),
            });
        }

        let req = GenerateContentRequest::user_prompt(prompt, policy.settings());
        debug!(prompt_len = prompt.len(), timeout_ms = timeout.as_millis() as u64, "submitting prompt");

        let response = match tokio::time::timeout(timeout, self.backend.generate_content(&req)).await {
            Ok(result) => result?,
            Err(_) => {
                warn!(timeout_ms = timeout.as_millis() as u64, "generation timed out");
                return Err(GenerationError::TransportFailure(format!(
                    "no response within {}ms",
                    timeout.as_millis()
                )));
            }
        };

        if let Some(reason) = response.block_reason() {
            warn!(reason = %reason, "model withheld its response");
            return Err(GenerationError::ContentBlocked { reason });
        }

        let text = response.text().ok_or_else(|| GenerationError::ContentBlocked {
            reason: "no text returned".into(),
        })?;

        if let Some(usage) = &response.usage_metadata {
            info!(
                input_tokens = usage.prompt_token_count,
                output_tokens = usage.candidates_token_count,
                "generation succeeded"
            );
        } else {
            info!(output_len = text.len(), "generation succeeded");
        }
        Ok(text)
    }
}
