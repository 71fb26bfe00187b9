use std::future::Future;
use std::time::Duration;

use reqwest::{Client, StatusCode};
use tracing::{debug, warn};

use super::error::GenerationError;
use super::types::{ApiErrorEnvelope, GenerateContentRequest, GenerateContentResponse};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-pro";

/// The external text-generation capability.
///
/// Implementations perform exactly one outbound call per invocation and keep
/// no state between calls.
pub trait GenerationBackend: Send + Sync {
    fn generate_content(
        &self,
        req: &GenerateContentRequest,
    ) -> impl Future<Output = Result<GenerateContentResponse, GenerationError>> + Send;

    /// Whether a credential is present at all. A backend without one is never called.
    fn has_credential(&self) -> bool {
        true
    }
}

pub struct GeminiBackend {
    api_key: String,
    model: String,
    base_url: String,
    client: Client,
}

impl GeminiBackend {
    pub fn new(api_key: String, model: String) -> Result<Self, GenerationError> {
        Self::with_base_url(api_key, model, DEFAULT_BASE_URL.to_string())
    }

    /// Create a backend pointing at a custom base URL (useful for testing).
    pub fn with_base_url(
        api_key: String,
        model: String,
        base_url: String,
    ) -> Result<Self, GenerationError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| GenerationError::UnknownFailure(format!("HTTP client setup: {e}")))?;
        Ok(Self {
            api_key,
            model,
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }
}

impl GenerationBackend for GeminiBackend {
    async fn generate_content(
        &self,
        req: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, GenerationError> {
        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(req)
            .send()
            .await?;

        let status = response.status();
        debug!(status = status.as_u16(), model = %self.model, "model service responded");

        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after_ms = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u64>().ok())
                .map(|secs| secs * 1000);
            return Err(GenerationError::RateLimited { retry_after_ms });
        }

        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!(status = status.as_u16(), "model service returned an error");
            return Err(classify_status(status, body));
        }

        let body = response.json::<GenerateContentResponse>().await?;
        Ok(body)
    }

    fn has_credential(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}

fn classify_status(status: StatusCode, body: String) -> GenerationError {
    let parsed = serde_json::from_str::<ApiErrorEnvelope>(&body).ok();
    let invalid_key = parsed
        .as_ref()
        .is_some_and(|envelope| envelope.error.is_invalid_api_key());
    let message = parsed
        .map(|envelope| envelope.error.message)
        .filter(|m| !m.is_empty())
        .unwrap_or(body);

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => GenerationError::AuthenticationFailure {
            status: status.as_u16(),
            message,
        },
        StatusCode::BAD_REQUEST if invalid_key => GenerationError::AuthenticationFailure {
            status: status.as_u16(),
            message,
        },
        StatusCode::BAD_GATEWAY | StatusCode::SERVICE_UNAVAILABLE | StatusCode::GATEWAY_TIMEOUT => {
            GenerationError::TransportFailure(format!("HTTP {}: {message}", status.as_u16()))
        }
        _ => GenerationError::UnknownFailure(format!("HTTP {}: {message}", status.as_u16())),
    }
}
