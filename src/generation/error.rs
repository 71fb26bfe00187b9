//! Failure taxonomy for generative model calls.
//!
//! Every variant is a distinct kind the caller can branch on. Only
//! [`RateLimited`](GenerationError::RateLimited) and
//! [`TransportFailure`](GenerationError::TransportFailure) are worth retrying;
//! the client itself never retries.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::safety::HarmCategory;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// The request was rejected before anything was sent.
    #[error("invalid generation request: {0}")]
    Precondition(#[from] PreconditionError),

    /// Missing or rejected credential for the model service.
    #[error("authentication failed (status {status}): {message}")]
    AuthenticationFailure { status: u16, message: String },

    /// HTTP 429. `retry_after_ms` comes from the `retry-after` header when present.
    #[error("rate limited{}", retry_hint(*retry_after_ms))]
    RateLimited { retry_after_ms: Option<u64> },

    /// The model refused to answer even under the permissive policy.
    #[error("content blocked by the model: {reason}")]
    ContentBlocked { reason: String },

    /// Network failure, gateway error or timeout.
    #[error("transport failure: {0}")]
    TransportFailure(String),

    /// Anything else, with the raw diagnostic detail.
    #[error("unexpected model failure: {0}")]
    UnknownFailure(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PreconditionError {
    #[error("prompt is empty")]
    EmptyPrompt,

    #[error("safety policy does not cover {0}")]
    IncompletePolicy(HarmCategory),

    #[error("safety policy lists {0} more than once")]
    DuplicateCategory(HarmCategory),
}

fn retry_hint(retry_after_ms: Option<u64>) -> String {
    retry_after_ms
        .map(|ms| format!(", retry after {ms}ms"))
        .unwrap_or_default()
}

/// Coarse classification used by callers and audit records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailureKind {
    Precondition,
    AuthenticationFailure,
    RateLimited,
    ContentBlocked,
    TransportFailure,
    UnknownFailure,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FailureKind::Precondition => "Precondition",
            FailureKind::AuthenticationFailure => "AuthenticationFailure",
            FailureKind::RateLimited => "RateLimited",
            FailureKind::ContentBlocked => "ContentBlocked",
            FailureKind::TransportFailure => "TransportFailure",
            FailureKind::UnknownFailure => "UnknownFailure",
        };
        f.write_str(name)
    }
}

impl GenerationError {
    pub fn kind(&self) -> FailureKind {
        match self {
            GenerationError::Precondition(_) => FailureKind::Precondition,
            GenerationError::AuthenticationFailure { .. } => FailureKind::AuthenticationFailure,
            GenerationError::RateLimited { .. } => FailureKind::RateLimited,
            GenerationError::ContentBlocked { .. } => FailureKind::ContentBlocked,
            GenerationError::TransportFailure(_) => FailureKind::TransportFailure,
            GenerationError::UnknownFailure(_) => FailureKind::UnknownFailure,
        }
    }

    /// Whether re-invoking the same request may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            GenerationError::RateLimited { .. } | GenerationError::TransportFailure(_)
        )
    }

    /// Authentication failures point at deployment configuration, not the request.
    pub fn is_misconfiguration(&self) -> bool {
        matches!(self, GenerationError::AuthenticationFailure { .. })
    }

    /// One specific message per kind, suitable for showing to the end user.
    pub fn user_message(&self) -> String {
        match self {
            GenerationError::Precondition(e) => {
                format!("The request could not be sent to the model: {e}.")
            }
            GenerationError::AuthenticationFailure { .. } => {
                "The model service rejected our credentials. The service is misconfigured; \
                 please contact the administrator."
                    .to_string()
            }
            GenerationError::RateLimited { retry_after_ms } => match retry_after_ms {
                Some(ms) => format!(
                    "The model service is busy. Please try again in {} seconds.",
                    ms.div_ceil(1000)
                ),
                None => "The model service is busy. Please try again shortly.".to_string(),
            },
            GenerationError::ContentBlocked { reason } => format!(
                "The model declined to produce a response for this request ({reason}). \
                 Try rephrasing your input."
            ),
            GenerationError::TransportFailure(_) => {
                "Could not reach the model service. Check your connection and try again."
                    .to_string()
            }
            GenerationError::UnknownFailure(detail) => {
                format!("The model service returned an unexpected error: {detail}")
            }
        }
    }
}

impl From<reqwest::Error> for GenerationError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() || err.is_connect() || err.is_request() {
            GenerationError::TransportFailure(err.to_string())
        } else if err.is_decode() {
            GenerationError::UnknownFailure(format!("malformed response body: {err}"))
        } else {
            GenerationError::UnknownFailure(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_limited_display() {
        let err = GenerationError::RateLimited {
            retry_after_ms: Some(5000),
        };
        assert_eq!(err.to_string(), "rate limited, retry after 5000ms");
        let err = GenerationError::RateLimited {
            retry_after_ms: None,
        };
        assert_eq!(err.to_string(), "rate limited");
    }

    #[test]
    fn only_rate_limit_and_transport_are_retryable() {
        let retryable = [
            GenerationError::RateLimited {
                retry_after_ms: None,
            },
            GenerationError::TransportFailure("timeout".into()),
        ];
        let fatal = [
            GenerationError::Precondition(PreconditionError::EmptyPrompt),
            GenerationError::AuthenticationFailure {
                status: 401,
                message: "bad key".into(),
            },
            GenerationError::ContentBlocked {
                reason: "SAFETY".into(),
            },
            GenerationError::UnknownFailure("boom".into()),
        ];
        assert!(retryable.iter().all(GenerationError::is_retryable));
        assert!(!fatal.iter().any(GenerationError::is_retryable));
    }

    #[test]
    fn user_messages_are_distinct_per_kind() {
        let errors = [
            GenerationError::Precondition(PreconditionError::EmptyPrompt),
            GenerationError::AuthenticationFailure {
                status: 403,
                message: "denied".into(),
            },
            GenerationError::RateLimited {
                retry_after_ms: Some(1500),
            },
            GenerationError::ContentBlocked {
                reason: "SAFETY".into(),
            },
            GenerationError::TransportFailure("reset".into()),
            GenerationError::UnknownFailure("HTTP 418".into()),
        ];
        let messages: Vec<String> = errors.iter().map(GenerationError::user_message).collect();
        for (i, a) in messages.iter().enumerate() {
            for b in &messages[i + 1..] {
                assert_ne!(a, b);
            }
        }
        assert!(messages[2].contains("2 seconds"));
        assert!(messages[5].contains("HTTP 418"));
    }

    #[test]
    fn kind_display() {
        assert_eq!(FailureKind::ContentBlocked.to_string(), "ContentBlocked");
        let err = GenerationError::TransportFailure("x".into());
        assert_eq!(err.kind(), FailureKind::TransportFailure);
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<GenerationError>();
    }
}
