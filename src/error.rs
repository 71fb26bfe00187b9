use thiserror::Error;

use crate::access::AccessDenied;
use crate::generation::GenerationError;
use crate::workflow::WorkflowFailure;

/// Errors raised around the workflows: loading inputs and configuration,
/// passing the gate and building the model backend.
#[derive(Debug, Error)]
pub enum CareerError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("Unsupported input file: {0}")]
    UnsupportedInput(String),

    #[error("Access denied: {0}")]
    Access(#[from] AccessDenied),

    #[error("Generation backend error: {0}")]
    Generation(#[from] GenerationError),

    #[error("Workflow failed: {0}")]
    Workflow(#[from] WorkflowFailure),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}
