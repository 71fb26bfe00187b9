pub mod backend;
pub mod client;
pub mod error;
pub mod safety;
pub mod types;

pub use backend::{GeminiBackend, GenerationBackend};
pub use client::GenerativeModelClient;
pub use error::{FailureKind, GenerationError, PreconditionError};
pub use safety::{HarmCategory, HarmThreshold, SafetyPolicy, SafetySetting};
