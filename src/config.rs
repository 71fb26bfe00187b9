//! Runtime configuration loaded from `careerwise.toml`.
//!
//! Values missing from the file use defaults. The `GEMINI_API_KEY`
//! environment variable takes precedence over the file's `api_key`.

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::access::ConfiguredCredentials;
use crate::error::CareerError;
use crate::generation::backend::{DEFAULT_BASE_URL, DEFAULT_MODEL};

pub const CONFIG_FILE_NAME: &str = "careerwise.toml";
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

#[derive(Debug, Clone, Deserialize)]
pub struct CareerwiseConfig {
    /// Gemini API key. Usually supplied through the environment instead.
    #[serde(default)]
    pub api_key: String,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Upper bound for one generation call, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// The single credential pair the access gate accepts.
    #[serde(default)]
    pub access: ConfiguredCredentials,
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    60
}

impl Default for CareerwiseConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: default_model(),
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            access: ConfiguredCredentials::default(),
        }
    }
}

impl CareerwiseConfig {
    /// Loads `path` when given (it must exist), otherwise `careerwise.toml` in
    /// the working directory if present, otherwise defaults. Then applies the
    /// environment override.
    pub fn load(path: Option<&Path>) -> Result<Self, CareerError> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => {
                let default_path = Path::new(CONFIG_FILE_NAME);
                if default_path.exists() {
                    Self::from_file(default_path)?
                } else {
                    Self::default()
                }
            }
        };
        Ok(config.with_api_key_override(std::env::var(API_KEY_ENV).ok()))
    }

    pub fn from_file(path: &Path) -> Result<Self, CareerError> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            CareerError::Config(format!("cannot read {}: {e}", path.display()))
        })?;
        let config: Self = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// A non-empty key replaces whatever the file supplied.
    pub fn with_api_key_override(mut self, key: Option<String>) -> Self {
        if let Some(key) = key
            && !key.trim().is_empty()
        {
            self.api_key = key;
        }
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    fn validate(&self) -> Result<(), CareerError> {
        if self.timeout_secs == 0 {
            return Err(CareerError::Config("timeout_secs must be at least 1".into()));
        }
        if self.model.trim().is_empty() {
            return Err(CareerError::Config("model must not be empty".into()));
        }
        Ok(())
    }
}
