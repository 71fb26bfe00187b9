//! Credential gate in front of the workflows.
//!
//! A successful check yields an [`AccessGrant`], which the workflow entry
//! points take as an explicit argument instead of reading session state.

use serde::Deserialize;
use thiserror::Error;
use tracing::{info, warn};

/// Predicate over an (identifier, secret) pair.
pub trait CredentialCheck: Send + Sync {
    fn verify(&self, identifier: &str, secret: &str) -> bool;
}

impl<F> CredentialCheck for F
where
    F: Fn(&str, &str) -> bool + Send + Sync,
{
    fn verify(&self, identifier: &str, secret: &str) -> bool {
        self(identifier, secret)
    }
}

/// Accepts exactly one configured pair. Both default to empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ConfiguredCredentials {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

impl CredentialCheck for ConfiguredCredentials {
    fn verify(&self, identifier: &str, secret: &str) -> bool {
        identifier == self.username && secret == self.password
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid username or password")]
pub struct AccessDenied;

/// Proof that the gate accepted a credential. Only [`AccessGate`] can mint one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessGrant {
    identifier: String,
}

impl AccessGrant {
    pub fn identifier(&self) -> &str {
        &self.identifier
    }
}

pub struct AccessGate<C> {
    check: C,
}

impl<C: CredentialCheck> AccessGate<C> {
    pub fn new(check: C) -> Self {
        Self { check }
    }

    pub fn authorize(&self, identifier: &str, secret: &str) -> Result<AccessGrant, AccessDenied> {
        if self.check.verify(identifier, secret) {
            info!(user = %identifier, "access granted");
            Ok(AccessGrant {
                identifier: identifier.to_string(),
            })
        } else {
            warn!(user = %identifier, "access denied");
            Err(AccessDenied)
        }
    }
}
