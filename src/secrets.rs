//! Resolution of credential references into their literal values.

use std::collections::HashMap;
use thiserror::Error;

/// A credential reference could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("secret not found: {reference}")]
pub struct SecretNotFound {
    pub reference: String,
}

impl SecretNotFound {
    pub fn new(reference: impl Into<String>) -> Self {
        Self {
            reference: reference.into(),
        }
    }
}

/// Looks up the literal value behind a credential reference.
///
/// Assemblers call this once per referenced field and never cache the result.
/// Values returned from here must only ever be appended as sensitive arguments.
pub trait SecretResolver {
    fn resolve_secret(&self, reference: &str) -> Result<String, SecretNotFound>;
}

/// In-memory resolver keyed by reference.
#[derive(Debug, Clone, Default)]
pub struct SecretMap {
    secrets: HashMap<String, String>,
}

impl SecretMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, reference: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(reference, value);
        self
    }

    pub fn insert(&mut self, reference: impl Into<String>, value: impl Into<String>) {
        self.secrets.insert(reference.into(), value.into());
    }
}

impl SecretResolver for SecretMap {
    fn resolve_secret(&self, reference: &str) -> Result<String, SecretNotFound> {
        self.secrets
            .get(reference)
            .cloned()
            .ok_or_else(|| SecretNotFound::new(reference))
    }
}

/// Resolver that knows no secrets at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSecrets;

impl SecretResolver for NoSecrets {
    fn resolve_secret(&self, reference: &str) -> Result<String, SecretNotFound> {
        Err(SecretNotFound::new(reference))
    }
}
