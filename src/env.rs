use crate::secrets::{SecretNotFound, SecretResolver};
use std::collections::HashMap;
use std::env as stdenv;
use std::path::PathBuf;

/// Process environment that assembled commands are launched in.
///
/// The environment contains:
/// - `vars`: environment variables visible to the launched tool.
/// - `current_dir`: the working directory the tool is started in.
///
/// It doubles as the [`SecretResolver`] for the command-line binary: a
/// credential reference names an environment variable holding the secret.
#[derive(Debug, Clone)]
pub struct Environment {
    pub vars: HashMap<String, String>,
    pub current_dir: PathBuf,
}

impl Environment {
    /// Capture the current process state.
    pub fn new() -> Self {
        let vars = stdenv::vars().collect();
        let current_dir = stdenv::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self { vars, current_dir }
    }

    /// An environment with no variables, rooted at `current_dir`.
    pub fn empty(current_dir: impl Into<PathBuf>) -> Self {
        Self {
            vars: HashMap::new(),
            current_dir: current_dir.into(),
        }
    }

    pub fn get_var(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }

    pub fn set_var(&mut self, key: impl Into<String>, val: impl Into<String>) {
        self.vars.insert(key.into(), val.into());
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

impl SecretResolver for Environment {
    fn resolve_secret(&self, reference: &str) -> Result<String, SecretNotFound> {
        // An empty variable is treated like a missing one; "" is never a usable key.
        self.get_var(reference)
            .filter(|value| !value.is_empty())
            .ok_or_else(|| SecretNotFound::new(reference))
    }
}
