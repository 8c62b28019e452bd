//! Loading of step configuration files.
//!
//! A step file is TOML with optional top-level `executable` and `show-sdk-info`
//! keys and exactly one command table:
//!
//! ```toml
//! executable = "/usr/share/dotnet/dotnet"
//!
//! [nuget-push]
//! root = "out/*.nupkg"
//! api-key = "NUGET_API_KEY"
//! ```

use crate::commands::Step;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid step configuration in {path}: {reason}")]
    Parse { path: PathBuf, reason: String },
}

/// Parse a step from TOML text.
pub fn parse_step(text: &str) -> Result<Step, toml::de::Error> {
    toml::from_str(text)
}

/// Read and parse a step file.
pub fn load_step(path: &Path) -> Result<Step, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let step = parse_step(&text).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    tracing::debug!(path = %path.display(), executable = %step.executable, "loaded step configuration");
    Ok(step)
}
