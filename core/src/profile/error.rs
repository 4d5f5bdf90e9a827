//! Error types for profile loading

use std::path::PathBuf;
use thiserror::Error;

/// Errors during attribution profile loading
#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("failed to read {path}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse TOML in {path}")]
    ParseToml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("unsupported profile version {version} in {path}")]
    UnsupportedVersion { path: PathBuf, version: u32 },

    #[error("invalid profile in {path}: {reason}")]
    Invalid { path: PathBuf, reason: String },
}
