//! Errors from loading external configuration
//!
//! The simulation itself never fails; only reading settings can.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid settings JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("unknown game mode '{0}' (expected 'versus-ai', 'two-player' or 'demo')")]
    UnknownMode(String),
}
