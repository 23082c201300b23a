//! Harness error type.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid seed '{0}': expected decimal or 0x-prefixed hex")]
    InvalidSeed(String),
    #[error("{path}: {count} structured log violation(s)")]
    LogValidation { path: String, count: usize },
    #[error("{failed} of {total} properties failed")]
    PropertiesFailed { failed: usize, total: usize },
}
