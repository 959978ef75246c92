//! Scaling error types.

use std::path::PathBuf;
use thiserror::Error;

/// Fatal errors of a layout transformation.
///
/// Any of these aborts the whole run; no partial layout is produced.
#[derive(Debug, Error)]
pub enum ScaleError {
    #[error("file not found: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("invalid dimensions: {0}")]
    InvalidDimensions(String),

    #[error("malformed layout document at position {position}: {detail}")]
    MalformedDocument { position: u64, detail: String },

    #[error("safe area must be in [0, 100), got {0}")]
    InvalidSafeArea(f64),
}

impl ScaleError {
    pub fn malformed(position: u64, detail: impl Into<String>) -> Self {
        Self::MalformedDocument {
            position,
            detail: detail.into(),
        }
    }
}
