//! Crate-level error type

use thiserror::Error;

use crate::classifier::ClassifyError;
use crate::messaging::FabricError;

/// Errors surfaced by the badge runtime
#[derive(Debug, Error)]
pub enum BadgeError {
    #[error("classification failed: {0}")]
    Classify(#[from] ClassifyError),

    #[error("messaging failed: {0}")]
    Fabric(#[from] FabricError),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, BadgeError>;
