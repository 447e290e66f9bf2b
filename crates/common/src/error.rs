//! Error types shared across LumaFX crates.

use std::path::PathBuf;

/// Top-level error type for LumaFX operations.
#[derive(Debug, thiserror::Error)]
pub enum LumafxError {
    /// Buffer sizes disagree with the negotiated geometry, or a dimension is zero.
    #[error("Geometry mismatch: {message}")]
    GeometryMismatch { message: String },

    /// The cumulative intensity total of a plane was zero.
    #[error("Degenerate histogram: cumulative intensity total is zero")]
    DegenerateHistogram,

    /// A transient working buffer of `elements` entries could not be reserved.
    #[error("Failed to allocate {elements} elements for {what}")]
    AllocationFailure { what: &'static str, elements: usize },

    /// A frame arrived before any geometry was negotiated.
    #[error("No frame geometry has been negotiated")]
    NotNegotiated,

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using LumafxError.
pub type LumafxResult<T> = Result<T, LumafxError>;

impl LumafxError {
    pub fn geometry_mismatch(msg: impl Into<String>) -> Self {
        Self::GeometryMismatch {
            message: msg.into(),
        }
    }

    pub fn allocation_failure(what: &'static str, elements: usize) -> Self {
        Self::AllocationFailure { what, elements }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }
}
