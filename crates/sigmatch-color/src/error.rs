//! Error types for sigmatch-color

use thiserror::Error;

/// Errors that can occur during binarization
#[derive(Debug, Error)]
pub enum ColorError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] sigmatch_core::Error),

    /// Error from the local-mean filters
    #[error("filter error: {0}")]
    Filter(#[from] sigmatch_filter::FilterError),

    /// Unsupported channel count for this operation
    #[error("unsupported channels: expected {expected}, got {actual}")]
    UnsupportedChannels { expected: &'static str, actual: u32 },

    /// Invalid parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),
}

/// Result type for binarization operations
pub type ColorResult<T> = Result<T, ColorError>;
