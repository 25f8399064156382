//! Error types for sigmatch-verify

use thiserror::Error;

/// Errors raised by the processing stages
///
/// Verification itself never returns these; it folds them into
/// [`crate::FailureReason::InvalidImage`].
#[derive(Debug, Error)]
pub enum VerifyError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] sigmatch_core::Error),

    /// Noise filter error
    #[error("filter error: {0}")]
    Filter(#[from] sigmatch_filter::FilterError),

    /// Binarization error
    #[error("binarization error: {0}")]
    Color(#[from] sigmatch_color::ColorError),

    /// Thinning error
    #[error("thinning error: {0}")]
    Morph(#[from] sigmatch_morph::MorphError),

    /// Region extraction error
    #[error("region error: {0}")]
    Region(#[from] sigmatch_region::RegionError),

    /// Configuration rejected
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for verification stages
pub type VerifyResult<T> = Result<T, VerifyError>;
