//! sigmatch-color - Grayscale to ink/background conversion
//!
//! - **Thresholding** ([`threshold`]): local adaptive thresholding with
//!   polarity normalization

pub mod error;
pub mod threshold;

pub use sigmatch_core;

pub use error::{ColorError, ColorResult};

pub use threshold::{
    // Types
    AdaptiveMethod,
    AdaptiveThresholdOptions,
    // Functions
    adaptive_threshold,
    binarize,
};
