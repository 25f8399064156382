//! sigmatch-verify - Signature verification
//!
//! This crate ties the processing stages together:
//!
//! - **Features**: Size and ink count of the thinned signature region
//! - **Matching**: Euclidean distance against a threshold, or a relative
//!   tolerance per feature
//! - **Pipeline**: Denoise, binarize, thin, crop and compare two images
//! - **References**: Named enrolled signatures and best-of-N search
//!
//! # Quick Start
//!
//! ```no_run
//! use sigmatch_core::Raster;
//! use sigmatch_verify::{Verifier, VerifyConfig, TracingSink};
//!
//! # fn load(_: &str) -> Raster { unimplemented!() }
//! let input = load("input.png");
//! let reference = load("reference.png");
//!
//! let verifier = Verifier::new(VerifyConfig::default().with_threshold(800.0)).unwrap();
//! let verification = verifier.verify(&input, &reference, &mut TracingSink);
//! println!("{}", verification.message());
//! ```
//!
//! # Modules
//!
//! - [`features`]: Feature vectors
//! - [`matcher`]: Distance and decision
//! - [`pipeline`]: The [`Verifier`]
//! - [`reference`]: Reference stores
//! - [`events`]: Progress reporting

pub mod config;
mod error;
pub mod events;
pub mod features;
pub mod matcher;
pub mod outcome;
pub mod pipeline;
pub mod reference;

pub use error::{VerifyError, VerifyResult};

pub use config::{DEFAULT_MIN_ROI_SIZE, VerifyConfig};
pub use events::{EventSink, NullSink, TracingSink, VerifyEvent, VerifyStage};
pub use features::{FeatureOptions, FeatureVector, extract_features};
pub use matcher::{
    DEFAULT_THRESHOLD, DEFAULT_TOLERANCE, MatchPolicy, MatchResult, compare, compare_with_policy,
    distance,
};
pub use outcome::{FailureReason, ImageRole, Outcome, Verification};
pub use pipeline::{ProcessedSignature, Verifier, verify};
pub use reference::{
    BestMatch, MemoryReferenceStore, ReferenceEntry, ReferenceStore, find_best_match,
};

// Re-export core for convenience
pub use sigmatch_core;
