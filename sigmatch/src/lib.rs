//! sigmatch - Handwritten signature verification
//!
//! A signature image is denoised, binarized, thinned to a skeleton and
//! cropped to its ink. The size of that region and its skeleton pixel
//! count form a small feature vector, and two signatures match when their
//! vectors are close enough.
//!
//! # Overview
//!
//! - Image I/O (PNG, JPEG, binary PGM/PPM)
//! - Median noise removal
//! - Adaptive binarization with polarity normalization
//! - Topology-preserving thinning (Guo-Hall, Zhang-Suen)
//! - Region of interest, connected components and contour length
//! - Feature extraction, matching and reference search
//!
//! # Example
//!
//! ```
//! use sigmatch::{Channels, Raster};
//!
//! let blank = Raster::new_filled(120, 80, Channels::Gray, 255).unwrap();
//! let (matched, message) = sigmatch::verify(&blank, &blank, 1000.0);
//! assert!(!matched);
//! println!("{}", message);
//! ```

// Re-export core types (primary data structures used everywhere)
pub use sigmatch_core::*;

// Verification entry points
pub use sigmatch_verify::{Verification, Verifier, VerifyConfig, verify};

// Re-export domain crates as modules to avoid name conflicts
pub use sigmatch_color as color;
pub use sigmatch_filter as filter;
pub use sigmatch_io as io;
pub use sigmatch_morph as morph;
pub use sigmatch_region as region;
pub use sigmatch_verify as verification;
