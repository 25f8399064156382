//! sigmatch-morph - Binary morphology for the signature pipeline
//!
//! # Thinning
//!
//! [`thin`] reduces ink strokes to 1-pixel wide skeletons while keeping
//! the number of 8-connected components unchanged.
//!
//! ```
//! use sigmatch_core::{BinaryMask, Polarity};
//! use sigmatch_morph::{ThinAlgorithm, thin};
//!
//! let mut mask = BinaryMask::new(9, 9, Polarity::DarkInk).unwrap();
//! for y in 3..6 {
//!     for x in 1..8 {
//!         mask.set_ink(x, y, true).unwrap();
//!     }
//! }
//! let skeleton = thin(&mask, ThinAlgorithm::GuoHall).unwrap();
//! assert!(skeleton.count_ink() < mask.count_ink());
//! ```

pub mod error;
pub mod thin;

pub use error::{MorphError, MorphResult};
pub use thin::{ThinAlgorithm, ThinStats, thin, thin_with_stats};
