//! sigmatch-region - Region processing for the signature pipeline
//!
//! This crate provides:
//!
//! - **Region of interest** ([`roi`]) - Tight ink bounding box and crop
//! - **Connected components** ([`conncomp`]) - 8-connected ink labeling
//! - **Contours** ([`contour`]) - Outer border tracing and stroke length
//!
//! # Examples
//!
//! ```
//! use sigmatch_core::{BinaryMask, Polarity};
//! use sigmatch_region::{extract_roi, find_components};
//!
//! let mut mask = BinaryMask::new(20, 10, Polarity::DarkInk).unwrap();
//! mask.set_ink(3, 2, true).unwrap();
//! mask.set_ink(4, 3, true).unwrap();
//! mask.set_ink(12, 7, true).unwrap();
//!
//! assert_eq!(find_components(&mask).len(), 2);
//!
//! let roi = extract_roi(&mask).unwrap().unwrap();
//! assert_eq!((roi.width(), roi.height()), (10, 6));
//! ```

pub mod conncomp;
pub mod contour;
pub mod error;
pub mod roi;

pub use conncomp::{ConnectedComponent, find_components, label_components};
pub use contour::{Border, BorderPoint, Direction, external_borders, stroke_length, trace_outer_border};
pub use error::{RegionError, RegionResult};
pub use roi::{RegionOfInterest, extract_roi, ink_bounds};
