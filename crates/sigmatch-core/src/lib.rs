//! sigmatch-core - Basic data structures for the signature pipeline
//!
//! This crate provides the data types shared by every pipeline stage:
//!
//! - [`Raster`] / [`RasterMut`] - Decoded 8-bit image (immutable / mutable)
//! - [`BinaryMask`] - Two-level ink/background image
//! - [`Polarity`] - Which sample value denotes ink
//! - [`ImageBox`] - Axis-aligned pixel rectangle

pub mod error;
pub mod geometry;
pub mod mask;
pub mod raster;

pub use error::{Error, Result};
pub use geometry::ImageBox;
pub use mask::{BinaryMask, DARK, LIGHT, Polarity};
pub use raster::convert::luma;
pub use raster::{Channels, Raster, RasterMut};
