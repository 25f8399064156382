//! sigmatch-filter - Image filtering operations
//!
//! This crate provides the neighborhood filters used ahead of binarization:
//!
//! - Rank filtering (median) for impulse-noise removal
//! - Separable 1-D kernels (box, Gaussian)
//! - Local mean maps with edge replication, used by adaptive thresholding

pub mod convolve;
mod error;
pub mod kernel;
pub mod rank;

pub use error::{FilterError, FilterResult};
pub use kernel::{Kernel1d, MAX_WINDOW_SIZE};

pub use convolve::{box_mean, gaussian_mean, local_mean};
pub use rank::{DEFAULT_MEDIAN_SIZE, denoise, median_filter, rank_filter};
