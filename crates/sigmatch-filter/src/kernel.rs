//! Separable convolution kernels
//!
//! Both kernels used by the pipeline (uniform box and Gaussian) are
//! separable, so they are stored as a single normalized 1-D profile that
//! is applied along rows and then columns.

use crate::{FilterError, FilterResult};

/// Largest window side accepted by the kernels and the rank filter.
pub const MAX_WINDOW_SIZE: u32 = 255;

/// A normalized, odd-length 1-D kernel
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel1d {
    weights: Vec<f32>,
}

impl Kernel1d {
    /// Create a kernel from raw weights, normalizing them to sum 1.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::InvalidKernel`] for an even length or a
    /// non-positive weight sum.
    pub fn from_weights(weights: &[f32]) -> FilterResult<Self> {
        if weights.is_empty() || weights.len() % 2 == 0 {
            return Err(FilterError::InvalidKernel(format!(
                "kernel length must be odd, got {}",
                weights.len()
            )));
        }
        let sum: f32 = weights.iter().sum();
        if sum <= 0.0 {
            return Err(FilterError::InvalidKernel(format!(
                "kernel weights must sum to a positive value, got {}",
                sum
            )));
        }
        Ok(Self {
            weights: weights.iter().map(|w| w / sum).collect(),
        })
    }

    /// Uniform averaging kernel of odd `size`.
    pub fn box_kernel(size: u32) -> FilterResult<Self> {
        check_size(size)?;
        Self::from_weights(&vec![1.0; size as usize])
    }

    /// Gaussian kernel of odd `size`.
    ///
    /// A non-positive `sigma` is replaced by [`Kernel1d::sigma_for_size`].
    pub fn gaussian(size: u32, sigma: f32) -> FilterResult<Self> {
        check_size(size)?;
        let sigma = if sigma > 0.0 {
            sigma
        } else {
            Self::sigma_for_size(size)
        };
        let half = (size / 2) as i32;
        let denom = 2.0 * sigma * sigma;
        let weights: Vec<f32> = (-half..=half)
            .map(|i| (-((i * i) as f32) / denom).exp())
            .collect();
        Self::from_weights(&weights)
    }

    /// Conventional sigma for a Gaussian window of `size` samples.
    ///
    /// `0.3 * ((size - 1) / 2 - 1) + 0.8`, which gives 2.0 for size 11.
    pub fn sigma_for_size(size: u32) -> f32 {
        0.3 * ((size as f32 - 1.0) * 0.5 - 1.0) + 0.8
    }

    /// Number of taps.
    #[inline]
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// Always false; kernels have at least one tap.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Distance from the center tap to either end.
    #[inline]
    pub fn half(&self) -> usize {
        self.weights.len() / 2
    }

    /// Normalized weights.
    #[inline]
    pub fn weights(&self) -> &[f32] {
        &self.weights
    }
}

pub(crate) fn check_size(size: u32) -> FilterResult<()> {
    if size == 0 || size % 2 == 0 {
        return Err(FilterError::InvalidParameters(format!(
            "window size must be odd and positive, got {}",
            size
        )));
    }
    if size > MAX_WINDOW_SIZE {
        return Err(FilterError::InvalidParameters(format!(
            "window size must be at most {}, got {}",
            MAX_WINDOW_SIZE, size
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_box_kernel() {
        let k = Kernel1d::box_kernel(5).unwrap();
        assert_eq!(k.len(), 5);
        assert_eq!(k.half(), 2);
        for &w in k.weights() {
            assert!((w - 0.2).abs() < 1e-6);
        }
        assert!(Kernel1d::box_kernel(4).is_err());
        assert!(Kernel1d::box_kernel(0).is_err());
        assert!(Kernel1d::box_kernel(MAX_WINDOW_SIZE).is_ok());
        assert!(Kernel1d::gaussian(MAX_WINDOW_SIZE + 2, 0.0).is_err());
    }

    #[test]
    fn test_gaussian_kernel_normalized_and_symmetric() {
        let k = Kernel1d::gaussian(11, 0.0).unwrap();
        let sum: f32 = k.weights().iter().sum();
        assert!((sum - 1.0).abs() < 1e-5);
        for i in 0..5 {
            assert!((k.weights()[i] - k.weights()[10 - i]).abs() < 1e-7);
            assert!(k.weights()[i] < k.weights()[i + 1]);
        }
    }

    #[test]
    fn test_sigma_for_size() {
        assert!((Kernel1d::sigma_for_size(11) - 2.0).abs() < 1e-6);
        assert!((Kernel1d::sigma_for_size(3) - 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_from_weights_rejects_bad_input() {
        assert!(Kernel1d::from_weights(&[1.0, 1.0]).is_err());
        assert!(Kernel1d::from_weights(&[0.0, 0.0, 0.0]).is_err());
        assert!(Kernel1d::from_weights(&[]).is_err());
    }
}
