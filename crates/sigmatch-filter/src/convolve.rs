//! Separable local-mean maps
//!
//! Computes, for every pixel of a grayscale raster, the kernel-weighted
//! mean of its neighborhood. Rows are filtered first, then columns.
//! Samples outside the image replicate the nearest edge pixel.

use crate::{FilterError, FilterResult, Kernel1d};
use sigmatch_core::Raster;

/// Weighted local mean of a grayscale raster.
///
/// Returns one `f32` per pixel in row-major order.
///
/// # Errors
///
/// Returns [`FilterError::UnsupportedChannels`] for RGB input.
pub fn local_mean(raster: &Raster, kernel: &Kernel1d) -> FilterResult<Vec<f32>> {
    if !raster.is_gray() {
        return Err(FilterError::UnsupportedChannels {
            expected: "1",
            actual: raster.channels().count(),
        });
    }

    let w = raster.width() as usize;
    let h = raster.height() as usize;
    let half = kernel.half() as i64;
    let weights = kernel.weights();
    let src = raster.data();

    // Horizontal pass
    let mut tmp = vec![0.0f32; w * h];
    for y in 0..h {
        let row = &src[y * w..(y + 1) * w];
        for x in 0..w {
            let mut acc = 0.0f32;
            for (k, &wt) in weights.iter().enumerate() {
                let xx = (x as i64 + k as i64 - half).clamp(0, w as i64 - 1) as usize;
                acc += wt * row[xx] as f32;
            }
            tmp[y * w + x] = acc;
        }
    }

    // Vertical pass
    let mut out = vec![0.0f32; w * h];
    for y in 0..h {
        for x in 0..w {
            let mut acc = 0.0f32;
            for (k, &wt) in weights.iter().enumerate() {
                let yy = (y as i64 + k as i64 - half).clamp(0, h as i64 - 1) as usize;
                acc += wt * tmp[yy * w + x];
            }
            out[y * w + x] = acc;
        }
    }

    Ok(out)
}

/// Uniform mean over a `size` x `size` window.
pub fn box_mean(raster: &Raster, size: u32) -> FilterResult<Vec<f32>> {
    let kernel = Kernel1d::box_kernel(size)?;
    local_mean(raster, &kernel)
}

/// Gaussian-weighted mean over a `size` x `size` window.
///
/// A non-positive `sigma` derives one from the window size.
pub fn gaussian_mean(raster: &Raster, size: u32, sigma: f32) -> FilterResult<Vec<f32>> {
    let kernel = Kernel1d::gaussian(size, sigma)?;
    local_mean(raster, &kernel)
}
