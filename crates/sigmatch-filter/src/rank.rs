//! Rank filtering operations
//!
//! Provides the rank (order-statistic) filter and the median filter built
//! on it. Every channel is filtered independently and window samples
//! outside the image replicate the nearest edge pixel.

use crate::kernel::check_size;
use crate::{FilterError, FilterResult};
use sigmatch_core::Raster;
use tracing::debug;

/// Window size of the noise-removal median filter.
pub const DEFAULT_MEDIAN_SIZE: u32 = 3;

/// Apply a rank filter.
///
/// # Arguments
/// * `raster` - Input grayscale or RGB raster
/// * `width` - Filter window width (odd)
/// * `height` - Filter window height (odd)
/// * `rank` - Rank value in [0.0, 1.0] (0.0=min, 0.5=median, 1.0=max)
///
/// # Errors
///
/// Returns [`FilterError::InvalidParameters`] for an even, zero or
/// oversized window (see [`MAX_WINDOW_SIZE`](crate::MAX_WINDOW_SIZE)) or a
/// rank outside [0, 1].
pub fn rank_filter(raster: &Raster, width: u32, height: u32, rank: f32) -> FilterResult<Raster> {
    check_size(width)?;
    check_size(height)?;
    if !(0.0..=1.0).contains(&rank) {
        return Err(FilterError::InvalidParameters(format!(
            "rank must be in [0, 1], got {}",
            rank
        )));
    }
    if width == 1 && height == 1 {
        return Ok(raster.clone());
    }

    let n = width as usize * height as usize;
    let rank_index = (rank * (n - 1) as f32 + 0.5) as usize;
    let hw = (width / 2) as i64;
    let hh = (height / 2) as i64;
    let channels = raster.channels().count();

    let mut out = raster.to_mut();
    let mut window = Vec::with_capacity(n);
    let stride = raster.stride();
    let data = out.data_mut();

    for y in 0..raster.height() as i64 {
        for x in 0..raster.width() as i64 {
            for c in 0..channels {
                window.clear();
                for dy in -hh..=hh {
                    for dx in -hw..=hw {
                        window.push(raster.sample_clamped(x + dx, y + dy, c));
                    }
                }
                let (_, &mut v, _) = window.select_nth_unstable(rank_index);
                data[y as usize * stride + x as usize * channels as usize + c as usize] = v;
            }
        }
    }

    Ok(out.into())
}

/// Apply median filter (rank = 0.5).
pub fn median_filter(raster: &Raster, width: u32, height: u32) -> FilterResult<Raster> {
    rank_filter(raster, width, height, 0.5)
}

/// Remove impulse noise with a 3x3 median on each channel.
pub fn denoise(raster: &Raster) -> FilterResult<Raster> {
    debug!(
        width = raster.width(),
        height = raster.height(),
        channels = raster.channels().count(),
        "median denoise"
    );
    median_filter(raster, DEFAULT_MEDIAN_SIZE, DEFAULT_MEDIAN_SIZE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sigmatch_core::Channels;

    fn gray(width: u32, height: u32, data: Vec<u8>) -> Raster {
        Raster::from_raw(width, height, Channels::Gray, data).unwrap()
    }

    #[test]
    fn test_median_removes_isolated_speck() {
        let mut data = vec![200u8; 25];
        data[12] = 0;
        let out = median_filter(&gray(5, 5, data), 3, 3).unwrap();
        assert!(out.data().iter().all(|&v| v == 200));
    }

    #[test]
    fn test_median_keeps_thick_line() {
        // 3-pixel tall dark band survives a 3x3 median
        let mut data = vec![255u8; 9 * 9];
        for y in 3..6 {
            for x in 0..9 {
                data[y * 9 + x] = 0;
            }
        }
        let src = gray(9, 9, data);
        let out = median_filter(&src, 3, 3).unwrap();
        assert!(out.equals(&src));
    }

    #[test]
    fn test_rank_extremes() {
        let src = gray(3, 1, vec![10, 50, 90]);
        let min = rank_filter(&src, 3, 1, 0.0).unwrap();
        let max = rank_filter(&src, 3, 1, 1.0).unwrap();
        // Edges replicate: windows are [10,10,50], [10,50,90], [50,90,90]
        assert_eq!(min.data(), &[10, 10, 50]);
        assert_eq!(max.data(), &[50, 90, 90]);
    }

    #[test]
    fn test_channels_filtered_independently() {
        let mut raster = Raster::new_filled(3, 3, Channels::Rgb, 100)
            .unwrap()
            .to_mut();
        raster.set_rgb(1, 1, 255, 0, 100).unwrap();
        let out = denoise(&raster.into()).unwrap();
        assert_eq!(out.get_rgb(1, 1), Some((100, 100, 100)));
    }

    #[test]
    fn test_identity_window() {
        let src = gray(2, 2, vec![1, 2, 3, 4]);
        let out = rank_filter(&src, 1, 1, 0.5).unwrap();
        assert!(out.equals(&src));
    }

    #[test]
    fn test_invalid_parameters() {
        let src = gray(2, 2, vec![1, 2, 3, 4]);
        assert!(median_filter(&src, 2, 3).is_err());
        assert!(median_filter(&src, 3, 0).is_err());
        assert!(rank_filter(&src, 3, 3, 1.5).is_err());
    }

    #[test]
    fn test_oversized_window_rejected() {
        let src = gray(4, 4, vec![7; 16]);
        assert!(matches!(
            median_filter(&src, 65537, 65537),
            Err(FilterError::InvalidParameters(_))
        ));
        assert!(median_filter(&src, crate::MAX_WINDOW_SIZE + 2, 3).is_err());
        let out = median_filter(&src, crate::MAX_WINDOW_SIZE, 1).unwrap();
        assert!(out.equals(&src));
    }
}
