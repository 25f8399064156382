//! Adaptive thresholding
//!
//! Each pixel is compared against the weighted mean of its N x N
//! neighborhood minus a small offset. Pixels brighter than that local
//! threshold are background, everything else is ink. The result is then
//! normalized so that ink is the minority: a page whose dark-ink
//! rendering averages below mid-gray has its classes swapped.

use crate::{ColorError, ColorResult};
use serde::{Deserialize, Serialize};
use sigmatch_core::{BinaryMask, Polarity, Raster};
use sigmatch_filter::{box_mean, gaussian_mean};
use tracing::debug;

/// Mean brightness below which the ink/background classes are swapped
const INVERSION_LEVEL: f64 = 127.0;

/// Options for adaptive thresholding
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdaptiveThresholdOptions {
    /// Size of the local window (odd, at least 3)
    pub window_size: u32,
    /// Constant subtracted from the local mean
    pub offset: f32,
    /// Method for computing the local mean
    pub method: AdaptiveMethod,
}

/// Method for adaptive threshold computation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdaptiveMethod {
    /// Use mean of local window
    Mean,
    /// Use Gaussian-weighted mean
    #[default]
    Gaussian,
}

impl Default for AdaptiveThresholdOptions {
    fn default() -> Self {
        Self {
            window_size: 11,
            offset: 2.0,
            method: AdaptiveMethod::Gaussian,
        }
    }
}

/// Classify every pixel of a grayscale raster as ink or background.
///
/// Returns row-major ink flags, already normalized so that ink is the
/// darker minority class.
///
/// # Errors
///
/// Returns [`ColorError::UnsupportedChannels`] for RGB input and
/// [`ColorError::InvalidParameters`] for an even window or one smaller
/// than 3.
pub fn adaptive_threshold(
    gray: &Raster,
    options: &AdaptiveThresholdOptions,
) -> ColorResult<Vec<bool>> {
    if !gray.is_gray() {
        return Err(ColorError::UnsupportedChannels {
            expected: "1",
            actual: gray.channels().count(),
        });
    }
    if options.window_size < 3 || options.window_size % 2 == 0 {
        return Err(ColorError::InvalidParameters(format!(
            "window size must be odd and at least 3, got {}",
            options.window_size
        )));
    }

    let mean = match options.method {
        AdaptiveMethod::Mean => box_mean(gray, options.window_size)?,
        AdaptiveMethod::Gaussian => gaussian_mean(gray, options.window_size, 0.0)?,
    };

    let mut ink: Vec<bool> = gray
        .data()
        .iter()
        .zip(&mean)
        .map(|(&v, &m)| v as f32 <= m - options.offset)
        .collect();

    // Brightness of the dark-ink rendering: background pixels are 255
    let background = ink.iter().filter(|&&i| !i).count() as f64;
    let brightness = 255.0 * background / ink.len() as f64;
    let inverted = brightness < INVERSION_LEVEL;
    if inverted {
        for i in ink.iter_mut() {
            *i = !*i;
        }
    }

    debug!(
        width = gray.width(),
        height = gray.height(),
        window = options.window_size,
        offset = options.offset,
        brightness,
        inverted,
        "adaptive threshold"
    );

    Ok(ink)
}

/// Binarize a grayscale raster into a mask of the given polarity.
pub fn binarize(
    gray: &Raster,
    options: &AdaptiveThresholdOptions,
    polarity: Polarity,
) -> ColorResult<BinaryMask> {
    let ink = adaptive_threshold(gray, options)?;
    Ok(BinaryMask::from_ink(gray.width(), gray.height(), polarity, &ink)?)
}
