//! Shape descriptors of a signature region
//!
//! A signature is summarized by the size of its ink region and the number
//! of skeleton pixels inside it. The outer contour length is available as
//! an auxiliary descriptor but is not used by the default distance.

use crate::VerifyResult;
use serde::{Deserialize, Serialize};
use sigmatch_region::{RegionOfInterest, stroke_length};

/// Descriptor of one processed signature
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    width: u32,
    height: u32,
    black_pixels: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    stroke_length: Option<f64>,
}

impl FeatureVector {
    /// Create a descriptor without a stroke length.
    pub fn new(width: u32, height: u32, black_pixels: u64) -> Self {
        Self {
            width,
            height,
            black_pixels,
            stroke_length: None,
        }
    }

    /// Same descriptor with a stroke length attached.
    pub fn with_stroke_length(self, length: f64) -> Self {
        Self {
            stroke_length: Some(length),
            ..self
        }
    }

    /// Width of the ink region in pixels
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height of the ink region in pixels
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Ink pixels inside the region
    #[inline]
    pub fn black_pixels(&self) -> u64 {
        self.black_pixels
    }

    /// Total external contour length, if it was computed
    #[inline]
    pub fn stroke_length(&self) -> Option<f64> {
        self.stroke_length
    }

    /// Width divided by height.
    pub fn aspect_ratio(&self) -> f64 {
        if self.height == 0 {
            return 0.0;
        }
        self.width as f64 / self.height as f64
    }

    /// Fraction of the region covered by ink.
    pub fn density(&self) -> f64 {
        let area = self.width as u64 * self.height as u64;
        if area == 0 {
            return 0.0;
        }
        self.black_pixels as f64 / area as f64
    }
}

/// Which optional descriptors to compute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureOptions {
    /// Compute the external contour length
    pub stroke_length: bool,
}

/// Compute the descriptor of a region of interest.
pub fn extract_features(
    roi: &RegionOfInterest,
    options: &FeatureOptions,
) -> VerifyResult<FeatureVector> {
    let features = FeatureVector::new(roi.width(), roi.height(), roi.mask().count_ink());
    if !options.stroke_length {
        return Ok(features);
    }
    let length = stroke_length(roi.mask())?;
    Ok(features.with_stroke_length(length))
}

#[cfg(test)]
mod tests {
    use super::*;
    use sigmatch_core::{BinaryMask, Polarity};
    use sigmatch_region::extract_roi;

    fn roi_from(rows: &[&str], polarity: Polarity) -> RegionOfInterest {
        let h = rows.len() as u32;
        let w = rows[0].len() as u32;
        let ink: Vec<bool> = rows
            .iter()
            .flat_map(|r| r.bytes().map(|b| b == b'#'))
            .collect();
        let mask = BinaryMask::from_ink(w, h, polarity, &ink).unwrap();
        extract_roi(&mask).unwrap().unwrap()
    }

    #[test]
    fn test_five_by_six_fixture() {
        let rows = [
            "......",
            ".###..",
            "..###.",
            "...#..",
            "......",
        ];
        for polarity in [Polarity::DarkInk, Polarity::LightInk] {
            let roi = roi_from(&rows, polarity);
            let f = extract_features(&roi, &FeatureOptions::default()).unwrap();
            assert_eq!(f.width(), 4);
            assert_eq!(f.height(), 3);
            assert_eq!(f.black_pixels(), 7);
            assert_eq!(f.stroke_length(), None);
        }
    }

    #[test]
    fn test_stroke_length_option() {
        let roi = roi_from(&["....", ".###", "...."], Polarity::DarkInk);
        let opts = FeatureOptions {
            stroke_length: true,
        };
        let f = extract_features(&roi, &opts).unwrap();
        assert_eq!(f.stroke_length(), Some(4.0));
    }

    #[test]
    fn test_derived_descriptors() {
        let f = FeatureVector::new(200, 50, 1000);
        assert!((f.aspect_ratio() - 4.0).abs() < 1e-12);
        assert!((f.density() - 0.1).abs() < 1e-12);
        let zero = FeatureVector::new(0, 0, 0);
        assert_eq!(zero.aspect_ratio(), 0.0);
        assert_eq!(zero.density(), 0.0);
    }

    #[test]
    fn test_serde_skips_missing_length() {
        let f = FeatureVector::new(3, 4, 5);
        let json = serde_json::to_string(&f).unwrap();
        assert_eq!(json, r#"{"width":3,"height":4,"black_pixels":5}"#);
        let back: FeatureVector = serde_json::from_str(&json).unwrap();
        assert_eq!(back, f);
    }
}
