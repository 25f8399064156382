//! Verification configuration
//!
//! Every field has a default, so a partial JSON document such as
//! `{"min_roi_size": 40}` deserializes into a complete configuration.

use crate::matcher::MatchPolicy;
use crate::{VerifyError, VerifyResult};
use serde::{Deserialize, Serialize};
use sigmatch_color::AdaptiveThresholdOptions;
use sigmatch_core::Polarity;
use sigmatch_filter::{DEFAULT_MEDIAN_SIZE, MAX_WINDOW_SIZE};
use sigmatch_morph::ThinAlgorithm;

/// Smallest ROI side, in pixels, accepted for comparison
pub const DEFAULT_MIN_ROI_SIZE: u32 = 50;

/// Settings shared by both images of a verification
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VerifyConfig {
    /// Ink convention of every mask produced
    pub polarity: Polarity,
    /// Median window side (odd, at most [`MAX_WINDOW_SIZE`], 1 disables
    /// denoising)
    pub median_size: u32,
    /// Adaptive threshold settings
    pub binarize: AdaptiveThresholdOptions,
    /// Skeletonization rule
    pub thin_algorithm: ThinAlgorithm,
    /// Minimum ROI width and height
    pub min_roi_size: u32,
    /// Decision rule
    pub policy: MatchPolicy,
    /// Also compute the contour length descriptor
    pub stroke_length: bool,
}

impl Default for VerifyConfig {
    fn default() -> Self {
        Self {
            polarity: Polarity::default(),
            median_size: DEFAULT_MEDIAN_SIZE,
            binarize: AdaptiveThresholdOptions::default(),
            thin_algorithm: ThinAlgorithm::default(),
            min_roi_size: DEFAULT_MIN_ROI_SIZE,
            policy: MatchPolicy::default(),
            stroke_length: false,
        }
    }
}

impl VerifyConfig {
    /// Same configuration with a Euclidean policy at `threshold`.
    pub fn with_threshold(self, threshold: f64) -> Self {
        Self {
            policy: MatchPolicy::Euclidean { threshold },
            ..self
        }
    }

    /// Check that every setting is usable.
    ///
    /// # Errors
    ///
    /// Returns [`VerifyError::InvalidConfig`] naming the first bad field.
    pub fn validate(&self) -> VerifyResult<()> {
        if self.median_size == 0
            || self.median_size % 2 == 0
            || self.median_size > MAX_WINDOW_SIZE
        {
            return Err(VerifyError::InvalidConfig(format!(
                "median_size must be odd and at most {}, got {}",
                MAX_WINDOW_SIZE, self.median_size
            )));
        }
        let window = self.binarize.window_size;
        if window < 3 || window % 2 == 0 || window > MAX_WINDOW_SIZE {
            return Err(VerifyError::InvalidConfig(format!(
                "binarize.window_size must be odd and in 3..={}, got {}",
                MAX_WINDOW_SIZE, window
            )));
        }
        if !self.binarize.offset.is_finite() {
            return Err(VerifyError::InvalidConfig(
                "binarize.offset must be finite".to_string(),
            ));
        }
        match self.policy {
            MatchPolicy::Euclidean { threshold } if threshold.is_nan() || threshold < 0.0 => {
                Err(VerifyError::InvalidConfig(format!(
                    "threshold must be non-negative, got {}",
                    threshold
                )))
            }
            MatchPolicy::RelativeTolerance { tolerance } if tolerance.is_nan() || tolerance <= 0.0 => {
                Err(VerifyError::InvalidConfig(format!(
                    "tolerance must be positive, got {}",
                    tolerance
                )))
            }
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sigmatch_color::AdaptiveMethod;

    #[test]
    fn test_defaults() {
        let config = VerifyConfig::default();
        assert_eq!(config.polarity, Polarity::DarkInk);
        assert_eq!(config.median_size, 3);
        assert_eq!(config.binarize.window_size, 11);
        assert_eq!(config.binarize.method, AdaptiveMethod::Gaussian);
        assert_eq!(config.thin_algorithm, ThinAlgorithm::GuoHall);
        assert_eq!(config.min_roi_size, 50);
        assert_eq!(config.policy, MatchPolicy::Euclidean { threshold: 1000.0 });
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json() {
        let json = r#"{
            "polarity": "light_ink",
            "thin_algorithm": "zhang_suen",
            "binarize": {"window_size": 15},
            "policy": {"kind": "relative_tolerance", "tolerance": 0.1}
        }"#;
        let config: VerifyConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.polarity, Polarity::LightInk);
        assert_eq!(config.thin_algorithm, ThinAlgorithm::ZhangSuen);
        assert_eq!(config.binarize.window_size, 15);
        assert_eq!(config.binarize.offset, 2.0);
        assert_eq!(
            config.policy,
            MatchPolicy::RelativeTolerance { tolerance: 0.1 }
        );
        assert_eq!(config.min_roi_size, DEFAULT_MIN_ROI_SIZE);
    }

    #[test]
    fn test_validate_rejects() {
        let even_median = VerifyConfig {
            median_size: 4,
            ..Default::default()
        };
        assert!(matches!(
            even_median.validate(),
            Err(VerifyError::InvalidConfig(_))
        ));

        let negative = VerifyConfig::default().with_threshold(-1.0);
        assert!(negative.validate().is_err());

        let nan = VerifyConfig::default().with_threshold(f64::NAN);
        assert!(nan.validate().is_err());

        let mut small_window = VerifyConfig::default();
        small_window.binarize.window_size = 1;
        assert!(small_window.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_oversized_windows() {
        let huge_median = VerifyConfig {
            median_size: 65537,
            ..Default::default()
        };
        assert!(matches!(
            huge_median.validate(),
            Err(VerifyError::InvalidConfig(_))
        ));

        let mut huge_window = VerifyConfig::default();
        huge_window.binarize.window_size = MAX_WINDOW_SIZE + 2;
        assert!(huge_window.validate().is_err());

        let mut largest = VerifyConfig {
            median_size: MAX_WINDOW_SIZE,
            ..Default::default()
        };
        largest.binarize.window_size = MAX_WINDOW_SIZE;
        assert!(largest.validate().is_ok());
    }

    #[test]
    fn test_verifier_refuses_oversized_median() {
        let huge_median = VerifyConfig {
            median_size: 65537,
            ..Default::default()
        };
        let err = crate::Verifier::new(huge_median).unwrap_err();
        assert!(err.to_string().contains("median_size"));
    }
}
