//! Feature comparison
//!
//! The canonical decision is a Euclidean distance over (width, height,
//! black_pixels) compared against a threshold. A relative tolerance
//! policy, where every feature must be close to its counterpart as a
//! fraction of the larger value, is available as an alternative.

use crate::FeatureVector;
use serde::{Deserialize, Serialize};

/// Default maximum distance for a match
pub const DEFAULT_THRESHOLD: f64 = 1000.0;

/// Default fractional tolerance of [`MatchPolicy::RelativeTolerance`]
pub const DEFAULT_TOLERANCE: f64 = 0.2;

/// How two feature vectors are judged
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MatchPolicy {
    /// Match when the Euclidean distance is at most `threshold`
    Euclidean { threshold: f64 },
    /// Match when every feature differs by less than `tolerance` of the
    /// larger of the two values
    RelativeTolerance { tolerance: f64 },
}

impl Default for MatchPolicy {
    fn default() -> Self {
        Self::Euclidean {
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

/// Outcome of comparing two feature vectors
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult {
    /// Euclidean distance between the vectors
    pub distance: f64,
    /// Decision under the policy used
    pub is_match: bool,
    /// Human-readable summary
    pub message: String,
}

/// Euclidean distance over width, height and black_pixels.
pub fn distance(a: &FeatureVector, b: &FeatureVector) -> f64 {
    let dw = a.width() as f64 - b.width() as f64;
    let dh = a.height() as f64 - b.height() as f64;
    let db = a.black_pixels() as f64 - b.black_pixels() as f64;
    (dw * dw + dh * dh + db * db).sqrt()
}

/// Compare under the Euclidean policy.
pub fn compare(reference: &FeatureVector, test: &FeatureVector, threshold: f64) -> MatchResult {
    let distance = distance(reference, test);
    let is_match = distance <= threshold;
    let message = if is_match {
        format!(
            "Signature matches the reference (distance {:.2} <= {:.2})",
            distance, threshold
        )
    } else {
        format!(
            "Signature not recognized (distance {:.2} > {:.2})",
            distance, threshold
        )
    };
    MatchResult {
        distance,
        is_match,
        message,
    }
}

/// Relative difference `|a - b| / max(a, b)`; two zeros differ by 0.
fn relative_difference(a: f64, b: f64) -> f64 {
    let larger = a.max(b);
    if larger == 0.0 {
        return 0.0;
    }
    (a - b).abs() / larger
}

/// Compare under an explicit policy.
///
/// The reported distance is always the Euclidean one.
pub fn compare_with_policy(
    reference: &FeatureVector,
    test: &FeatureVector,
    policy: &MatchPolicy,
) -> MatchResult {
    let tolerance = match *policy {
        MatchPolicy::Euclidean { threshold } => return compare(reference, test, threshold),
        MatchPolicy::RelativeTolerance { tolerance } => tolerance,
    };

    let distance = distance(reference, test);
    let pairs = [
        ("width", reference.width() as f64, test.width() as f64),
        ("height", reference.height() as f64, test.height() as f64),
        (
            "black_pixels",
            reference.black_pixels() as f64,
            test.black_pixels() as f64,
        ),
    ];
    let failing = pairs
        .iter()
        .map(|&(name, a, b)| (name, relative_difference(a, b)))
        .find(|&(_, diff)| diff >= tolerance);

    match failing {
        None => MatchResult {
            distance,
            is_match: true,
            message: format!(
                "Signature matches the reference (all features within {:.0}%)",
                tolerance * 100.0
            ),
        },
        Some((name, diff)) => MatchResult {
            distance,
            is_match: false,
            message: format!(
                "Signature not recognized ({} differs by {:.1}%, limit {:.0}%)",
                name,
                diff * 100.0,
                tolerance * 100.0
            ),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_vectors() {
        let f = FeatureVector::new(300, 120, 2500);
        for threshold in [0.0, 1.0, DEFAULT_THRESHOLD] {
            let r = compare(&f, &f, threshold);
            assert_eq!(r.distance, 0.0);
            assert!(r.is_match);
        }
    }

    #[test]
    fn test_distance_and_boundary() {
        let a = FeatureVector::new(100, 100, 1000);
        let b = FeatureVector::new(103, 104, 1000);
        assert!((distance(&a, &b) - 5.0).abs() < 1e-12);
        assert!(compare(&a, &b, 5.0).is_match);
        assert!(!compare(&a, &b, 4.999).is_match);
        assert!(compare(&a, &b, 5.0).message.contains("matches"));
    }

    #[test]
    fn test_stroke_length_ignored() {
        let a = FeatureVector::new(10, 10, 10).with_stroke_length(40.0);
        let b = FeatureVector::new(10, 10, 10).with_stroke_length(4000.0);
        assert_eq!(distance(&a, &b), 0.0);
    }

    #[test]
    fn test_relative_tolerance() {
        let policy = MatchPolicy::RelativeTolerance {
            tolerance: DEFAULT_TOLERANCE,
        };
        let a = FeatureVector::new(100, 50, 1000);
        let close = FeatureVector::new(110, 45, 900);
        let r = compare_with_policy(&a, &close, &policy);
        assert!(r.is_match);
        assert!((r.distance - distance(&a, &close)).abs() < 1e-12);

        // 25% fewer ink pixels fails even though width and height agree
        let sparse = FeatureVector::new(100, 50, 750);
        let r = compare_with_policy(&a, &sparse, &policy);
        assert!(!r.is_match);
        assert!(r.message.contains("black_pixels"));
    }

    #[test]
    fn test_relative_tolerance_zeros() {
        let policy = MatchPolicy::RelativeTolerance { tolerance: 0.2 };
        let z = FeatureVector::new(0, 0, 0);
        assert!(compare_with_policy(&z, &z, &policy).is_match);
    }

    #[test]
    fn test_default_policy_is_euclidean() {
        let a = FeatureVector::new(100, 100, 1000);
        let b = FeatureVector::new(100, 100, 1900);
        let r = compare_with_policy(&a, &b, &MatchPolicy::default());
        assert_eq!(r, compare(&a, &b, DEFAULT_THRESHOLD));
        assert!(r.is_match);
    }
}
