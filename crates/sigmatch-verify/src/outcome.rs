//! Verification outcomes
//!
//! Verification never returns an error: every way a comparison can fail to
//! reach a decision is a [`FailureReason`] carried in the outcome.

use crate::FeatureVector;
use crate::matcher::MatchResult;
use std::fmt;
use thiserror::Error;

/// Which of the two images a message is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageRole {
    /// Image being verified
    Input,
    /// Stored reference image
    Reference,
}

impl fmt::Display for ImageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageRole::Input => write!(f, "input"),
            ImageRole::Reference => write!(f, "reference"),
        }
    }
}

/// Why a verification ended without a decision
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FailureReason {
    /// A processing stage rejected the image
    #[error("invalid image: {0}")]
    InvalidImage(String),

    /// Binarization left no ink pixels
    #[error("no signature found in the {0} image")]
    EmptyInkRegion(ImageRole),

    /// The ink region is below the minimum viable size
    #[error("{role} signature region {width}x{height} is smaller than {min}x{min}")]
    ImageTooSmall {
        role: ImageRole,
        width: u32,
        height: u32,
        min: u32,
    },

    /// The named reference is not in the store
    #[error("reference not found: {0}")]
    ReferenceMissing(String),
}

/// Terminal state of one verification
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Decision reached, signature accepted
    Matched,
    /// Decision reached, signature rejected
    NotMatched,
    /// No decision could be made
    Failed(FailureReason),
}

/// Everything known at the end of a verification
#[derive(Debug, Clone, PartialEq)]
pub struct Verification {
    /// Terminal state
    pub outcome: Outcome,
    /// Comparison details, present once the decision stage ran
    pub match_result: Option<MatchResult>,
    /// Input descriptor, if it was computed
    pub input: Option<FeatureVector>,
    /// Reference descriptor, if it was computed
    pub reference: Option<FeatureVector>,
}

impl Verification {
    pub(crate) fn failed(reason: FailureReason) -> Self {
        Self {
            outcome: Outcome::Failed(reason),
            match_result: None,
            input: None,
            reference: None,
        }
    }

    /// True only for [`Outcome::Matched`].
    pub fn is_match(&self) -> bool {
        self.outcome == Outcome::Matched
    }

    /// The failure reason, if the verification failed.
    pub fn failure(&self) -> Option<&FailureReason> {
        match &self.outcome {
            Outcome::Failed(reason) => Some(reason),
            _ => None,
        }
    }

    /// Human-readable summary of the outcome.
    pub fn message(&self) -> String {
        match (&self.outcome, &self.match_result) {
            (Outcome::Failed(reason), _) => format!("Verification failed: {}", reason),
            (_, Some(result)) => result.message.clone(),
            (Outcome::Matched, None) => "Signature matches the reference".to_string(),
            (Outcome::NotMatched, None) => "Signature not recognized".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_messages() {
        let empty = FailureReason::EmptyInkRegion(ImageRole::Reference);
        assert_eq!(empty.to_string(), "no signature found in the reference image");

        let small = FailureReason::ImageTooSmall {
            role: ImageRole::Input,
            width: 30,
            height: 12,
            min: 50,
        };
        assert_eq!(
            small.to_string(),
            "input signature region 30x12 is smaller than 50x50"
        );
    }

    #[test]
    fn test_verification_message() {
        let v = Verification::failed(FailureReason::ReferenceMissing("bob".into()));
        assert!(!v.is_match());
        assert_eq!(v.message(), "Verification failed: reference not found: bob");
        assert!(matches!(
            v.failure(),
            Some(FailureReason::ReferenceMissing(name)) if name == "bob"
        ));
    }
}
