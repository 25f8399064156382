//! Signature verification pipeline
//!
//! Both images of a verification go through the same stages:
//!
//! ```text
//! raster -> median denoise -> grayscale -> adaptive binarize
//!        -> thin -> crop to ink -> features
//! ```
//!
//! and the two descriptors are then compared under the configured
//! [`MatchPolicy`](crate::MatchPolicy).

use crate::config::VerifyConfig;
use crate::events::{EventSink, TracingSink, VerifyEvent, VerifyStage};
use crate::features::{FeatureOptions, FeatureVector, extract_features};
use crate::matcher::compare_with_policy;
use crate::outcome::{FailureReason, ImageRole, Outcome, Verification};
use crate::reference::{ReferenceEntry, ReferenceStore};
use crate::{VerifyError, VerifyResult};
use sigmatch_color::binarize;
use sigmatch_core::{BinaryMask, Raster};
use sigmatch_filter::median_filter;
use sigmatch_morph::{ThinStats, thin_with_stats};
use sigmatch_region::{RegionOfInterest, extract_roi};
use tracing::debug;

/// Every intermediate produced while processing one image
#[derive(Debug, Clone)]
pub struct ProcessedSignature {
    /// Median-filtered input, same channels as the input
    pub denoised: Raster,
    /// Grayscale conversion of `denoised`
    pub gray: Raster,
    /// Adaptive threshold result
    pub binary: BinaryMask,
    /// Thinned `binary`
    pub skeleton: BinaryMask,
    /// Work done by thinning
    pub thin_stats: ThinStats,
    /// Skeleton cropped to its ink, `None` for a blank page
    pub roi: Option<RegionOfInterest>,
    /// Descriptor of `roi`
    pub features: Option<FeatureVector>,
}

/// Runs verifications under a fixed configuration
#[derive(Debug, Clone, Default)]
pub struct Verifier {
    config: VerifyConfig,
}

impl Verifier {
    /// Create a verifier.
    ///
    /// # Errors
    ///
    /// Returns [`VerifyError::InvalidConfig`] if the configuration does not
    /// validate.
    pub fn new(config: VerifyConfig) -> VerifyResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The configuration in use
    pub fn config(&self) -> &VerifyConfig {
        &self.config
    }

    fn feature_options(&self) -> FeatureOptions {
        FeatureOptions {
            stroke_length: self.config.stroke_length,
        }
    }

    /// Run every stage up to and including the crop.
    fn prepare(&self, raster: &Raster) -> VerifyResult<ProcessedSignature> {
        let size = self.config.median_size;
        let denoised = median_filter(raster, size, size)?;
        let gray = denoised.to_gray()?;
        let binary = binarize(&gray, &self.config.binarize, self.config.polarity)?;
        let (skeleton, thin_stats) = thin_with_stats(&binary, self.config.thin_algorithm)?;
        let roi = extract_roi(&skeleton)?;

        debug!(
            width = raster.width(),
            height = raster.height(),
            ink = binary.count_ink(),
            skeleton = skeleton.count_ink(),
            iterations = thin_stats.iterations,
            roi = ?roi.as_ref().map(RegionOfInterest::bounds),
            "preprocessed signature"
        );

        Ok(ProcessedSignature {
            denoised,
            gray,
            binary,
            skeleton,
            thin_stats,
            roi,
            features: None,
        })
    }

    /// Run the full pipeline on one image and keep every intermediate.
    ///
    /// A blank page is not an error here: `roi` and `features` are `None`.
    pub fn process(&self, raster: &Raster) -> VerifyResult<ProcessedSignature> {
        let mut processed = self.prepare(raster)?;
        processed.features = processed
            .roi
            .as_ref()
            .map(|roi| extract_features(roi, &self.feature_options()))
            .transpose()?;
        Ok(processed)
    }

    /// Preprocess one image and check its region is usable.
    fn preprocess(
        &self,
        role: ImageRole,
        raster: &Raster,
        sink: &mut dyn EventSink,
    ) -> Result<RegionOfInterest, FailureReason> {
        sink.emit(VerifyEvent::StageStarted(VerifyStage::Preprocessing(role)));
        let processed = self.prepare(raster).map_err(|e| invalid_image(role, e))?;
        sink.emit(VerifyEvent::Preprocessed {
            role,
            width: raster.width(),
            height: raster.height(),
            skeleton_pixels: processed.skeleton.count_ink(),
            thin_iterations: processed.thin_stats.iterations,
        });

        let roi = processed.roi.ok_or(FailureReason::EmptyInkRegion(role))?;
        let min = self.config.min_roi_size;
        if roi.width() < min || roi.height() < min {
            return Err(FailureReason::ImageTooSmall {
                role,
                width: roi.width(),
                height: roi.height(),
                min,
            });
        }
        Ok(roi)
    }

    fn features(
        &self,
        role: ImageRole,
        roi: &RegionOfInterest,
        sink: &mut dyn EventSink,
    ) -> Result<FeatureVector, FailureReason> {
        let features =
            extract_features(roi, &self.feature_options()).map_err(|e| invalid_image(role, e))?;
        sink.emit(VerifyEvent::FeaturesExtracted { role, features });
        Ok(features)
    }

    fn input_features(
        &self,
        input: &Raster,
        sink: &mut dyn EventSink,
    ) -> Result<FeatureVector, FailureReason> {
        let roi = self.preprocess(ImageRole::Input, input, sink)?;
        sink.emit(VerifyEvent::StageStarted(VerifyStage::FeatureExtraction));
        self.features(ImageRole::Input, &roi, sink)
    }

    fn feature_pair(
        &self,
        input: &Raster,
        reference: &Raster,
        sink: &mut dyn EventSink,
    ) -> Result<(FeatureVector, FeatureVector), FailureReason> {
        let input_roi = self.preprocess(ImageRole::Input, input, sink)?;
        let reference_roi = self.preprocess(ImageRole::Reference, reference, sink)?;
        sink.emit(VerifyEvent::StageStarted(VerifyStage::FeatureExtraction));
        let input_features = self.features(ImageRole::Input, &input_roi, sink)?;
        let reference_features = self.features(ImageRole::Reference, &reference_roi, sink)?;
        Ok((input_features, reference_features))
    }

    fn decide(
        &self,
        input: FeatureVector,
        reference: FeatureVector,
        sink: &mut dyn EventSink,
    ) -> Verification {
        sink.emit(VerifyEvent::StageStarted(VerifyStage::Decision));
        let result = compare_with_policy(&reference, &input, &self.config.policy);
        sink.emit(VerifyEvent::Decided {
            distance: result.distance,
            is_match: result.is_match,
        });
        let outcome = if result.is_match {
            Outcome::Matched
        } else {
            Outcome::NotMatched
        };
        Verification {
            outcome,
            match_result: Some(result),
            input: Some(input),
            reference: Some(reference),
        }
    }

    fn fail(&self, reason: FailureReason, sink: &mut dyn EventSink) -> Verification {
        sink.emit(VerifyEvent::Failed {
            reason: reason.clone(),
        });
        Verification::failed(reason)
    }

    /// Verify `input` against a reference image.
    ///
    /// The input is processed first; the first stage that cannot continue
    /// ends the verification with [`Outcome::Failed`].
    pub fn verify(
        &self,
        input: &Raster,
        reference: &Raster,
        sink: &mut dyn EventSink,
    ) -> Verification {
        match self.feature_pair(input, reference, sink) {
            Ok((input, reference)) => self.decide(input, reference, sink),
            Err(reason) => self.fail(reason, sink),
        }
    }

    /// Verify `input` against the enrolled reference called `name`.
    pub fn verify_against_store(
        &self,
        input: &Raster,
        store: &dyn ReferenceStore,
        name: &str,
        sink: &mut dyn EventSink,
    ) -> Verification {
        let Some(entry) = store.get(name) else {
            return self.fail(FailureReason::ReferenceMissing(name.to_string()), sink);
        };
        match self.input_features(input, sink) {
            Ok(features) => self.decide(features, entry.features, sink),
            Err(reason) => self.fail(reason, sink),
        }
    }

    /// Process a reference image into a store entry.
    ///
    /// The image must pass the same checks as a verification input.
    pub fn enroll(
        &self,
        name: impl Into<String>,
        raster: &Raster,
    ) -> Result<ReferenceEntry, FailureReason> {
        let mut sink = crate::events::NullSink;
        let roi = self.preprocess(ImageRole::Reference, raster, &mut sink)?;
        let features = self.features(ImageRole::Reference, &roi, &mut sink)?;
        Ok(ReferenceEntry::new(name, features))
    }
}

fn invalid_image(role: ImageRole, err: VerifyError) -> FailureReason {
    FailureReason::InvalidImage(format!("{} image: {}", role, err))
}

/// Verify `input` against `reference` with the default configuration and
/// a Euclidean `threshold`.
///
/// Returns the decision and a human-readable message. Progress is logged
/// through `tracing`.
///
/// # Examples
///
/// ```
/// use sigmatch_core::{Channels, Raster};
/// use sigmatch_verify::verify;
///
/// let blank = Raster::new_filled(80, 60, Channels::Gray, 255).unwrap();
/// let (matched, message) = verify(&blank, &blank, 1000.0);
/// assert!(!matched);
/// assert!(message.contains("no signature"));
/// ```
pub fn verify(input: &Raster, reference: &Raster, threshold: f64) -> (bool, String) {
    let verifier = match Verifier::new(VerifyConfig::default().with_threshold(threshold)) {
        Ok(v) => v,
        Err(e) => return (false, format!("Verification failed: {}", e)),
    };
    let verification = verifier.verify(input, reference, &mut TracingSink);
    (verification.is_match(), verification.message())
}
