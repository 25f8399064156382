//! Progress events emitted during verification
//!
//! The pipeline reports what it is doing through an [`EventSink`] passed
//! in by the caller, so the core never decides where diagnostics go.

use crate::FeatureVector;
use crate::outcome::{FailureReason, ImageRole};
use tracing::{info, warn};

/// Stage of the verification state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifyStage {
    /// Denoise, binarize, thin and crop one image
    Preprocessing(ImageRole),
    /// Compute both descriptors
    FeatureExtraction,
    /// Compare the descriptors
    Decision,
}

/// Something that happened during a verification
#[derive(Debug, Clone, PartialEq)]
pub enum VerifyEvent {
    /// A stage is about to run
    StageStarted(VerifyStage),
    /// An image went through preprocessing
    Preprocessed {
        role: ImageRole,
        width: u32,
        height: u32,
        skeleton_pixels: u64,
        thin_iterations: u32,
    },
    /// A descriptor was computed
    FeaturesExtracted {
        role: ImageRole,
        features: FeatureVector,
    },
    /// A decision was reached
    Decided { distance: f64, is_match: bool },
    /// The verification stopped without a decision
    Failed { reason: FailureReason },
}

/// Receiver of verification events
pub trait EventSink {
    /// Handle one event
    fn emit(&mut self, event: VerifyEvent);
}

/// Discards every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&mut self, _event: VerifyEvent) {}
}

/// Forwards events to `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn emit(&mut self, event: VerifyEvent) {
        match event {
            VerifyEvent::StageStarted(stage) => info!(?stage, "stage started"),
            VerifyEvent::Preprocessed {
                role,
                width,
                height,
                skeleton_pixels,
                thin_iterations,
            } => info!(
                %role,
                width,
                height,
                skeleton_pixels,
                thin_iterations,
                "preprocessed"
            ),
            VerifyEvent::FeaturesExtracted { role, features } => info!(
                %role,
                width = features.width(),
                height = features.height(),
                black_pixels = features.black_pixels(),
                stroke_length = features.stroke_length(),
                "features extracted"
            ),
            VerifyEvent::Decided { distance, is_match } => {
                info!(distance, is_match, "decision")
            }
            VerifyEvent::Failed { reason } => warn!(%reason, "verification failed"),
        }
    }
}

impl EventSink for Vec<VerifyEvent> {
    fn emit(&mut self, event: VerifyEvent) {
        self.push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec_sink_records_in_order() {
        let mut events: Vec<VerifyEvent> = Vec::new();
        let sink: &mut dyn EventSink = &mut events;
        sink.emit(VerifyEvent::StageStarted(VerifyStage::Decision));
        sink.emit(VerifyEvent::Decided {
            distance: 3.0,
            is_match: true,
        });
        assert_eq!(events.len(), 2);
        assert_eq!(
            events[0],
            VerifyEvent::StageStarted(VerifyStage::Decision)
        );
    }

    #[test]
    fn test_tracing_and_null_sinks_accept_everything() {
        let reason = FailureReason::EmptyInkRegion(ImageRole::Input);
        let mut sinks: [Box<dyn EventSink>; 2] = [Box::new(NullSink), Box::new(TracingSink)];
        for sink in sinks.iter_mut() {
            sink.emit(VerifyEvent::Failed {
                reason: reason.clone(),
            });
            sink.emit(VerifyEvent::FeaturesExtracted {
                role: ImageRole::Reference,
                features: FeatureVector::new(1, 2, 3),
            });
        }
    }
}
