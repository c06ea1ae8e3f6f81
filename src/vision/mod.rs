//! Boundary to the external vision stack.
//!
//! Landmark extraction, hand presence, spatial normalization and the
//! sequence classifier all live outside this crate. They are consumed
//! through the traits below.

pub mod pipeline;

use crate::kernel::frame::{FrameSample, RecognizedGloss};
use crate::kernel::sequence::NormalizedSequence;

/// Sequence classifier. Runs on the recognition worker thread and may block.
pub trait Classifier: Send {
    fn classify(&mut self, sequence: &NormalizedSequence) -> anyhow::Result<RecognizedGloss>;
}

impl<F> Classifier for F
where
    F: FnMut(&NormalizedSequence) -> anyhow::Result<RecognizedGloss> + Send,
{
    fn classify(&mut self, sequence: &NormalizedSequence) -> anyhow::Result<RecognizedGloss> {
        self(sequence)
    }
}

/// Per-frame translation/scale normalization relative to a body reference
/// point. Must not change the frame dimensionality.
pub trait SpatialNormalizer: Send + Sync {
    fn normalize(&self, frame: &[f32]) -> Vec<f32>;
}

/// Passes frames through untouched, for front ends that already normalize.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityNormalizer;

impl SpatialNormalizer for IdentityNormalizer {
    fn normalize(&self, frame: &[f32]) -> Vec<f32> {
        frame.to_vec()
    }
}

/// Turns a raw camera frame into a flat feature vector plus the raw
/// landmarks used for presence detection.
pub trait FeatureExtractor {
    type Frame;
    type Landmarks;

    fn extract(&mut self, frame: &Self::Frame) -> anyhow::Result<(Vec<f32>, Self::Landmarks)>;
}

pub trait PresenceDetector<L> {
    /// Hand(s) visible in this frame.
    fn presence(&self, landmarks: &L) -> bool;
}

/// Extract + detect in one call, producing what the segmenter consumes.
/// Landmarks are handed back for overlay drawing.
pub fn sample_frame<E, P>(
    extractor: &mut E,
    detector: &P,
    frame: &E::Frame,
) -> anyhow::Result<(FrameSample, E::Landmarks)>
where
    E: FeatureExtractor,
    P: PresenceDetector<E::Landmarks>,
{
    let (features, landmarks) = extractor.extract(frame)?;
    let presence = detector.presence(&landmarks);
    Ok((FrameSample::new(features, presence), landmarks))
}
