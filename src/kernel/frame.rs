use serde::{Deserialize, Serialize};

/// One video frame as seen by the segmenter.
/// Produced by the vision front end, consumed immediately, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameSample {
    pub features: Vec<f32>,
    /// Hand(s) detected in this frame.
    pub presence: bool,
}

impl FrameSample {
    pub fn new(features: Vec<f32>, presence: bool) -> Self {
        Self { features, presence }
    }

    pub fn present(features: Vec<f32>) -> Self {
        Self::new(features, true)
    }

    pub fn absent(features: Vec<f32>) -> Self {
        Self::new(features, false)
    }

    pub fn dim(&self) -> usize {
        self.features.len()
    }
}

/// Frames buffered while a gesture is in progress, oldest first.
pub type GestureBuffer = Vec<Vec<f32>>;

/// Output of the classifier for one completed gesture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecognizedGloss {
    pub label: String,
    /// In [0, 1].
    pub confidence: f32,
}

impl RecognizedGloss {
    pub fn new(label: impl Into<String>, confidence: f32) -> Self {
        Self {
            label: label.into(),
            confidence: confidence.clamp(0.0, 1.0),
        }
    }

    pub fn is_low_confidence(&self, min_confidence: f32) -> bool {
        self.confidence < min_confidence
    }
}
