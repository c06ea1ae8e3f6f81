use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::frame::{FrameSample, GestureBuffer};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SegmentationError {
    /// Feature vector does not match the configured dimensionality.
    /// This is a caller bug, the FSM never tries to recover from it.
    #[error("invalid input: expected {expected} features, got {got}")]
    InvalidInput { expected: usize, got: usize },
    #[error("invalid segmenter config: {0}")]
    InvalidConfig(String),
}

/// Thresholds for the gesture FSM. All counts are in frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmenterConfig {
    /// Consecutive present frames needed to start recording.
    pub start_streak: u32,
    /// Consecutive absent frames needed to stop recording.
    pub end_streak: u32,
    /// Shorter gestures are treated as noise.
    pub min_sign_frames: usize,
    /// Hard cap on a single gesture.
    pub max_sign_frames: usize,
    pub feature_dim: usize,
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        Self {
            start_streak: 4,
            end_streak: 6,
            min_sign_frames: 12,
            max_sign_frames: 96,
            feature_dim: DEFAULT_FEATURE_DIM,
        }
    }
}

/// Pose (33 * 4) + two hands (2 * 21 * 3).
pub const DEFAULT_FEATURE_DIM: usize = 258;

impl SegmenterConfig {
    pub fn validate(&self) -> Result<(), SegmentationError> {
        if self.start_streak == 0 {
            return Err(SegmentationError::InvalidConfig("start_streak must be >= 1".into()));
        }
        if self.end_streak == 0 {
            return Err(SegmentationError::InvalidConfig("end_streak must be >= 1".into()));
        }
        if self.max_sign_frames == 0 {
            return Err(SegmentationError::InvalidConfig("max_sign_frames must be >= 1".into()));
        }
        if self.min_sign_frames > self.max_sign_frames {
            return Err(SegmentationError::InvalidConfig(format!(
                "min_sign_frames ({}) exceeds max_sign_frames ({})",
                self.min_sign_frames, self.max_sign_frames
            )));
        }
        if self.feature_dim == 0 {
            return Err(SegmentationError::InvalidConfig("feature_dim must be >= 1".into()));
        }
        Ok(())
    }
}

/// The explicit FSM value. The buffer only exists while recording,
/// so an idle segmenter can never hold frames.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state")]
pub enum SegmentationState {
    Idle {
        present_streak: u32,
    },
    Recording {
        buffer: GestureBuffer,
        present_streak: u32,
        absent_streak: u32,
    },
}

impl Default for SegmentationState {
    fn default() -> Self {
        Self::Idle { present_streak: 0 }
    }
}

impl SegmentationState {
    pub fn is_recording(&self) -> bool {
        matches!(self, Self::Recording { .. })
    }

    pub fn buffered_frames(&self) -> usize {
        match self {
            Self::Idle { .. } => 0,
            Self::Recording { buffer, .. } => buffer.len(),
        }
    }
}

/// What happened to a gesture when recording stopped.
#[derive(Debug, Clone, PartialEq)]
pub enum SegmentOutcome {
    /// Long enough to classify.
    Emitted(GestureBuffer),
    /// Shorter than `min_sign_frames`; carries the dropped length.
    Discarded(usize),
}

/// Result of feeding one frame to the FSM.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub state: SegmentationState,
    /// Set only on the frame where recording ends.
    pub outcome: Option<SegmentOutcome>,
}

impl Transition {
    pub fn emitted(&self) -> Option<&GestureBuffer> {
        match &self.outcome {
            Some(SegmentOutcome::Emitted(buffer)) => Some(buffer),
            _ => None,
        }
    }
}

/// Stateful wrapper around [`GestureSegmenter::transition`] for the worker.
#[derive(Debug, Clone)]
pub struct GestureSegmenter {
    config: SegmenterConfig,
    state: SegmentationState,
}

impl GestureSegmenter {
    pub fn new(config: SegmenterConfig) -> Result<Self, SegmentationError> {
        config.validate()?;
        Ok(Self {
            config,
            state: SegmentationState::default(),
        })
    }

    pub fn config(&self) -> &SegmenterConfig {
        &self.config
    }

    pub fn state(&self) -> &SegmentationState {
        &self.state
    }

    /// Feed one frame. Returns the segment outcome if recording ended on it.
    pub fn push(&mut self, sample: &FrameSample) -> Result<Option<SegmentOutcome>, SegmentationError> {
        // Checked up front so a bad frame never costs us the buffered gesture.
        if sample.dim() != self.config.feature_dim {
            return Err(SegmentationError::InvalidInput {
                expected: self.config.feature_dim,
                got: sample.dim(),
            });
        }
        let step = Self::transition(std::mem::take(&mut self.state), sample, &self.config)?;
        self.state = step.state;
        Ok(step.outcome)
    }

    /// Drop any partially recorded gesture without emitting it.
    pub fn reset(&mut self) -> usize {
        let dropped = self.state.buffered_frames();
        self.state = SegmentationState::default();
        dropped
    }

    /// Pure function: (State, Frame) -> (New State, Outcome).
    ///
    /// The frame that completes the start streak is not buffered; every
    /// frame after it is, absent frames included, until the end streak or
    /// the frame cap is reached.
    pub fn transition(
        state: SegmentationState,
        sample: &FrameSample,
        config: &SegmenterConfig,
    ) -> Result<Transition, SegmentationError> {
        if sample.dim() != config.feature_dim {
            return Err(SegmentationError::InvalidInput {
                expected: config.feature_dim,
                got: sample.dim(),
            });
        }

        match state {
            SegmentationState::Idle { present_streak } => {
                let present_streak = if sample.presence { present_streak + 1 } else { 0 };

                if present_streak >= config.start_streak {
                    return Ok(Transition {
                        state: SegmentationState::Recording {
                            buffer: Vec::new(),
                            present_streak: 0,
                            absent_streak: 0,
                        },
                        outcome: None,
                    });
                }

                Ok(Transition {
                    state: SegmentationState::Idle { present_streak },
                    outcome: None,
                })
            }
            SegmentationState::Recording {
                mut buffer,
                present_streak,
                absent_streak,
            } => {
                buffer.push(sample.features.clone());
                let (present_streak, absent_streak) = if sample.presence {
                    (present_streak + 1, 0)
                } else {
                    (0, absent_streak + 1)
                };

                if absent_streak >= config.end_streak || buffer.len() >= config.max_sign_frames {
                    let outcome = if buffer.len() >= config.min_sign_frames {
                        SegmentOutcome::Emitted(buffer)
                    } else {
                        SegmentOutcome::Discarded(buffer.len())
                    };
                    return Ok(Transition {
                        state: SegmentationState::default(),
                        outcome: Some(outcome),
                    });
                }

                Ok(Transition {
                    state: SegmentationState::Recording {
                        buffer,
                        present_streak,
                        absent_streak,
                    },
                    outcome: None,
                })
            }
        }
    }
}
