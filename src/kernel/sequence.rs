use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::vision::{IdentityNormalizer, SpatialNormalizer};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SequenceError {
    #[error("cannot prepare an empty gesture")]
    Empty,
    #[error("frame {index} has {got} features, expected {expected}")]
    RaggedFrame { index: usize, expected: usize, got: usize },
    #[error("max_len must be >= 1")]
    ZeroLength,
}

/// Fixed-length input for the classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedSequence {
    /// Exactly `max_len` frames.
    pub frames: Vec<Vec<f32>>,
    /// Frames that came from the gesture, the rest is zero padding.
    pub valid_len: usize,
}

impl NormalizedSequence {
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn dim(&self) -> usize {
        self.frames.first().map(Vec::len).unwrap_or(0)
    }
}

/// Keep the earliest `max_len` frames, zero-pad the rest.
/// A sequence that already has `max_len` frames comes back unchanged.
pub fn pad_or_truncate(mut frames: Vec<Vec<f32>>, max_len: usize, dim: usize) -> Vec<Vec<f32>> {
    frames.truncate(max_len);
    frames.resize_with(max_len, || vec![0.0; dim]);
    frames
}

/// Turns a completed gesture buffer into a [`NormalizedSequence`].
pub struct SequencePreparer {
    max_len: usize,
    normalizer: Box<dyn SpatialNormalizer>,
}

impl SequencePreparer {
    pub fn new(max_len: usize) -> Self {
        Self::with_normalizer(max_len, Box::new(IdentityNormalizer))
    }

    pub fn with_normalizer(max_len: usize, normalizer: Box<dyn SpatialNormalizer>) -> Self {
        Self { max_len, normalizer }
    }

    pub fn max_len(&self) -> usize {
        self.max_len
    }

    pub fn prepare(&self, buffer: &[Vec<f32>]) -> Result<NormalizedSequence, SequenceError> {
        if self.max_len == 0 {
            return Err(SequenceError::ZeroLength);
        }
        let dim = buffer.first().map(Vec::len).ok_or(SequenceError::Empty)?;
        if let Some((index, frame)) = buffer.iter().enumerate().find(|(_, f)| f.len() != dim) {
            return Err(SequenceError::RaggedFrame {
                index,
                expected: dim,
                got: frame.len(),
            });
        }

        // Frames past max_len would be dropped anyway, skip normalizing them.
        let frames: Vec<Vec<f32>> = buffer
            .iter()
            .take(self.max_len)
            .map(|frame| self.normalizer.normalize(frame))
            .collect();
        let valid_len = frames.len();
        let out_dim = frames.first().map(Vec::len).unwrap_or(dim);

        Ok(NormalizedSequence {
            frames: pad_or_truncate(frames, self.max_len, out_dim),
            valid_len,
        })
    }

    /// Re-apply the length rule to a sequence this preparer already produced.
    ///
    /// Frames are not normalized again. `valid_len` is kept, clamped to
    /// `max_len`, so padding never turns into gesture frames. A sequence of
    /// exactly `max_len` frames comes back unchanged.
    pub fn prepare_normalized(&self, sequence: &NormalizedSequence) -> Result<NormalizedSequence, SequenceError> {
        if self.max_len == 0 {
            return Err(SequenceError::ZeroLength);
        }
        if sequence.is_empty() {
            return Err(SequenceError::Empty);
        }

        Ok(NormalizedSequence {
            frames: pad_or_truncate(sequence.frames.clone(), self.max_len, sequence.dim()),
            valid_len: sequence.valid_len.min(self.max_len),
        })
    }
}
