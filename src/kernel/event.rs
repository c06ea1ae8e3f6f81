use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Events emitted by the recognition worker for the surrounding application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RecognitionEvent {
    /// The segmenter started buffering a gesture.
    GestureStarted { session: Uuid },
    /// A gesture was classified and appended to the ledger.
    GlossRecognized {
        session: Uuid,
        gloss: String,
        confidence: f32,
        frames: usize,
        low_confidence: bool,
    },
    /// A gesture ended below `min_sign_frames` and was dropped.
    GestureDiscarded { session: Uuid, frames: usize },
    /// The classifier failed on a gesture; the gesture is lost.
    ClassificationFailed { session: Uuid, frames: usize, reason: String },
    /// The worker exited. Carries the frames of any gesture cut short.
    Stopped { session: Uuid, dropped_frames: usize },
}
