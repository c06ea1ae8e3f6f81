use serde::{Deserialize, Serialize};

use crate::services::translate::cascade::AttemptOutcome;
use crate::services::translate::Direction;

// Allowed: counts, backend identifiers, enums
// Forbidden: glosses, text, feature vectors

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TelemetryEvent {
    GestureEmitted {
        frames: usize,
    },

    GestureDiscarded {
        frames: usize,
    },

    GlossRecognized {
        low_confidence: bool,
    },

    ClassificationFailed,

    BackendAttempt {
        backend: String,
        direction: Direction,
        outcome: AttemptOutcome,
    },

    FallbackUsed {
        direction: Direction,
    },
}
