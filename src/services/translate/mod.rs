//! Gloss <-> text translation: a cascade of remote backends with a
//! deterministic local fallback.

pub mod backend;
pub mod cascade;
pub mod classify;
pub mod fallback;
pub mod prompt;

use serde::{Deserialize, Serialize};

pub use backend::{BackendError, TranslationBackend};
pub use cascade::{AttemptOutcome, CascadeAttempt, CascadeReport, ResultSource, TranslationCascade};
pub use classify::{ErrorClassifier, FailureKind, KeywordClassifier};
pub use fallback::LocalFallbackTranslator;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    GlossesToText,
    TextToGlosses,
}

impl Direction {
    /// Output bound per request. Gloss lists are short, prose a bit longer.
    pub fn max_output_tokens(self) -> u32 {
        match self {
            Direction::GlossesToText => 100,
            Direction::TextToGlosses => 50,
        }
    }
}
