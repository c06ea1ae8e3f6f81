//! Recognition & translation telemetry.
//!
//! Telemetry is a read-only side-effect layer: nothing in the segmenter or
//! the cascade reads it back.
//!
//! Events never carry user content (glosses, text, feature vectors).
//! Only counts, backend identifiers and outcome kinds.

pub mod event;
pub mod metrics;
pub mod recorder;
