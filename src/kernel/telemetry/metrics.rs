use std::collections::{BTreeMap, VecDeque};

use super::event::TelemetryEvent;
use crate::services::translate::cascade::AttemptOutcome;

#[derive(Debug, Clone, Default)]
pub struct TelemetrySnapshot {
    pub segment_stats: SegmentStats,
    pub recognition_stats: RecognitionStats,
    pub cascade_stats: CascadeStats,
}

#[derive(Debug, Clone, Default)]
pub struct SegmentStats {
    pub emitted: u64,
    pub discarded: u64,
    pub total_emitted_frames: u64,
    pub avg_emitted_frames: f64,
    pub max_emitted_frames: u64,
}

#[derive(Debug, Clone, Default)]
pub struct RecognitionStats {
    pub recognized: u64,
    pub low_confidence: u64,
    pub failed: u64,
}

#[derive(Debug, Clone, Default)]
pub struct CascadeStats {
    pub attempts: u64,
    pub successes: u64,
    pub quota_exhausted: u64,
    pub other_errors: u64,
    pub fallbacks: u64,
    /// Attempts per backend id.
    pub per_backend: BTreeMap<String, BackendStats>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BackendStats {
    pub attempts: u64,
    pub successes: u64,
}

pub fn compute_snapshot(events: &VecDeque<TelemetryEvent>) -> TelemetrySnapshot {
    let mut snap = TelemetrySnapshot::default();

    for event in events {
        match event {
            TelemetryEvent::GestureEmitted { frames } => {
                let frames = *frames as u64;
                snap.segment_stats.emitted += 1;
                snap.segment_stats.total_emitted_frames += frames;
                snap.segment_stats.max_emitted_frames = snap.segment_stats.max_emitted_frames.max(frames);
            }
            TelemetryEvent::GestureDiscarded { .. } => snap.segment_stats.discarded += 1,
            TelemetryEvent::GlossRecognized { low_confidence } => {
                snap.recognition_stats.recognized += 1;
                if *low_confidence {
                    snap.recognition_stats.low_confidence += 1;
                }
            }
            TelemetryEvent::ClassificationFailed => snap.recognition_stats.failed += 1,
            TelemetryEvent::BackendAttempt { backend, outcome, .. } => {
                snap.cascade_stats.attempts += 1;
                let per = snap.cascade_stats.per_backend.entry(backend.clone()).or_default();
                per.attempts += 1;
                match outcome {
                    AttemptOutcome::Success => {
                        snap.cascade_stats.successes += 1;
                        per.successes += 1;
                    }
                    AttemptOutcome::QuotaExhausted => snap.cascade_stats.quota_exhausted += 1,
                    AttemptOutcome::OtherError => snap.cascade_stats.other_errors += 1,
                }
            }
            TelemetryEvent::FallbackUsed { .. } => snap.cascade_stats.fallbacks += 1,
        }
    }

    if snap.segment_stats.emitted > 0 {
        snap.segment_stats.avg_emitted_frames =
            snap.segment_stats.total_emitted_frames as f64 / snap.segment_stats.emitted as f64;
    }

    snap
}
