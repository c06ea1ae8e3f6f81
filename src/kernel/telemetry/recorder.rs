use std::collections::VecDeque;

use super::event::TelemetryEvent;
use super::metrics::{compute_snapshot, TelemetrySnapshot};
use crate::services::translate::cascade::CascadeReport;

const MAX_EVENTS: usize = 10_000;

#[derive(Debug)]
pub struct TelemetryRecorder {
    buffer: VecDeque<TelemetryEvent>,
}

impl Default for TelemetryRecorder {
    fn default() -> Self {
        Self::new()
    }
}

impl TelemetryRecorder {
    pub fn new() -> Self {
        Self {
            buffer: VecDeque::with_capacity(MAX_EVENTS),
        }
    }

    pub fn record(&mut self, event: TelemetryEvent) {
        if self.buffer.len() >= MAX_EVENTS {
            self.buffer.pop_front();
        }
        self.buffer.push_back(event);
    }

    /// One `BackendAttempt` per attempt, plus `FallbackUsed` if the local
    /// translator answered.
    pub fn record_cascade<T>(&mut self, report: &CascadeReport<T>) {
        for attempt in &report.attempts {
            self.record(TelemetryEvent::BackendAttempt {
                backend: attempt.backend_id.clone(),
                direction: report.direction,
                outcome: attempt.outcome,
            });
        }
        if report.used_fallback() {
            self.record(TelemetryEvent::FallbackUsed {
                direction: report.direction,
            });
        }
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn snapshot(&self) -> TelemetrySnapshot {
        compute_snapshot(&self.buffer)
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }
}
