use std::sync::{Arc, Mutex};

use thiserror::Error;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::Classifier;
use crate::kernel::event::RecognitionEvent;
use crate::kernel::frame::FrameSample;
use crate::kernel::ledger::SharedLedger;
use crate::kernel::segmenter::{GestureSegmenter, SegmentOutcome, SegmentationError};
use crate::kernel::sequence::{SequenceError, SequencePreparer};
use crate::kernel::telemetry::event::TelemetryEvent;
use crate::kernel::telemetry::recorder::TelemetryRecorder;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Segmentation(#[from] SegmentationError),
    #[error(transparent)]
    Sequence(#[from] SequenceError),
    #[error("failed to start recognition worker: {0}")]
    Runtime(#[from] std::io::Error),
    #[error("recognition worker panicked")]
    WorkerPanicked,
}

/// Counters returned when the worker exits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorkerSummary {
    pub frames: u64,
    pub recognized: usize,
    pub discarded: usize,
    /// Frames of a gesture still being recorded when the stream stopped.
    pub dropped_frames: usize,
}

/// The segmentation pipeline: segmenter -> preparer -> classifier -> ledger.
///
/// Frames are processed strictly one at a time and in arrival order.
pub struct RecognitionWorker {
    session: Uuid,
    segmenter: GestureSegmenter,
    preparer: SequencePreparer,
    classifier: Box<dyn Classifier>,
    ledger: SharedLedger,
    min_confidence: f32,
    events: Option<mpsc::Sender<RecognitionEvent>>,
    telemetry: Arc<Mutex<TelemetryRecorder>>,
    drain: CancellationToken,
    summary: WorkerSummary,
}

impl RecognitionWorker {
    pub fn new(
        session: Uuid,
        segmenter: GestureSegmenter,
        preparer: SequencePreparer,
        classifier: Box<dyn Classifier>,
        ledger: SharedLedger,
        min_confidence: f32,
    ) -> Self {
        Self {
            session,
            segmenter,
            preparer,
            classifier,
            ledger,
            min_confidence,
            events: None,
            telemetry: Arc::new(Mutex::new(TelemetryRecorder::new())),
            drain: CancellationToken::new(),
            summary: WorkerSummary::default(),
        }
    }

    pub fn with_events(mut self, events: mpsc::Sender<RecognitionEvent>) -> Self {
        self.events = Some(events);
        self
    }

    pub fn with_telemetry(mut self, telemetry: Arc<Mutex<TelemetryRecorder>>) -> Self {
        self.telemetry = telemetry;
        self
    }

    /// Once `drain` fires the frame channel is closed: frames already queued
    /// are still processed, later sends fail, and the loop exits even while
    /// other senders are alive.
    pub fn with_drain(mut self, drain: CancellationToken) -> Self {
        self.drain = drain;
        self
    }

    pub fn summary(&self) -> WorkerSummary {
        self.summary
    }

    /// Run the worker loop. Designed to be run in a dedicated OS thread,
    /// classification blocks.
    ///
    /// Exits when the frame channel closes or `cancel` fires, or once the
    /// queue is empty after a drain. A gesture that is still being recorded
    /// at that point is dropped, not classified.
    pub fn run(
        mut self,
        mut frames: mpsc::Receiver<FrameSample>,
        cancel: CancellationToken,
    ) -> Result<WorkerSummary, PipelineError> {
        info!(session = %self.session, "Recognition worker started");

        let rt = tokio::runtime::Builder::new_current_thread().enable_all().build()?;
        let drain = self.drain.clone();
        let result = rt.block_on(async {
            let mut draining = false;
            loop {
                tokio::select! {
                    biased;
                    _ = cancel.cancelled() => break,
                    _ = drain.cancelled(), if !draining => {
                        debug!(session = %self.session, "Draining queued frames");
                        frames.close();
                        draining = true;
                    }
                    frame = frames.recv() => match frame {
                        Some(sample) => self.process(&sample)?,
                        None => break,
                    },
                }
            }
            Ok::<(), PipelineError>(())
        });

        self.summary.dropped_frames = self.segmenter.reset();
        if self.summary.dropped_frames > 0 {
            debug!(frames = self.summary.dropped_frames, "Dropping unfinished gesture");
        }
        self.emit(RecognitionEvent::Stopped {
            session: self.session,
            dropped_frames: self.summary.dropped_frames,
        });
        info!(session = %self.session, frames = self.summary.frames, recognized = self.summary.recognized, "Recognition worker stopped");

        result.map(|_| self.summary)
    }

    /// Feed one frame through the pipeline.
    pub fn process(&mut self, sample: &FrameSample) -> Result<(), PipelineError> {
        self.summary.frames += 1;
        let was_recording = self.segmenter.state().is_recording();

        let outcome = self.segmenter.push(sample)?;

        if !was_recording && self.segmenter.state().is_recording() {
            debug!(frame = self.summary.frames, "Gesture started");
            self.emit(RecognitionEvent::GestureStarted { session: self.session });
        }

        match outcome {
            None => Ok(()),
            Some(SegmentOutcome::Discarded(frames)) => {
                debug!(frames, "Gesture too short, discarded");
                self.summary.discarded += 1;
                self.record(TelemetryEvent::GestureDiscarded { frames });
                self.emit(RecognitionEvent::GestureDiscarded { session: self.session, frames });
                Ok(())
            }
            Some(SegmentOutcome::Emitted(buffer)) => {
                let frames = buffer.len();
                self.record(TelemetryEvent::GestureEmitted { frames });
                let sequence = self.preparer.prepare(&buffer)?;

                match self.classifier.classify(&sequence) {
                    Ok(gloss) => {
                        let low_confidence = gloss.is_low_confidence(self.min_confidence);
                        if low_confidence {
                            warn!(gloss = %gloss.label, confidence = gloss.confidence, frames, low_confidence, "Gloss recognized");
                        } else {
                            info!(gloss = %gloss.label, confidence = gloss.confidence, frames, "Gloss recognized");
                        }
                        // Low confidence still lands in the ledger, the user can delete it.
                        self.ledger.append(gloss.label.clone());
                        self.summary.recognized += 1;
                        self.record(TelemetryEvent::GlossRecognized { low_confidence });
                        self.emit(RecognitionEvent::GlossRecognized {
                            session: self.session,
                            gloss: gloss.label,
                            confidence: gloss.confidence,
                            frames,
                            low_confidence,
                        });
                    }
                    Err(e) => {
                        warn!(frames, "Classification failed: {:#}", e);
                        self.record(TelemetryEvent::ClassificationFailed);
                        self.emit(RecognitionEvent::ClassificationFailed {
                            session: self.session,
                            frames,
                            reason: e.to_string(),
                        });
                    }
                }
                Ok(())
            }
        }
    }

    fn record(&self, event: TelemetryEvent) {
        self.telemetry
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .record(event);
    }

    // Never blocks the frame loop on a slow listener.
    fn emit(&self, event: RecognitionEvent) {
        if let Some(tx) = &self.events {
            if let Err(e) = tx.try_send(event) {
                debug!("Recognition event not delivered: {}", e);
            }
        }
    }
}
