use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use tokio::sync::mpsc;
use tokio::sync::mpsc::error::{SendError, TrySendError};
use tokio_util::sync::CancellationToken;
use tracing::info;
use uuid::Uuid;

use crate::config::Config;
use crate::kernel::event::RecognitionEvent;
use crate::kernel::frame::FrameSample;
use crate::kernel::ledger::SharedLedger;
use crate::kernel::segmenter::GestureSegmenter;
use crate::kernel::sequence::SequencePreparer;
use crate::kernel::telemetry::recorder::TelemetryRecorder;
use crate::vision::pipeline::{PipelineError, RecognitionWorker, WorkerSummary};
use crate::vision::{Classifier, IdentityNormalizer, SpatialNormalizer};

const FRAME_CHANNEL_CAPACITY: usize = 256;

/// Handle used by the capture side to deliver frames, in order.
#[derive(Clone)]
pub struct FrameSender {
    tx: mpsc::Sender<FrameSample>,
}

impl FrameSender {
    fn closed() -> Self {
        let (tx, _) = mpsc::channel(1);
        Self { tx }
    }

    /// Blocks while the queue is full. Call from a non-async thread.
    pub fn send_blocking(&self, sample: FrameSample) -> Result<(), SendError<FrameSample>> {
        self.tx.blocking_send(sample)
    }

    pub async fn send(&self, sample: FrameSample) -> Result<(), SendError<FrameSample>> {
        self.tx.send(sample).await
    }

    pub fn try_send(&self, sample: FrameSample) -> Result<(), TrySendError<FrameSample>> {
        self.tx.try_send(sample)
    }
}

/// What a stopped session hands back.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionEnd {
    pub session: Uuid,
    /// Ledger contents at the moment recording stopped.
    pub glosses: Vec<String>,
    pub summary: WorkerSummary,
}

/// One live recognition session: owns the ledger and the worker thread.
///
/// Starting a session clears the ledger. Stopping it takes a snapshot,
/// so translation of the previous session never reads a ledger that a new
/// session is writing to.
pub struct RecognitionSession {
    id: Uuid,
    ledger: SharedLedger,
    telemetry: Arc<Mutex<TelemetryRecorder>>,
    cancel: CancellationToken,
    drain: CancellationToken,
    frames: FrameSender,
    worker: Option<JoinHandle<Result<WorkerSummary, PipelineError>>>,
}

impl RecognitionSession {
    pub fn start(
        config: &Config,
        ledger: SharedLedger,
        classifier: Box<dyn Classifier>,
    ) -> Result<Self, PipelineError> {
        Self::start_with(config, ledger, classifier, Box::new(IdentityNormalizer), None)
    }

    pub fn start_with(
        config: &Config,
        ledger: SharedLedger,
        classifier: Box<dyn Classifier>,
        normalizer: Box<dyn SpatialNormalizer>,
        events: Option<mpsc::Sender<RecognitionEvent>>,
    ) -> Result<Self, PipelineError> {
        let id = Uuid::new_v4();
        let segmenter = GestureSegmenter::new(config.segmenter())?;
        let preparer = SequencePreparer::with_normalizer(config.max_len, normalizer);
        let telemetry = Arc::new(Mutex::new(TelemetryRecorder::new()));

        ledger.clear();

        let mut worker = RecognitionWorker::new(id, segmenter, preparer, classifier, ledger.clone(), config.min_confidence)
            .with_telemetry(telemetry.clone());
        if let Some(events) = events {
            worker = worker.with_events(events);
        }

        let drain = CancellationToken::new();
        worker = worker.with_drain(drain.clone());

        let (tx, rx) = mpsc::channel(FRAME_CHANNEL_CAPACITY);
        let cancel = CancellationToken::new();
        let worker_cancel = cancel.clone();
        let handle = std::thread::Builder::new()
            .name(format!("recognition-{}", id))
            .spawn(move || worker.run(rx, worker_cancel))?;

        info!(session = %id, "Recognition session started");

        Ok(Self {
            id,
            ledger,
            telemetry,
            cancel,
            drain,
            frames: FrameSender { tx },
            worker: Some(handle),
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn frame_sender(&self) -> FrameSender {
        self.frames.clone()
    }

    pub fn ledger(&self) -> &SharedLedger {
        &self.ledger
    }

    pub fn telemetry(&self) -> Arc<Mutex<TelemetryRecorder>> {
        self.telemetry.clone()
    }

    /// Stop after every frame already queued has been processed.
    ///
    /// Senders still held by the capture side stay valid handles but their
    /// sends fail from here on, so this never waits on them.
    pub fn finish(self) -> Result<SessionEnd, PipelineError> {
        self.shutdown(false)
    }

    /// Stop now. Queued frames and any gesture in progress are dropped.
    pub fn stop(self) -> Result<SessionEnd, PipelineError> {
        self.shutdown(true)
    }

    fn shutdown(mut self, cancel: bool) -> Result<SessionEnd, PipelineError> {
        if cancel {
            self.cancel.cancel();
        } else {
            self.drain.cancel();
        }
        drop(std::mem::replace(&mut self.frames, FrameSender::closed()));

        let summary = match self.worker.take() {
            Some(handle) => handle.join().map_err(|_| PipelineError::WorkerPanicked)??,
            None => WorkerSummary::default(),
        };

        let glosses = self.ledger.snapshot();
        info!(session = %self.id, glosses = glosses.len(), "Recognition session stopped");
        Ok(SessionEnd {
            session: self.id,
            glosses,
            summary,
        })
    }
}

impl Drop for RecognitionSession {
    fn drop(&mut self) {
        if self.worker.is_some() {
            self.cancel.cancel();
        }
    }
}
