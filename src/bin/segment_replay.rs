//! Replays a presence script through a recognition session.
//!
//! Each stdin line is a string of `1` (hands present) and `0` (absent)
//! frames, other characters are ignored. Gestures are "classified" by
//! their length so the segmentation can be checked by eye.

use signbridge::config::Config;
use signbridge::kernel::frame::{FrameSample, RecognizedGloss};
use signbridge::kernel::ledger::SharedLedger;
use signbridge::kernel::sequence::NormalizedSequence;
use signbridge::RecognitionSession;
use std::io::BufRead;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

fn main() -> anyhow::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = Config::from_env()?;
    let dim = config.feature_dim;
    let classifier = |seq: &NormalizedSequence| -> anyhow::Result<RecognizedGloss> {
        Ok(RecognizedGloss::new(format!("GESTO_{}", seq.valid_len), 1.0))
    };

    let session = RecognitionSession::start(&config, SharedLedger::new(), Box::new(classifier))?;
    let frames = session.frame_sender();

    for line in std::io::stdin().lock().lines() {
        for c in line?.chars() {
            let presence = match c {
                '1' => true,
                '0' => false,
                _ => continue,
            };
            frames.send_blocking(FrameSample::new(vec![0.0; dim], presence))?;
        }
    }
    drop(frames);

    let end = session.finish()?;
    println!("{}", end.glosses.join(" "));
    tracing::info!(
        frames = end.summary.frames,
        recognized = end.summary.recognized,
        discarded = end.summary.discarded,
        dropped_frames = end.summary.dropped_frames,
        "Replay finished"
    );
    Ok(())
}
