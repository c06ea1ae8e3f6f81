use signbridge::config::Config;
use signbridge::kernel::telemetry::recorder::TelemetryRecorder;
use signbridge::services::translate::Direction;
use signbridge::services::video_index::GlossVideoIndex;
use signbridge::TranslationCascade;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let direction = match std::env::args().nth(1).as_deref() {
        None | Some("to-glosses") => Direction::TextToGlosses,
        Some("to-text") => Direction::GlossesToText,
        Some(other) => anyhow::bail!("unknown mode {:?}, expected `to-glosses` or `to-text`", other),
    };

    let config = Config::from_env()?;
    let cascade = TranslationCascade::from_config(&config)?;
    let videos = config
        .gloss_index_path
        .as_deref()
        .map(|path| GlossVideoIndex::load(config.project_root.clone(), path));
    let mut telemetry = TelemetryRecorder::new();

    tracing::info!(?direction, backends = ?cascade.backend_ids(), "Ready. One input per line, Ctrl+D to quit.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        match direction {
            Direction::GlossesToText => {
                let glosses: Vec<String> = line.split_whitespace().map(str::to_uppercase).collect();
                let report = cascade.glosses_to_text(&glosses).await;
                telemetry.record_cascade(&report);
                println!("{}", report.output);
            }
            Direction::TextToGlosses => {
                let report = cascade.text_to_glosses(&line).await;
                telemetry.record_cascade(&report);
                println!("{}", report.output.join(" "));
                if let Some(index) = &videos {
                    for gloss in &report.output {
                        match index.lookup(gloss) {
                            Some(path) => println!("  {} -> {}", gloss, path.display()),
                            None => println!("  {} -> (no video)", gloss),
                        }
                    }
                }
            }
        }
    }

    let snap = telemetry.snapshot();
    tracing::info!(
        attempts = snap.cascade_stats.attempts,
        successes = snap.cascade_stats.successes,
        quota_exhausted = snap.cascade_stats.quota_exhausted,
        fallbacks = snap.cascade_stats.fallbacks,
        "Session summary"
    );
    Ok(())
}
