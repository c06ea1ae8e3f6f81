use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::backend::{BackendError, TranslationBackend};
use super::classify::{ErrorClassifier, FailureKind, KeywordClassifier};
use super::fallback::LocalFallbackTranslator;
use super::prompt;
use super::Direction;
use crate::config::Config;
use crate::services::llm::GeminiBackend;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttemptOutcome {
    Success,
    QuotaExhausted,
    OtherError,
}

impl AttemptOutcome {
    pub fn as_str(self) -> &'static str {
        match self {
            AttemptOutcome::Success => "success",
            AttemptOutcome::QuotaExhausted => "quota_exhausted",
            AttemptOutcome::OtherError => "other_error",
        }
    }
}

/// One backend try within a single `translate` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CascadeAttempt {
    pub backend_id: String,
    pub outcome: AttemptOutcome,
    /// Error text for failed attempts.
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultSource {
    Backend(String),
    LocalFallback,
    /// Nothing to translate, no backend was called.
    EmptyInput,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CascadeReport<T> {
    pub direction: Direction,
    pub output: T,
    pub source: ResultSource,
    pub attempts: Vec<CascadeAttempt>,
}

impl<T> CascadeReport<T> {
    pub fn used_fallback(&self) -> bool {
        self.source == ResultSource::LocalFallback
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslationRequest {
    Glosses(Vec<String>),
    Text(String),
}

impl TranslationRequest {
    pub fn direction(&self) -> Direction {
        match self {
            TranslationRequest::Glosses(_) => Direction::GlossesToText,
            TranslationRequest::Text(_) => Direction::TextToGlosses,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Translation {
    Text(String),
    Glosses(Vec<String>),
}

/// Tries each backend in order until one returns usable output, then falls
/// back to [`LocalFallbackTranslator`].
///
/// Every failure advances to the next backend, quota or otherwise. A failed
/// backend is not retried within the same call and backends are never
/// called in parallel. The caller never sees a failure for non-empty input.
pub struct TranslationCascade {
    backends: Vec<Arc<dyn TranslationBackend>>,
    classifier: Arc<dyn ErrorClassifier>,
    attempt_timeout: Option<Duration>,
    fallback: LocalFallbackTranslator,
}

impl TranslationCascade {
    pub fn new(backends: Vec<Arc<dyn TranslationBackend>>) -> Self {
        Self {
            backends,
            classifier: Arc::new(KeywordClassifier::default()),
            attempt_timeout: None,
            fallback: LocalFallbackTranslator,
        }
    }

    /// One Gemini backend per configured model. Without an API key the
    /// cascade is empty and everything goes to the local fallback.
    pub fn from_config(config: &Config) -> Result<Self, BackendError> {
        let mut backends: Vec<Arc<dyn TranslationBackend>> = Vec::new();
        match &config.api_key {
            Some(key) => {
                for model in &config.models {
                    backends.push(Arc::new(GeminiBackend::new(
                        &config.base_url,
                        model,
                        key,
                        config.request_timeout(),
                    )?));
                }
            }
            None => warn!("GEMINI_API_KEY not set, translating with local fallback only"),
        }
        info!(backends = backends.len(), "Translation cascade ready");
        Ok(Self::new(backends).with_attempt_timeout(config.attempt_timeout()))
    }

    pub fn with_classifier(mut self, classifier: Arc<dyn ErrorClassifier>) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn with_attempt_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.attempt_timeout = timeout;
        self
    }

    pub fn backend_ids(&self) -> Vec<String> {
        self.backends.iter().map(|b| b.id().to_string()).collect()
    }

    pub async fn translate(&self, request: TranslationRequest) -> CascadeReport<Translation> {
        match request {
            TranslationRequest::Glosses(glosses) => {
                let report = self.glosses_to_text(&glosses).await;
                map_report(report, Translation::Text)
            }
            TranslationRequest::Text(text) => {
                let report = self.text_to_glosses(&text).await;
                map_report(report, Translation::Glosses)
            }
        }
    }

    pub async fn glosses_to_text(&self, glosses: &[String]) -> CascadeReport<String> {
        let direction = Direction::GlossesToText;
        if glosses.iter().all(|g| g.trim().is_empty()) {
            return empty_report(direction, String::new());
        }

        info!(glosses = glosses.len(), "Translating glosses to text");
        let prompt = prompt::glosses_to_text_prompt(glosses);
        let (hit, attempts) = self.run(direction, &prompt, prompt::parse_text).await;

        match hit {
            Some((output, backend)) => CascadeReport {
                direction,
                output,
                source: ResultSource::Backend(backend),
                attempts,
            },
            None => {
                let output = self.fallback.glosses_to_text(glosses);
                warn!(attempts = attempts.len(), "All backends failed, using local fallback");
                CascadeReport {
                    direction,
                    output,
                    source: ResultSource::LocalFallback,
                    attempts,
                }
            }
        }
    }

    pub async fn text_to_glosses(&self, text: &str) -> CascadeReport<Vec<String>> {
        let direction = Direction::TextToGlosses;
        if text.trim().is_empty() {
            return empty_report(direction, Vec::new());
        }

        info!(chars = text.chars().count(), "Translating text to glosses");
        let prompt = prompt::text_to_glosses_prompt(text);
        let (hit, attempts) = self.run(direction, &prompt, prompt::parse_glosses).await;

        match hit {
            Some((output, backend)) => CascadeReport {
                direction,
                output,
                source: ResultSource::Backend(backend),
                attempts,
            },
            None => {
                let output = self.fallback.text_to_glosses(text);
                warn!(attempts = attempts.len(), "All backends failed, using local fallback");
                CascadeReport {
                    direction,
                    output,
                    source: ResultSource::LocalFallback,
                    attempts,
                }
            }
        }
    }

    async fn run<T>(
        &self,
        direction: Direction,
        prompt: &str,
        parse: fn(&str) -> Option<T>,
    ) -> (Option<(T, String)>, Vec<CascadeAttempt>) {
        let mut attempts = Vec::with_capacity(self.backends.len());

        for backend in &self.backends {
            let backend_id = backend.id().to_string();
            let result = self
                .attempt(backend.as_ref(), prompt, direction.max_output_tokens())
                .await
                .and_then(|reply| parse(&reply).ok_or(BackendError::EmptyResponse));

            match result {
                Ok(output) => {
                    info!(backend = %backend_id, outcome = AttemptOutcome::Success.as_str(), ?direction, "Backend attempt");
                    attempts.push(CascadeAttempt {
                        backend_id: backend_id.clone(),
                        outcome: AttemptOutcome::Success,
                        error: None,
                    });
                    return (Some((output, backend_id)), attempts);
                }
                Err(e) => {
                    let outcome = match self.classifier.classify(&e) {
                        FailureKind::QuotaExhausted => AttemptOutcome::QuotaExhausted,
                        FailureKind::Other => AttemptOutcome::OtherError,
                    };
                    warn!(backend = %backend_id, outcome = outcome.as_str(), ?direction, "Backend attempt failed, trying next: {}", e);
                    attempts.push(CascadeAttempt {
                        backend_id,
                        outcome,
                        error: Some(e.to_string()),
                    });
                }
            }
        }

        (None, attempts)
    }

    async fn attempt(
        &self,
        backend: &dyn TranslationBackend,
        prompt: &str,
        max_output_tokens: u32,
    ) -> Result<String, BackendError> {
        let call = backend.generate(prompt, max_output_tokens);
        match self.attempt_timeout {
            Some(limit) => tokio::time::timeout(limit, call)
                .await
                .unwrap_or(Err(BackendError::Timeout(limit))),
            None => call.await,
        }
    }
}

fn empty_report<T>(direction: Direction, output: T) -> CascadeReport<T> {
    CascadeReport {
        direction,
        output,
        source: ResultSource::EmptyInput,
        attempts: Vec::new(),
    }
}

fn map_report<T, U>(report: CascadeReport<T>, f: impl FnOnce(T) -> U) -> CascadeReport<U> {
    CascadeReport {
        direction: report.direction,
        output: f(report.output),
        source: report.source,
        attempts: report.attempts,
    }
}
