use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::kernel::segmenter::{SegmentationError, SegmenterConfig, DEFAULT_FEATURE_DIM};

/// Remote models tried in this order: most generous quota first,
/// highest quality last.
pub const DEFAULT_MODELS: &[&str] = &["gemini-1.5-flash", "gemini-2.5-flash-lite", "gemini-2.5-flash"];

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{key}: cannot parse {value:?}")]
    Parse { key: &'static str, value: String },
    #[error(transparent)]
    Segmenter(#[from] SegmentationError),
    #[error("{0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // Segmentation
    pub start_streak: u32,
    pub end_streak: u32,
    pub min_sign_frames: usize,
    pub max_sign_frames: usize,
    pub feature_dim: usize,

    // Classification
    /// Below this a gloss is flagged, not dropped.
    pub min_confidence: f32,
    /// Classifier input length in frames.
    pub max_len: usize,

    // Translation
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    pub models: Vec<String>,
    pub base_url: String,
    /// Network-level timeout on every backend request.
    pub request_timeout_ms: u64,
    /// Extra deadline per cascade attempt. None leaves it to the backend.
    pub attempt_timeout_ms: Option<u64>,

    // Assets
    pub project_root: PathBuf,
    pub gloss_index_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        let segmenter = SegmenterConfig::default();
        Self {
            start_streak: segmenter.start_streak,
            end_streak: segmenter.end_streak,
            min_sign_frames: segmenter.min_sign_frames,
            max_sign_frames: segmenter.max_sign_frames,
            feature_dim: DEFAULT_FEATURE_DIM,
            min_confidence: 0.4,
            max_len: 64,
            api_key: None,
            models: DEFAULT_MODELS.iter().map(|m| m.to_string()).collect(),
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_ms: 10_000,
            attempt_timeout_ms: None,
            project_root: PathBuf::new(),
            gloss_index_path: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from key-value pairs. Unset or blank keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let mut config = Self::default();

        if let Some(v) = get("START_STREAK") {
            config.start_streak = parse("START_STREAK", &v)?;
        }
        if let Some(v) = get("END_STREAK") {
            config.end_streak = parse("END_STREAK", &v)?;
        }
        if let Some(v) = get("MIN_SIGN_FRAMES") {
            config.min_sign_frames = parse("MIN_SIGN_FRAMES", &v)?;
        }
        if let Some(v) = get("MAX_SIGN_FRAMES") {
            config.max_sign_frames = parse("MAX_SIGN_FRAMES", &v)?;
        }
        if let Some(v) = get("FEATURE_DIM") {
            config.feature_dim = parse("FEATURE_DIM", &v)?;
        }
        if let Some(v) = get("MIN_CONFIDENCE") {
            config.min_confidence = parse("MIN_CONFIDENCE", &v)?;
        }
        if let Some(v) = get("MAX_LEN") {
            config.max_len = parse("MAX_LEN", &v)?;
        }

        config.api_key = get("GEMINI_API_KEY");
        if let Some(v) = get("GEMINI_MODELS") {
            config.models = v
                .split(',')
                .map(str::trim)
                .filter(|m| !m.is_empty())
                .map(String::from)
                .collect();
        }
        if let Some(v) = get("GEMINI_BASE_URL") {
            config.base_url = v.trim_end_matches('/').to_string();
        }
        if let Some(v) = get("GEMINI_TIMEOUT_MS") {
            config.request_timeout_ms = parse("GEMINI_TIMEOUT_MS", &v)?;
        }
        if let Some(v) = get("TRANSLATE_ATTEMPT_TIMEOUT_MS") {
            config.attempt_timeout_ms = Some(parse("TRANSLATE_ATTEMPT_TIMEOUT_MS", &v)?);
        }

        if let Some(v) = get("PROJECT_ROOT") {
            config.project_root = PathBuf::from(v);
        }
        config.gloss_index_path = get("GLOSA_INDEX_PATH").map(PathBuf::from);

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.segmenter().validate()?;
        if self.max_len == 0 {
            return Err(ConfigError::Invalid("max_len must be >= 1".into()));
        }
        if !(0.0..=1.0).contains(&self.min_confidence) {
            return Err(ConfigError::Invalid(format!(
                "min_confidence must be in [0, 1], got {}",
                self.min_confidence
            )));
        }
        if self.request_timeout_ms == 0 {
            return Err(ConfigError::Invalid("request_timeout_ms must be > 0".into()));
        }
        Ok(())
    }

    pub fn segmenter(&self) -> SegmenterConfig {
        SegmenterConfig {
            start_streak: self.start_streak,
            end_streak: self.end_streak,
            min_sign_frames: self.min_sign_frames,
            max_sign_frames: self.max_sign_frames,
            feature_dim: self.feature_dim,
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn attempt_timeout(&self) -> Option<Duration> {
        self.attempt_timeout_ms.map(Duration::from_millis)
    }

    /// Remote backends are only usable with a key.
    pub fn has_remote_backends(&self) -> bool {
        self.api_key.is_some() && !self.models.is_empty()
    }
}

fn parse<T: FromStr>(key: &'static str, value: &str) -> Result<T, ConfigError> {
    value.parse().map_err(|_| ConfigError::Parse {
        key,
        value: value.to_string(),
    })
}
