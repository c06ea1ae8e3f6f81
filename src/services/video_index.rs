use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{info, warn};

#[derive(Debug, Clone, Deserialize)]
pub struct VideoEntry {
    /// Relative to the project root.
    #[serde(default)]
    pub path: String,
}

/// Gloss -> sign video lookup, backed by a JSON index keyed by upper-case
/// gloss: `{ "HOLA": { "path": "videos/hola.mp4" } }`.
#[derive(Debug, Clone, Default)]
pub struct GlossVideoIndex {
    root: PathBuf,
    entries: HashMap<String, VideoEntry>,
}

impl GlossVideoIndex {
    pub fn new(root: impl Into<PathBuf>, entries: HashMap<String, VideoEntry>) -> Self {
        Self {
            root: root.into(),
            entries: entries.into_iter().map(|(k, v)| (k.to_uppercase(), v)).collect(),
        }
    }

    pub fn from_json(root: impl Into<PathBuf>, json: &str) -> Result<Self, serde_json::Error> {
        let entries: HashMap<String, VideoEntry> = serde_json::from_str(json)?;
        Ok(Self::new(root, entries))
    }

    /// An unreadable or malformed index gives an empty one, every lookup
    /// then misses.
    pub fn load(root: impl Into<PathBuf>, index_path: &Path) -> Self {
        let root = root.into();
        let loaded = fs::read_to_string(index_path)
            .map_err(|e| e.to_string())
            .and_then(|raw| Self::from_json(root.clone(), &raw).map_err(|e| e.to_string()));

        match loaded {
            Ok(index) => {
                info!(glosses = index.len(), path = %index_path.display(), "Loaded gloss video index");
                index
            }
            Err(e) => {
                warn!(path = %index_path.display(), "Error loading gloss video index: {}", e);
                Self::new(root, HashMap::new())
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, gloss: &str) -> bool {
        self.entries.contains_key(&gloss.to_uppercase())
    }

    /// Absolute path of the sign video for `gloss`, if indexed and on disk.
    pub fn lookup(&self, gloss: &str) -> Option<PathBuf> {
        let entry = self.entries.get(&gloss.to_uppercase())?;
        if entry.path.is_empty() {
            return None;
        }

        let path = self.root.join(&entry.path);
        if !path.exists() {
            warn!(path = %path.display(), "Video file not found");
            return None;
        }
        Some(path)
    }
}
