use super::backend::BackendError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Rate limit or quota hit. The next backend may still have budget.
    QuotaExhausted,
    Other,
}

/// Decides what kind of failure a backend error is.
pub trait ErrorClassifier: Send + Sync {
    fn classify(&self, error: &BackendError) -> FailureKind;
}

/// Matches on HTTP status first, then on keywords in the error text.
#[derive(Debug, Clone)]
pub struct KeywordClassifier {
    status_codes: Vec<u16>,
    /// Lower-case.
    keywords: Vec<String>,
}

impl Default for KeywordClassifier {
    fn default() -> Self {
        Self {
            status_codes: vec![429],
            keywords: vec!["quota".into(), "resource_exhausted".into(), "rate limit".into()],
        }
    }
}

impl KeywordClassifier {
    pub fn new(status_codes: Vec<u16>, keywords: Vec<String>) -> Self {
        Self {
            status_codes,
            keywords: keywords.into_iter().map(|k| k.to_lowercase()).collect(),
        }
    }
}

impl ErrorClassifier for KeywordClassifier {
    fn classify(&self, error: &BackendError) -> FailureKind {
        if let BackendError::Status { code, .. } = error {
            if self.status_codes.contains(code) {
                return FailureKind::QuotaExhausted;
            }
        }

        let text = error.to_string().to_lowercase();
        if self.keywords.iter().any(|k| text.contains(k.as_str())) {
            FailureKind::QuotaExhausted
        } else {
            FailureKind::Other
        }
    }
}
