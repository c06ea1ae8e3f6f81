use std::sync::{Arc, Mutex, MutexGuard};

/// Ordered log of glosses recognized in the current session.
/// Entries are never edited in place: append, pop the last one, or clear.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GlossLedger {
    entries: Vec<String>,
}

impl GlossLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, gloss: impl Into<String>) {
        self.entries.push(gloss.into());
    }

    /// No-op on an empty ledger.
    pub fn pop_last(&mut self) -> Option<String> {
        self.entries.pop()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Space-joined view, as shown to the user.
    pub fn display(&self) -> String {
        self.entries.join(" ")
    }
}

/// Ledger shared between the recognition worker (append) and the user
/// facing side (pop/clear/snapshot). Every mutation takes the lock.
#[derive(Debug, Clone, Default)]
pub struct SharedLedger {
    inner: Arc<Mutex<GlossLedger>>,
}

impl SharedLedger {
    pub fn new() -> Self {
        Self::default()
    }

    // A panic while holding the lock cannot leave a Vec half-written,
    // so poisoning is ignored.
    fn lock(&self) -> MutexGuard<'_, GlossLedger> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn append(&self, gloss: impl Into<String>) {
        self.lock().append(gloss);
    }

    pub fn pop_last(&self) -> Option<String> {
        self.lock().pop_last()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Owned copy. Translation always works on one of these, never on the
    /// live ledger.
    pub fn snapshot(&self) -> Vec<String> {
        self.lock().entries().to_vec()
    }
}
