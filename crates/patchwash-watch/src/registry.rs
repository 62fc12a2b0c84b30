//! Shared record of recently processed files

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

/// Last-processed timestamps for every file seen this session.
///
/// Shared by the notification handler and the processing tasks. The entry
/// API keeps the debounce check-and-stamp atomic per path, so a burst of
/// notifications for one file admits exactly one of them. Entries are kept
/// for the whole session.
#[derive(Debug, Default)]
pub struct ProcessedRegistry {
    entries: DashMap<PathBuf, Instant>,
}

impl ProcessedRegistry {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    /// Debounce gate. Rejects `path` when it was stamped within `window`;
    /// otherwise stamps it now and admits it.
    pub fn try_admit(&self, path: &Path, window: Duration) -> bool {
        let now = Instant::now();
        match self.entries.entry(path.to_path_buf()) {
            Entry::Occupied(mut entry) => {
                if now.duration_since(*entry.get()) < window {
                    false
                } else {
                    entry.insert(now);
                    true
                }
            }
            Entry::Vacant(entry) => {
                entry.insert(now);
                true
            }
        }
    }

    /// Re-stamp `path` after its rewrite completed, so the notification
    /// caused by our own write falls inside the debounce window.
    pub fn mark_processed(&self, path: &Path) {
        self.entries.insert(path.to_path_buf(), Instant::now());
    }

    /// When `path` was last admitted or rewritten, if ever.
    pub fn last_processed(&self, path: &Path) -> Option<Instant> {
        self.entries.get(path).map(|entry| *entry.value())
    }
}
