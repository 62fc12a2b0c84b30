//! Watch dispatcher: filesystem notifications in, processing tasks out

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use glob::Pattern;
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use patchwash_core::Redactor;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use crate::error::WatchError;
use crate::processor::PatchProcessor;
use crate::registry::ProcessedRegistry;

/// Tunables for one watch session.
#[derive(Debug, Clone)]
pub struct WatchOptions {
    /// File-name pattern a notification must match
    pub pattern: String,
    /// Reject a notification when the path was processed this recently
    pub debounce: Duration,
    /// Pause between an admitted notification and the first read
    pub settle: Duration,
    /// Read-redact-write attempts per admitted notification
    pub max_attempts: u32,
    /// Pause between attempts
    pub retry_delay: Duration,
}

impl Default for WatchOptions {
    fn default() -> Self {
        Self {
            pattern: "*.patch".to_string(),
            debounce: Duration::from_secs(1),
            settle: Duration::from_millis(500),
            max_attempts: 5,
            retry_delay: Duration::from_millis(500),
        }
    }
}

/// Owns the filesystem watcher and turns qualifying change notifications
/// into spawned processing tasks.
pub struct WatchDispatcher {
    dir: PathBuf,
    pattern: Pattern,
    options: WatchOptions,
    registry: Arc<ProcessedRegistry>,
    processor: Arc<PatchProcessor>,
}

impl WatchDispatcher {
    pub fn new(dir: PathBuf, options: WatchOptions) -> Result<Self, WatchError> {
        let pattern = Pattern::new(&options.pattern).map_err(|source| {
            WatchError::InvalidPattern {
                pattern: options.pattern.clone(),
                source,
            }
        })?;
        let processor = Arc::new(PatchProcessor::new(
            Redactor::new(),
            options.max_attempts,
            options.retry_delay,
        ));

        Ok(Self {
            dir,
            pattern,
            options,
            registry: Arc::new(ProcessedRegistry::new()),
            processor,
        })
    }

    /// Registry handle, shared with the spawned processing tasks.
    pub fn registry(&self) -> Arc<ProcessedRegistry> {
        self.registry.clone()
    }

    /// Watch the directory (non-recursively) and dispatch until the
    /// notification stream ends or the future is dropped.
    pub async fn run(&self) -> Result<(), WatchError> {
        let (tx, mut rx) = mpsc::unbounded_channel();

        let mut watcher = RecommendedWatcher::new(
            move |res: Result<Event, notify::Error>| {
                let _ = tx.send(res);
            },
            notify::Config::default(),
        )?;

        watcher
            .watch(&self.dir, RecursiveMode::NonRecursive)
            .map_err(|source| WatchError::WatchPath {
                path: self.dir.clone(),
                source,
            })?;

        info!(
            dir = %self.dir.display(),
            pattern = %self.options.pattern,
            "watching for patch files"
        );

        while let Some(res) = rx.recv().await {
            match res {
                Ok(event) => self.handle_event(&event),
                Err(err) => warn!(error = %err, "watch backend error"),
            }
        }

        Ok(())
    }

    /// Filter, debounce and dispatch one raw notification. Never blocks:
    /// the settle pause and all file I/O happen on spawned tasks.
    pub fn handle_event(&self, event: &Event) {
        if !matches!(event.kind, EventKind::Create(_) | EventKind::Modify(_)) {
            return;
        }

        for path in &event.paths {
            if !self.matches_pattern(path) {
                continue;
            }
            if !self.registry.try_admit(path, self.options.debounce) {
                debug!(path = %path.display(), "debounced repeated notification");
                continue;
            }
            self.spawn_processing(path.clone());
        }
    }

    fn matches_pattern(&self, path: &Path) -> bool {
        path.file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| self.pattern.matches(name))
    }

    /// One independent task per admitted notification, so a slow or
    /// retrying file never holds up the others.
    fn spawn_processing(&self, path: PathBuf) {
        let registry = self.registry.clone();
        let processor = self.processor.clone();
        let settle = self.options.settle;

        tokio::spawn(async move {
            // Let the writer finish before the first read
            tokio::time::sleep(settle).await;

            match processor.process(&path).await {
                Ok(report) => {
                    registry.mark_processed(&path);
                    let replacements: usize = report.iter().map(|c| c.count).sum();
                    info!(path = %path.display(), replacements, "sanitized patch file");
                    debug!(path = %path.display(), ?report, "redaction report");
                }
                Err(err) => {
                    error!(path = %path.display(), error = %err, "failed to sanitize patch file");
                }
            }
        });
    }
}
