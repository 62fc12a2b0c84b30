//! In-place file processing around the redaction engine

use std::path::Path;
use std::time::Duration;

use patchwash_core::{RedactionCount, Redactor};
use tracing::debug;

use crate::error::ProcessError;

/// Reads a patch file, redacts every line and writes the result back.
pub struct PatchProcessor {
    redactor: Redactor,
    max_attempts: u32,
    retry_delay: Duration,
}

impl PatchProcessor {
    pub fn new(redactor: Redactor, max_attempts: u32, retry_delay: Duration) -> Self {
        Self {
            redactor,
            max_attempts,
            retry_delay,
        }
    }

    /// One full read-redact-write pass over `path`, retried on transient
    /// I/O failures up to the attempt budget. Returns the redaction report
    /// of the attempt that succeeded.
    pub async fn process(&self, path: &Path) -> Result<Vec<RedactionCount>, ProcessError> {
        let mut attempt = 1;
        loop {
            match self.process_once(path).await {
                Ok(report) => return Ok(report),
                Err(err) if err.is_transient() && attempt < self.max_attempts => {
                    debug!(
                        path = %path.display(),
                        attempt,
                        error = %err,
                        "processing attempt failed, retrying"
                    );
                    tokio::time::sleep(self.retry_delay).await;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }

    async fn process_once(&self, path: &Path) -> Result<Vec<RedactionCount>, ProcessError> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(ProcessError::from_read)?;
        let lines: Vec<String> = content.lines().map(String::from).collect();

        let (redacted, report) = self.redactor.redact_lines(&lines);

        let mut output = String::with_capacity(content.len());
        for line in &redacted {
            output.push_str(line);
            output.push('\n');
        }
        tokio::fs::write(path, output)
            .await
            .map_err(ProcessError::Io)?;

        Ok(report)
    }
}
