//! Ordered line scanner with commit-message suppression

use serde::{Deserialize, Serialize};

use crate::rules::{Counts, RuleSet};

/// Token written over every line inside a suppressed commit-message block
pub const REMOVED_COMMIT_MESSAGE: &str = "REMOVED_COMMIT_MESSAGE";

/// How many substitutions one rule made during a scan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedactionCount {
    pub rule: String,
    pub count: usize,
}

/// Scanner position relative to a commit-message block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Normal,
    Suppressing,
}

/// Redaction engine for patch files
///
/// Pure line transformation: no file handles, no timing, no shared state.
/// The output always has exactly as many lines as the input.
pub struct Redactor {
    rules: RuleSet,
}

impl Redactor {
    pub fn new() -> Self {
        Self {
            rules: RuleSet::new(),
        }
    }

    /// Redact one file's lines in order, returning the transformed lines
    /// and the per-rule substitution counts.
    pub fn redact_lines(&self, lines: &[String]) -> (Vec<String>, Vec<RedactionCount>) {
        let mut counts = Counts::new();
        let mut out = Vec::with_capacity(lines.len());
        let mut state = ScanState::Normal;

        for raw in lines {
            if state == ScanState::Suppressing {
                // Block end is decided on the raw line, so a boundary can
                // never be suppressed away
                if !ends_block(raw) {
                    *counts.entry("commit_message").or_insert(0) += 1;
                    out.push(REMOVED_COMMIT_MESSAGE.to_string());
                    continue;
                }
                state = ScanState::Normal;
            }

            let line = self.rules.scrub_identifiers(raw, &mut counts);
            if line.starts_with("Date:") {
                // The date header opens the block and skips the code pass
                state = ScanState::Suppressing;
                out.push(line);
            } else {
                out.push(self.rules.scrub_code(&line, &mut counts));
            }
        }

        let report = counts
            .into_iter()
            .map(|(rule, count)| RedactionCount {
                rule: rule.to_string(),
                count,
            })
            .collect();

        (out, report)
    }
}

impl Default for Redactor {
    fn default() -> Self {
        Self::new()
    }
}

fn ends_block(raw: &str) -> bool {
    raw.starts_with("---") || raw.starts_with("diff ")
}
