//! Redaction engine for patch files
//!
//! This crate contains:
//! - The ordered rule set (identifier pass and code pass)
//! - The line scanner with commit-message block suppression
//!
//! Everything here is pure: callers own the I/O and the scheduling.

mod rules;
mod scanner;

pub use scanner::{REMOVED_COMMIT_MESSAGE, RedactionCount, Redactor};
