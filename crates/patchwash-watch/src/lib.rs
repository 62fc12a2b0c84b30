//! Filesystem watching and dispatch for patchwash
//!
//! This crate contains:
//! - Watch dispatcher (notification filter, debounce, task spawn)
//! - Processed-file registry shared across tasks
//! - Retrying in-place processor around the redaction engine

pub mod dispatcher;
pub mod error;
pub mod processor;
pub mod registry;

pub use dispatcher::{WatchDispatcher, WatchOptions};
pub use error::{ProcessError, WatchError};
pub use processor::PatchProcessor;
pub use registry::ProcessedRegistry;
