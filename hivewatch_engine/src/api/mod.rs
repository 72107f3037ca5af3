//! # Public API
//!
//! High-level entry points for callers that work with snapshot documents.

pub mod errors;
pub mod processor;

pub use errors::ProcessorError;
pub use processor::{SnapshotProcessor, SpecDocument, SpecRejection, SpecValidationReport};
