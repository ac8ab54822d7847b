#![warn(missing_docs)]
//! `runstyle-wire` - Text wire format for styled span writes.
//!
//! External tools describe styled spans as UTF-8 text lines; this crate parses
//! that grammar into [`runstyle_core::StyleRun`]s and applies the result to a
//! run store as one region update. Malformed payloads are rejected wholly;
//! payloads produced from a stale snapshot of the text are truncated to fit,
//! which is a tolerated recovery rather than an error.

pub mod error;
pub mod parser;
pub mod processor;

pub use error::WireError;
pub use parser::{SpanUpdate, parse_spans};
pub use processor::{apply_payload, apply_to_document, apply_update};
