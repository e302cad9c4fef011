//! Logging infrastructure: structured transcript logging.
//!
//! Provides [`JsonlTranscriptLogger`], a JSONL file writer that observes a
//! conference through the
//! [`ObserverConnection`](roundtable_application::ObserverConnection) port.

mod jsonl_logger;

pub use jsonl_logger::JsonlTranscriptLogger;
