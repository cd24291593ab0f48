//! Structured request logging.
//!
//! Provides [`JsonlRequestLogger`], a JSONL file writer that implements
//! the [`RequestLogger`](strata_application::RequestLogger) port.

mod jsonl_request_logger;

pub use jsonl_request_logger::JsonlRequestLogger;
