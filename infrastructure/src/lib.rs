//! Infrastructure layer for strata-client
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer: the reqwest transport, file-backed storage,
//! the JSONL request log, and configuration file loading.

pub mod config;
pub mod http;
pub mod logging;
pub mod storage;

// Re-export commonly used types
pub use config::{
    API_URL_ENV, ConfigLoader, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_MS, ENV_PREFIX, FileApiConfig,
    FileConfig, FileLoggingConfig, FileOutputConfig, FileStorageConfig,
};
pub use http::ReqwestTransport;
pub use logging::JsonlRequestLogger;
pub use storage::FileKeyValueStore;
