//! Configuration file loading for strata
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. Environment: `STRATA_API_URL`, `STRATA_<SECTION>__<KEY>`
//! 2. `--config <path>` specified file
//! 3. Project root: `./strata.toml` or `./.strata.toml`
//! 4. Global: `$XDG_CONFIG_HOME/strata/config.toml`
//! 5. Default values
//!
//! Command-line flags such as `--base-url` are applied on top by the binary.

mod file_config;
mod loader;

pub use file_config::{
    DEFAULT_BASE_URL, DEFAULT_TIMEOUT_MS, FileApiConfig, FileConfig, FileLoggingConfig,
    FileOutputConfig, FileStorageConfig,
};
pub use loader::{API_URL_ENV, ConfigLoader, ENV_PREFIX};
