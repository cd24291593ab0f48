//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod api;
mod logging;
mod output;
mod storage;

pub use api::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_MS, FileApiConfig};
pub use logging::FileLoggingConfig;
pub use output::FileOutputConfig;
pub use storage::FileStorageConfig;

use serde::{Deserialize, Serialize};
use strata_domain::{ConfigIssue, ConfigIssueCode};

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// API connection settings
    pub api: FileApiConfig,
    /// Persisted client storage
    pub storage: FileStorageConfig,
    /// Output settings
    pub output: FileOutputConfig,
    /// Request audit logging
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = self.api.validate();

        if let Some(path) = &self.logging.request_log
            && path.as_os_str().is_empty()
        {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::EmptyValue {
                    field: "logging.request_log".to_string(),
                },
                "logging.request_log is empty, request logging disabled",
            ));
        }

        if let Some(path) = &self.storage.path
            && path.as_os_str().is_empty()
        {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::EmptyValue {
                    field: "storage.path".to_string(),
                },
                "storage.path is empty, using the default location",
            ));
        }

        issues
    }

    /// Request log path, ignoring an empty value.
    pub fn request_log(&self) -> Option<&std::path::Path> {
        self.logging
            .request_log
            .as_deref()
            .filter(|p| !p.as_os_str().is_empty())
    }

    /// Storage file path, falling back to the default for an empty value.
    pub fn storage_path(&self) -> Option<std::path::PathBuf> {
        match &self.storage.path {
            Some(path) if !path.as_os_str().is_empty() => Some(path.clone()),
            _ => FileStorageConfig::default_path(),
        }
    }
}
