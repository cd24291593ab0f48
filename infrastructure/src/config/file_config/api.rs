//! API connection settings (`[api]` section)

use serde::{Deserialize, Serialize};
use std::time::Duration;
use strata_domain::{ConfigIssue, ConfigIssueCode};

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000/api/v1";
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileApiConfig {
    /// Every request path is resolved against this URL
    pub base_url: String,
    /// Per-call timeout in milliseconds
    pub timeout_ms: u64,
}

impl Default for FileApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

impl FileApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        let base_url = self.base_url.trim();

        if base_url.is_empty() {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::EmptyValue {
                    field: "api.base_url".to_string(),
                },
                "api.base_url cannot be empty",
            ));
        } else if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::UnsupportedScheme {
                    field: "api.base_url".to_string(),
                    value: self.base_url.clone(),
                },
                format!(
                    "api.base_url must start with http:// or https:// (got '{}')",
                    self.base_url
                ),
            ));
        }

        if self.timeout_ms == 0 {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::ZeroDuration {
                    field: "api.timeout_ms".to_string(),
                },
                "api.timeout_ms cannot be 0",
            ));
        }

        issues
    }
}
