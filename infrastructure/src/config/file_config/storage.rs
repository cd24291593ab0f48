//! Persisted client storage settings (`[storage]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileStorageConfig {
    /// Storage file; defaults to `$XDG_DATA_HOME/strata/storage.json`
    pub path: Option<PathBuf>,
}

impl FileStorageConfig {
    /// `None` only when no data directory can be determined.
    pub fn default_path() -> Option<PathBuf> {
        dirs::data_dir().map(|d| d.join("strata").join("storage.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_path_is_under_strata() {
        if let Some(path) = FileStorageConfig::default_path() {
            assert!(path.ends_with("strata/storage.json"));
        }
    }
}
