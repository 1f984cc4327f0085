//! Storage layout configuration

use std::path::PathBuf;

use directories::BaseDirs;

use crate::filesys::file::File;

/// Location of local state
#[derive(Debug, Clone)]
pub struct StorageLayout {
    /// Credential file path
    pub data_file: PathBuf,
}

impl StorageLayout {
    /// Create a layout around an explicit credential file
    pub fn new(data_file: impl Into<PathBuf>) -> Self {
        Self {
            data_file: data_file.into(),
        }
    }

    /// Layout honoring an override path, falling back to the per-user default
    pub fn with_override(data_file: Option<PathBuf>) -> Self {
        match data_file {
            Some(path) if !path.as_os_str().is_empty() => Self::new(path),
            _ => Self::default(),
        }
    }

    /// Get the credential file
    pub fn credentials_file(&self) -> File {
        File::new(&self.data_file)
    }
}

impl Default for StorageLayout {
    fn default() -> Self {
        Self::new(default_data_file())
    }
}

/// Per-user config directory (XDG on Linux, Application Support on macOS, AppData on
/// Windows), or the temp dir when no home directory can be determined
pub fn default_data_file() -> PathBuf {
    BaseDirs::new()
        .map(|dirs| dirs.config_dir().join("zerops").join("zaia.data"))
        .unwrap_or_else(|| std::env::temp_dir().join("zerops.zaia.data"))
}
