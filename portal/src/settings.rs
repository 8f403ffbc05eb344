//! Portal configuration loaded via OrthoConfig.

use std::path::PathBuf;

use ortho_config::OrthoConfig;
use serde::Deserialize;

/// Directory used for the local store when nothing else is configured.
pub const DEFAULT_DATA_DIR: &str = ".gorodok";

/// Configuration values for the `gorodok` binary.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "PORTAL")]
pub struct PortalSettings {
    /// Directory holding the persisted portal entries.
    pub data_dir: Option<PathBuf>,
    /// Emit logs as JSON lines instead of human-readable text.
    #[ortho_config(default = false)]
    pub json_logs: bool,
}

impl PortalSettings {
    /// Return the configured data directory, falling back to the default.
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR))
    }

    /// Prefer `override_dir` (from the command line) over configuration.
    #[must_use]
    pub fn with_data_dir(mut self, override_dir: Option<PathBuf>) -> Self {
        if override_dir.is_some() {
            self.data_dir = override_dir;
        }
        self
    }
}
