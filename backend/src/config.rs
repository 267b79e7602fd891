//! Process settings loaded via OrthoConfig.

use std::path::{Path, PathBuf};

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::domain::DEFAULT_SIGNUP_PASSWORD;

const DEFAULT_LOG_FILTER: &str = "info";

/// Settings shared by the backend binaries.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "QNA")]
pub struct AppSettings {
    /// `tracing` filter directive used when `RUST_LOG` is unset.
    pub log_filter: Option<String>,
    /// Emit logs as JSON lines.
    #[ortho_config(default = true)]
    pub json_logs: bool,
    /// Password assigned to signups that do not supply one.
    pub default_password: Option<String>,
    /// JSON script read by `replay-ops`.
    pub replay_script: Option<PathBuf>,
}

impl AppSettings {
    /// Return the configured log filter, falling back to `info`.
    pub fn log_filter(&self) -> &str {
        self.log_filter.as_deref().unwrap_or(DEFAULT_LOG_FILTER)
    }

    /// Return the configured signup password, falling back to the built-in
    /// default.
    pub fn default_password(&self) -> &str {
        self.default_password
            .as_deref()
            .unwrap_or(DEFAULT_SIGNUP_PASSWORD)
    }

    /// Return the configured replay script path, if any.
    pub fn replay_script(&self) -> Option<&Path> {
        self.replay_script.as_deref()
    }
}
