//! Activator configuration
//!
//! Loaded once at startup. Every field has a default, so a partial (or
//! missing) file is fine.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::constants::{config, session};

fn default_force_enabled() -> bool {
    true
}

fn default_session_process() -> String {
    session::SESSION_PROCESS.to_string()
}

fn default_process_query_command() -> String {
    session::PROCESS_QUERY_COMMAND.to_string()
}

fn default_competing_session_var() -> String {
    session::COMPETING_SESSION_VAR.to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivatorConfig {
    /// Allow the forced GTK presentation path at all
    #[serde(default = "default_force_enabled")]
    pub force_enabled: bool,

    /// Session-manager process that marks the target desktop
    #[serde(default = "default_session_process")]
    pub session_process: String,

    /// Command invoked as `<command> <session_process>`; must exit 0 and
    /// print something when the process is running
    #[serde(default = "default_process_query_command")]
    pub process_query_command: String,

    /// Environment variable whose non-empty value vetoes the target session
    #[serde(default = "default_competing_session_var")]
    pub competing_session_var: String,
}

impl Default for ActivatorConfig {
    fn default() -> Self {
        Self {
            force_enabled: default_force_enabled(),
            session_process: default_session_process(),
            process_query_command: default_process_query_command(),
            competing_session_var: default_competing_session_var(),
        }
    }
}

impl ActivatorConfig {
    /// Location of the config file
    pub fn path() -> PathBuf {
        let mut path = match std::env::var_os(config::DIR_OVERRIDE_VAR) {
            Some(dir) if !dir.is_empty() => PathBuf::from(dir),
            _ => {
                let mut base = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
                base.push(config::APP_DIR);
                base
            }
        };
        path.push(config::FILENAME);
        path
    }

    /// Load from the default location, falling back to defaults when absent
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path())
    }

    /// Load from an explicit path, falling back to defaults when absent
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            info!(path = ?path, "Config file not found, using defaults");
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;

        let config: Self = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse JSON from {:?}", path))?;

        info!(
            path = ?path,
            force_enabled = config.force_enabled,
            session_process = %config.session_process,
            "Loaded activator config"
        );
        Ok(config)
    }
}
