// modhunt: finds the mod that crashes a modded game server
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration section types.
//!
//! # Config Structure
//!
//! ```text
//! [global]  output_log_level, file_log_level, log_file
//! [server]  root, script, args, mods_dir, log_file, timeout_secs, settle_secs
//! [detect]  crash_signature
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::error::ConfigError;
use crate::logging::LogLevel;

/// Crash message a Forge server prints when a client-only mod is loaded.
pub const DEFAULT_CRASH_SIGNATURE: &str =
    "Attempted to load class net/minecraft/client/gui/Gui for invalid dist DEDICATED_SERVER";

/// Global options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Log level for console output (0-6).
    pub output_log_level: LogLevel,
    /// Log level for file output (0-6).
    pub file_log_level: LogLevel,
    /// Path to the tool's own log file; none by default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            output_log_level: LogLevel::INFO,
            file_log_level: LogLevel::TRACE,
            log_file: None,
        }
    }
}

/// Server layout and launch options.
///
/// Every relative path except `root` is resolved against `root`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    /// Server root directory, `~` is expanded.
    pub root: PathBuf,
    /// Start script, run with the server root as working directory.
    pub script: PathBuf,
    /// Extra arguments passed to the start script.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<String>,
    /// Directory holding the mod archives.
    pub mods_dir: PathBuf,
    /// File receiving the server's stdout and stderr.
    pub log_file: PathBuf,
    /// Wall-clock limit for one server run.
    pub timeout_secs: u64,
    /// Pause after the dependency rerun before the log is read.
    pub settle_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("~/forge_server"),
            script: PathBuf::from("start.sh"),
            args: Vec::new(),
            mods_dir: PathBuf::from("mods"),
            log_file: PathBuf::from("server_log.txt"),
            timeout_secs: 20,
            settle_secs: 2,
        }
    }
}

impl ServerConfig {
    /// Server timeout as a [`Duration`].
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Settle delay as a [`Duration`].
    #[must_use]
    pub const fn settle(&self) -> Duration {
        Duration::from_secs(self.settle_secs)
    }

    /// Check values that deserialize fine but make no sense.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for a zero timeout or an empty script.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timeout_secs == 0 {
            return Err(invalid("server", "timeout_secs", "must be greater than zero"));
        }
        if self.script.as_os_str().is_empty() {
            return Err(invalid("server", "script", "must not be empty"));
        }
        Ok(())
    }
}

/// Log inspection options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DetectConfig {
    /// Exact, case-sensitive text marking the crash being hunted.
    pub crash_signature: String,
}

impl Default for DetectConfig {
    fn default() -> Self {
        Self {
            crash_signature: DEFAULT_CRASH_SIGNATURE.to_string(),
        }
    }
}

impl DetectConfig {
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if the signature is blank, since
    /// an empty needle would match every log.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.crash_signature.trim().is_empty() {
            return Err(invalid("detect", "crash_signature", "must not be empty"));
        }
        Ok(())
    }
}

fn invalid(section: &str, key: &str, message: &str) -> ConfigError {
    ConfigError::InvalidValue {
        section: section.to_string(),
        key: key.to_string(),
        message: message.to_string(),
    }
}
