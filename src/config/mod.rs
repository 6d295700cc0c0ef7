// modhunt: finds the mod that crashes a modded game server
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration management for modhunt.
//!
//! # Configuration Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. defaults
//! 2. modhunt.toml (cwd, optional)
//! 3. --config FILE (repeatable)
//! 4. MODHUNT_* env vars
//! 5. CLI overrides
//! ```
//!
//! # Environment Variable Mapping
//!
//! ```text
//! MODHUNT_SERVER__ROOT=/srv/mc          → server.root = "/srv/mc"
//! MODHUNT_SERVER__TIMEOUT_SECS=40       → server.timeout_secs = 40
//! MODHUNT_DETECT__CRASH_SIGNATURE=...   → detect.crash_signature
//! ```

pub mod loader;
pub mod paths;
pub mod types;


use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::{ConfigError, Result};

use loader::ConfigLoader;
use paths::ServerPaths;
use types::{DetectConfig, GlobalConfig, ServerConfig};

/// Default config file looked up in the current directory.
pub const DEFAULT_CONFIG_FILE: &str = "modhunt.toml";

/// Prefix of the environment variables overriding config keys.
pub const ENV_PREFIX: &str = "MODHUNT";

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Global options.
    pub global: GlobalConfig,
    /// Server layout and launch options.
    pub server: ServerConfig,
    /// Log inspection options.
    pub detect: DetectConfig,
}

impl Config {
    /// Create a new configuration builder.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use modhunt::config::Config;
    ///
    /// let config = Config::builder()
    ///     .add_toml_file_optional("modhunt.toml")
    ///     .with_env_prefix("MODHUNT")
    ///     .build()?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    #[must_use]
    pub fn builder() -> ConfigLoader {
        ConfigLoader::new()
    }

    /// Load configuration from a single TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, contains invalid TOML, or
    /// does not match the `Config` structure.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::builder().add_toml_file(path).build()
    }

    /// Load configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML or does not match the
    /// `Config` structure.
    pub fn parse(content: &str) -> Result<Self> {
        Self::builder().add_toml_str(content).build()
    }

    /// Validate every section.
    ///
    /// # Errors
    ///
    /// Returns the first `ConfigError::InvalidValue` found.
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        self.server.validate()?;
        self.detect.validate()?;
        self.validate_log_paths()
    }

    /// The tool's own log must not overwrite the server log it inspects.
    fn validate_log_paths(&self) -> std::result::Result<(), ConfigError> {
        let Some(log_file) = &self.global.log_file else {
            return Ok(());
        };
        let absolute = |p: &Path| std::path::absolute(p).unwrap_or_else(|_| p.to_path_buf());
        if absolute(log_file.as_path()) == absolute(self.server_paths().log_file.as_path()) {
            return Err(ConfigError::InvalidValue {
                section: "global".to_string(),
                key: "log_file".to_string(),
                message: "must differ from server.log_file".to_string(),
            });
        }
        Ok(())
    }

    /// Resolved server paths.
    #[must_use]
    pub fn server_paths(&self) -> ServerPaths {
        ServerPaths::resolve(&self.server)
    }

    /// Format configuration options for display.
    ///
    /// Output is deterministically ordered using `BTreeMap`, paths are shown
    /// resolved.
    #[must_use]
    pub fn format_options(&self) -> Vec<String> {
        let mut options = BTreeMap::new();
        self.format_global_options(&mut options);
        self.format_server_options(&mut options);
        options.insert(
            "detect.crash_signature".into(),
            self.detect.crash_signature.clone(),
        );

        let max_key_len = options.keys().map(String::len).max().unwrap_or(0);

        options
            .into_iter()
            .map(|(key, value)| format!("{key:<max_key_len$} = {value}"))
            .collect()
    }

    fn format_global_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert(
            "global.output_log_level".into(),
            self.global.output_log_level.as_u8().to_string(),
        );
        options.insert(
            "global.file_log_level".into(),
            self.global.file_log_level.as_u8().to_string(),
        );
        if let Some(log_file) = &self.global.log_file {
            options.insert("global.log_file".into(), log_file.display().to_string());
        }
    }

    fn format_server_options(&self, options: &mut BTreeMap<String, String>) {
        let paths = self.server_paths();
        options.insert("server.root".into(), paths.root.display().to_string());
        options.insert("server.script".into(), paths.script.display().to_string());
        options.insert("server.args".into(), self.server.args.join(" "));
        options.insert(
            "server.mods_dir".into(),
            paths.mods_dir.display().to_string(),
        );
        options.insert(
            "server.log_file".into(),
            paths.log_file.display().to_string(),
        );
        options.insert(
            "server.timeout_secs".into(),
            self.server.timeout_secs.to_string(),
        );
        options.insert(
            "server.settle_secs".into(),
            self.server.settle_secs.to_string(),
        );
    }
}
