// modhunt: finds the mod that crashes a modded game server
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Global CLI options available for all commands.
//!
//! # Option Precedence
//!
//! ```text
//! --config FILE        <- additional config files (can repeat)
//! --server-root DIR    <- server.root
//! --timeout SECS       <- server.timeout_secs
//! --log-level N        <- console verbosity (0-6)
//! --file-log-level N   <- file verbosity (defaults to --log-level)
//! --log-file FILE      <- global.log_file
//!
//! Precedence: CLI flags > MODHUNT_* env > --config > modhunt.toml > defaults
//! ```

use clap::Args;
use std::path::PathBuf;

use crate::config::loader::ConfigLoader;
use crate::config::{Config, DEFAULT_CONFIG_FILE, ENV_PREFIX};
use crate::error::Result;

/// Global options available for all commands.
#[derive(Debug, Clone, Default, Args)]
pub struct GlobalOptions {
    /// Path to additional TOML configuration file(s).
    /// Can be specified multiple times; later files win.
    #[arg(short = 'c', long = "config", value_name = "FILE", action = clap::ArgAction::Append)]
    pub configs: Vec<PathBuf>,

    /// Does not load `modhunt.toml` from the current directory.
    #[arg(long = "no-default-config")]
    pub no_default_config: bool,

    /// Server root directory (holds the start script, mods and log).
    #[arg(short = 'r', long = "server-root", value_name = "DIR")]
    pub server_root: Option<PathBuf>,

    /// Seconds before a server run is killed and counted as a timeout.
    #[arg(short = 't', long = "timeout", value_name = "SECS", value_parser = clap::value_parser!(u32).range(1..))]
    pub timeout: Option<u32>,

    /// Console log level (0=silent, 1=errors, 2=warnings, 3=info, 4=debug, 5=trace, 6=dump).
    #[arg(short = 'l', long = "log-level", value_name = "LEVEL", value_parser = clap::value_parser!(u8).range(0..=6)
    )]
    pub log_level: Option<u8>,

    /// File log level, overrides --log-level for the log file.
    #[arg(long = "file-log-level", value_name = "LEVEL", value_parser = clap::value_parser!(u8).range(0..=6)
    )]
    pub file_log_level: Option<u8>,

    /// Path to log file.
    #[arg(long = "log-file", value_name = "FILE")]
    pub log_file: Option<PathBuf>,
}

impl GlobalOptions {
    /// Builds the layered config loader: defaults, `modhunt.toml`,
    /// `--config` files, environment, then CLI overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if an override cannot be applied.
    pub fn config_loader(&self) -> Result<ConfigLoader> {
        let mut loader = Config::builder();
        if !self.no_default_config {
            loader = loader.add_toml_file_optional(DEFAULT_CONFIG_FILE);
        }
        for path in &self.configs {
            loader = loader.add_toml_file(path);
        }
        self.apply_overrides(loader.with_env_prefix(ENV_PREFIX))
    }

    /// Applies command-line flags as highest-priority overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the loader rejects a key.
    pub fn apply_overrides(&self, mut loader: ConfigLoader) -> Result<ConfigLoader> {
        if let Some(level) = self.log_level {
            loader = loader.set("global.output_log_level", i64::from(level))?;
        }

        // file_log_level falls back to log_level if not specified
        if let Some(level) = self.file_log_level.or(self.log_level) {
            loader = loader.set("global.file_log_level", i64::from(level))?;
        }

        if let Some(ref path) = self.log_file {
            loader = loader.set("global.log_file", path.display().to_string())?;
        }

        if let Some(ref root) = self.server_root {
            loader = loader.set("server.root", root.display().to_string())?;
        }

        if let Some(secs) = self.timeout {
            loader = loader.set("server.timeout_secs", i64::from(secs))?;
        }

        Ok(loader)
    }
}
