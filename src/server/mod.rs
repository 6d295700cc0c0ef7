// modhunt: finds the mod that crashes a modded game server
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Game server launching.
//!
//! ```text
//! ServerLauncher (trait)
//!   reset_log()      truncate the capture file
//!   launch(token)    run <root>/<script> [args], cwd = root,
//!                    stdout+stderr -> log, bounded by timeout
//!   read_log()       lossy text, "" when unreadable
//!        ^
//!        |
//!   ServerRunner     real implementation on core::process
//! ```
//!
//! The hunt loop only talks to the trait, so tests can swap in a launcher
//! that writes canned logs instead of starting a JVM.


use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use futures_util::future::BoxFuture;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::config::paths::ServerPaths;
use crate::core::process::builder::{
    INTERRUPT_EXIT_CODE, ProcessBuilder, ProcessOutcome, TIMEOUT_EXIT_CODE,
};

/// Exit status reported when the server could not be started.
pub const SPAWN_FAILED_EXIT_CODE: i32 = 1;

/// How a single server run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerStatus {
    /// Exited on its own; `-1` when killed by a signal.
    Exited(i32),
    /// Killed after the configured timeout.
    TimedOut,
    /// Killed because the run was cancelled.
    Interrupted,
    /// The start script could not be launched.
    SpawnFailed,
}

impl ServerStatus {
    #[must_use]
    pub const fn code(self) -> i32 {
        match self {
            Self::Exited(code) => code,
            Self::TimedOut => TIMEOUT_EXIT_CODE,
            Self::Interrupted => INTERRUPT_EXIT_CODE,
            Self::SpawnFailed => SPAWN_FAILED_EXIT_CODE,
        }
    }
}

impl From<ProcessOutcome> for ServerStatus {
    fn from(outcome: ProcessOutcome) -> Self {
        match outcome {
            ProcessOutcome::Exited(code) => Self::Exited(code),
            ProcessOutcome::TimedOut => Self::TimedOut,
            ProcessOutcome::Interrupted => Self::Interrupted,
        }
    }
}

impl fmt::Display for ServerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exited(code) => write!(f, "exited with {code}"),
            Self::TimedOut => write!(f, "timed out ({TIMEOUT_EXIT_CODE})"),
            Self::Interrupted => write!(f, "interrupted ({INTERRUPT_EXIT_CODE})"),
            Self::SpawnFailed => write!(f, "failed to start ({SPAWN_FAILED_EXIT_CODE})"),
        }
    }
}

/// Something that can run the server once and hand back its log.
pub trait ServerLauncher: Send + Sync {
    /// Empties the log file. Failures are logged, not returned.
    fn reset_log(&self) -> BoxFuture<'_, ()>;

    /// Runs the server to completion, timeout or cancellation.
    fn launch<'a>(&'a self, token: &'a CancellationToken) -> BoxFuture<'a, ServerStatus>;

    /// Returns the captured log, or an empty string if it cannot be read.
    fn read_log(&self) -> BoxFuture<'_, String>;
}

/// Launches the real server start script.
#[derive(Debug, Clone)]
pub struct ServerRunner {
    paths: ServerPaths,
    args: Vec<String>,
    timeout: Duration,
}

impl ServerRunner {
    #[must_use]
    pub const fn new(paths: ServerPaths, args: Vec<String>, timeout: Duration) -> Self {
        Self {
            paths,
            args,
            timeout,
        }
    }

    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.server_paths(),
            config.server.args.clone(),
            config.server.timeout(),
        )
    }

    #[must_use]
    pub const fn paths(&self) -> &ServerPaths {
        &self.paths
    }

    #[must_use]
    pub fn log_file(&self) -> &Path {
        &self.paths.log_file
    }

    fn process(&self) -> ProcessBuilder {
        ProcessBuilder::new(&self.paths.script)
            .args(&self.args)
            .cwd(&self.paths.root)
            .output_file(&self.paths.log_file)
            .name("server")
            .timeout(self.timeout)
    }

    async fn run(&self, token: &CancellationToken) -> ServerStatus {
        info!(
            script = %self.paths.script.display(),
            timeout_secs = self.timeout.as_secs(),
            "starting server"
        );
        let status = match self.process().run_with_cancellation(token.clone()).await {
            Ok(outcome) => ServerStatus::from(outcome),
            Err(e) => {
                warn!("{e}");
                ServerStatus::SpawnFailed
            }
        };
        match status {
            ServerStatus::TimedOut => {
                warn!(timeout_secs = self.timeout.as_secs(), "server timed out");
            }
            other => debug!(status = %other, "server finished"),
        }
        status
    }
}

async fn truncate(path: PathBuf) {
    if let Err(e) = tokio::fs::write(&path, b"").await {
        warn!(path = %path.display(), error = %e, "could not reset log");
    }
}

async fn read_lossy(path: PathBuf) -> String {
    match tokio::fs::read(&path).await {
        Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "could not read log");
            String::new()
        }
    }
}

impl ServerLauncher for ServerRunner {
    fn reset_log(&self) -> BoxFuture<'_, ()> {
        Box::pin(truncate(self.paths.log_file.clone()))
    }

    fn launch<'a>(&'a self, token: &'a CancellationToken) -> BoxFuture<'a, ServerStatus> {
        Box::pin(self.run(token))
    }

    fn read_log(&self) -> BoxFuture<'_, String> {
        Box::pin(read_lossy(self.paths.log_file.clone()))
    }
}
