// modhunt: finds the mod that crashes a modded game server
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Process execution and lifecycle management.
//!
//! ```text
//! run() / run_with_cancellation(token)
//!              |
//!              v
//!     build_command()
//!     args, cwd, stdio, own process group
//!              |
//!              v
//!          spawn() --> Job::attach()
//!              |
//!              v
//!   select { wait | timeout | cancelled }
//!              |        \         /
//!              |      kill job + child
//!              v
//!       ProcessOutcome
//!     (Job dropped: stragglers killed)
//! ```

use std::fs::File;
use std::process::Stdio;
use std::time::Duration;

use tokio::process::{Child, Command};
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace, warn};

use super::builder::{OutputTarget, ProcessBuilder, ProcessOutcome};
use crate::core::job::Job;
use crate::error::ProcessError;

impl ProcessBuilder {
    /// Returns the display name for this process.
    fn display_name(&self) -> String {
        self.name_override().map_or_else(
            || {
                self.program().file_stem().map_or_else(
                    || "process".to_string(),
                    |s| s.to_string_lossy().into_owned(),
                )
            },
            String::from,
        )
    }

    /// Returns the full command line as a string (for logging).
    fn command_line(&self) -> String {
        use std::fmt::Write as _;
        let mut cmd = format!("{}", self.program().display());
        for arg in self.args_slice() {
            if arg.contains(' ') {
                let _ = write!(cmd, " \"{arg}\"");
            } else {
                let _ = write!(cmd, " {arg}");
            }
        }
        cmd
    }

    /// Spawns and runs the process, waiting for completion or timeout.
    ///
    /// # Errors
    ///
    /// Returns a `ProcessError` if the output file cannot be opened, the
    /// process cannot be spawned, or waiting on it fails.
    pub async fn run(self) -> Result<ProcessOutcome, ProcessError> {
        self.run_with_cancellation(CancellationToken::new()).await
    }

    /// Spawns and runs the process with cancellation support.
    ///
    /// When the timeout elapses or the token is cancelled, the whole process
    /// tree is killed and the outcome is `TimedOut` or `Interrupted`. A
    /// non-zero exit is not an error; callers inspect the outcome.
    ///
    /// # Errors
    ///
    /// Returns a `ProcessError` if the output file cannot be opened, the
    /// process cannot be spawned, or waiting on it fails.
    pub async fn run_with_cancellation(
        self,
        token: CancellationToken,
    ) -> Result<ProcessOutcome, ProcessError> {
        let name = self.display_name();
        let cmd_line = self.command_line();

        if token.is_cancelled() {
            return Ok(ProcessOutcome::Interrupted);
        }

        if let Some(cwd) = self.working_dir() {
            debug!(cwd = %cwd.display(), "cd");
        }
        debug!(cmd = %cmd_line, "exec");

        let mut command = self.build_command()?;
        let mut child = command
            .spawn()
            .map_err(|source| ProcessError::SpawnFailed {
                command: cmd_line.clone(),
                source,
            })?;

        trace!(process = %name, pid = ?child.id(), "spawned");

        let job = match Job::attach(&child) {
            Ok(job) => Some(job),
            Err(e) => {
                warn!(process = %name, error = %e, "could not track process tree");
                None
            }
        };

        let outcome = self
            .wait_child(&name, &mut child, job.as_ref(), &token)
            .await
            .map_err(|source| ProcessError::WaitFailed {
                command: cmd_line,
                source,
            })?;

        trace!(process = %name, outcome = ?outcome, "completed");
        Ok(outcome)
    }

    async fn wait_child(
        &self,
        name: &str,
        child: &mut Child,
        job: Option<&Job>,
        token: &CancellationToken,
    ) -> std::io::Result<ProcessOutcome> {
        let deadline = deadline(self.timeout_duration());

        tokio::select! {
            status = child.wait() => Ok(ProcessOutcome::Exited(status?.code().unwrap_or(-1))),
            () = deadline => {
                warn!(process = %name, timeout = ?self.timeout_duration(), "Process timed out");
                terminate(child, job).await?;
                Ok(ProcessOutcome::TimedOut)
            }
            () = token.cancelled() => {
                warn!(process = %name, "Cancellation requested, terminating process");
                terminate(child, job).await?;
                Ok(ProcessOutcome::Interrupted)
            }
        }
    }

    /// Builds the tokio Command from this builder's configuration.
    fn build_command(&self) -> Result<Command, ProcessError> {
        let mut command = Command::new(self.program());

        command.args(self.args_slice());

        if let Some(cwd) = self.working_dir() {
            command.current_dir(cwd);
        }

        command.stdin(Stdio::null());
        let (stdout, stderr) = self.output_stdio()?;
        command.stdout(stdout);
        command.stderr(stderr);

        command.kill_on_drop(true);

        // The server's own children (the JVM behind a start script) join the
        // group so the whole tree can be killed at once.
        #[cfg(unix)]
        command.process_group(0);

        Ok(command)
    }

    /// Converts the output target to a stdout/stderr pair.
    fn output_stdio(&self) -> Result<(Stdio, Stdio), ProcessError> {
        match self.output_target() {
            OutputTarget::Null => Ok((Stdio::null(), Stdio::null())),
            OutputTarget::File(path) => {
                let redirect_error = |source| ProcessError::OutputRedirect {
                    path: path.display().to_string(),
                    source,
                };
                let file = File::create(path).map_err(redirect_error)?;
                let err_file = file.try_clone().map_err(redirect_error)?;
                Ok((Stdio::from(file), Stdio::from(err_file)))
            }
        }
    }
}

async fn deadline(timeout: Option<Duration>) {
    match timeout {
        Some(duration) => tokio::time::sleep(duration).await,
        None => std::future::pending().await,
    }
}

/// Kills the process tree, then the child itself, and reaps it.
async fn terminate(child: &mut Child, job: Option<&Job>) -> std::io::Result<()> {
    if let Some(job) = job {
        job.kill();
    }
    if let Err(e) = child.kill().await {
        debug!(error = %e, "kill after job termination failed");
    }
    child.wait().await.map(|_| ())
}
