// modhunt: finds the mod that crashes a modded game server
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use tokio::process::Child;
use tracing::debug;

/// A spawned child and every descendant sharing its process group.
///
/// The child must have been spawned with `process_group(0)` so its pid is
/// also the group id.
#[derive(Debug)]
pub struct Job {
    pgid: libc::pid_t,
}

impl Job {
    /// Tracks the process group led by `child`.
    ///
    /// # Errors
    ///
    /// Fails if the child has already been reaped and has no pid.
    pub fn attach(child: &Child) -> std::io::Result<Self> {
        let pid = child
            .id()
            .ok_or_else(|| std::io::Error::other("child already reaped"))?;
        let pgid = libc::pid_t::try_from(pid).map_err(std::io::Error::other)?;
        Ok(Self { pgid })
    }

    /// Sends SIGKILL to the whole group. An already empty group is not an error.
    pub fn kill(&self) {
        // SAFETY: killpg has no memory-safety preconditions; pgid is a
        // positive group id owned by this job.
        let rc = unsafe { libc::killpg(self.pgid, libc::SIGKILL) };
        if rc != 0 {
            let err = std::io::Error::last_os_error();
            if err.raw_os_error() != Some(libc::ESRCH) {
                debug!(pgid = self.pgid, error = %err, "killpg failed");
            }
        }
    }
}

impl Drop for Job {
    fn drop(&mut self) {
        self.kill();
    }
}
