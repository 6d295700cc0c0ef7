// modhunt: finds the mod that crashes a modded game server
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Process tree ownership for spawned children.
//!
//! ```text
//! Job::attach(child)
//!   Unix:    child leads its own process group --> killpg(SIGKILL)
//!   Windows: Job Object, KILL_ON_JOB_CLOSE     --> TerminateJobObject
//! kill()  --> terminate every process in the tree
//! drop()  --> same, so nothing outlives the run
//! ```
//!
//! A server start script usually execs or forks a JVM; killing only the
//! script would leave the JVM holding the port and the mods directory.

#[cfg(unix)]
mod unix;
#[cfg(windows)]
mod win32;

#[cfg(unix)]
pub use self::unix::Job;
#[cfg(windows)]
pub use self::win32::Job;

#[cfg(test)]
mod tests;
