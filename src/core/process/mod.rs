// modhunt: finds the mod that crashes a modded game server
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Async process spawning with timeout and cancellation.
//!
//! ```text
//! ProcessBuilder::new("./start.sh")
//!   .cwd() .output_file() .timeout()
//!   .run() / .run_with_cancellation()
//!       --> tokio::process::Command (own process group)
//!           Job tracks the whole tree
//!       --> ProcessOutcome { Exited(code) | TimedOut | Interrupted }
//! ```

pub mod builder;
mod runner;
