// modhunt: finds the mod that crashes a modded game server
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Core modules for process management.
//!
//! ```text
//!        core
//!         |
//!     +---+-----+
//!     |         |
//!     v         v
//!  process     job
//!     |         |
//!  Builder   process group (Unix)
//!  Outcome   Job Object (Windows)
//! ```

pub mod job;
pub mod process;
