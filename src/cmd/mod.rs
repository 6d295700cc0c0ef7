// modhunt: finds the mod that crashes a modded game server
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Command implementations.
//!
//! ```text
//! CLI args --> cmd::run_* handlers
//!   hunt, list, restore, config (options/configs)
//! ```

pub mod config;
pub mod hunt;
pub mod list;
pub mod restore;
