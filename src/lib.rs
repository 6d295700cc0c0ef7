// modhunt: finds the mod that crashes a modded game server
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Library root.
//!
//! # Crate Architecture
//!
//! ```text
//!                        main.rs
//!                           |
//!                +----------+----------+
//!                v                     v
//!             cli (clap)          cmd (handlers)
//!                |        hunt / list / restore / options
//!                +----------+----------+
//!                           v
//!              ,---------------------------,
//!              |          config           |
//!              |   TOML, env, CLI layers   |
//!              '--+-----------+--------+---'
//!                 |           |        |
//!                 v           v        v
//!               hunt  --->  server   logscan
//!             (loop)     (launcher) (signature,
//!                 |           |      missing ids)
//!                 v           |
//!               mods          |
//!       inventory, toggles,   |
//!       descriptor ids        |
//!                             v
//!   +-----------------------------------------+
//!   |  core   process (timeout, cancel), job  |
//!   +-----------------------------------------+
//!   |  foundation   error, logging            |
//!   +-----------------------------------------+
//! ```

pub mod cli;
pub mod cmd;
pub mod config;
pub mod core;
pub mod error;
pub mod hunt;
pub mod logging;
pub mod logscan;
pub mod mods;
pub mod server;
