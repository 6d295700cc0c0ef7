// modhunt: finds the mod that crashes a modded game server
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module for modhunt using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! modhunt [global options] [command]
//!   (none) | hunt   find the crashing mod
//!   list [--json]   show the mods directory
//!   restore         enable every disabled archive
//!   options         effective configuration
//!   configs         config files in load order
//!   version
//! ```

pub mod global;


use crate::cli::global::GlobalOptions;
use clap::{Args, Parser, Subcommand};

/// Finds the mod that crashes a modded game server.
#[derive(Debug, Parser)]
#[command(
    name = "modhunt",
    author,
    version,
    about = "Finds the mod that crashes a modded game server",
    long_about = "modhunt Copyright (C) 2026 Romeo Ahmed\n\
                  This program comes with ABSOLUTELY NO WARRANTY\n\
                  This is free software, and you are welcome to redistribute it\n\
                  under certain conditions; see LICENSE for details.\n\n\
                  Disables every mod in the server's mods directory, then starts\n\
                  the server with one mod at a time until the crash signature\n\
                  shows up in the server log. Missing dependencies reported by the\n\
                  loader are enabled for a second attempt.\n\n\
                  Running `modhunt` without a command starts the hunt.",
    after_help = "CONFIG FILES:\n\n\
                  modhunt reads `modhunt.toml` from the current directory if it\n\
                  exists, then every file given with --config, in order. MODHUNT_*\n\
                  environment variables (e.g. MODHUNT_SERVER__TIMEOUT_SECS=40)\n\
                  override files, and command-line flags override everything.\n\
                  Use --no-default-config to skip `modhunt.toml`."
)]
pub struct Cli {
    /// Global options shared by all commands
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Command to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Shows the version.
    #[command(visible_alias = "-v")]
    Version,

    /// Runs the crash hunt (the default).
    Hunt,

    /// Lists the mods directory with ids and states.
    List(ListArgs),

    /// Re-enables every disabled mod in the mods directory, including mods
    /// that were disabled before any hunt.
    Restore,

    /// Lists all options and their effective values.
    Options,

    /// Lists the config files used, in load order.
    Configs,
}

/// Arguments for the list command.
#[derive(Debug, Clone, Default, Args)]
pub struct ListArgs {
    /// Prints JSON instead of a table.
    #[arg(long)]
    pub json: bool,

    /// Also lists archives that are currently disabled.
    #[arg(short = 'a', long)]
    pub all: bool,
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}

/// Parses command-line arguments from an iterator.
pub fn parse_from<I, T>(iter: I) -> Cli
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::parse_from(iter)
}

/// Tries to parse command-line arguments, returning an error on failure.
///
/// # Errors
///
/// Returns a `clap::Error` if the arguments are invalid or if help/version information
/// was requested.
pub fn try_parse() -> Result<Cli, clap::Error> {
    Cli::try_parse()
}
