// modhunt: finds the mod that crashes a modded game server
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Restore command: undo an interrupted or abandoned hunt.

use anyhow::{Context, bail};

use crate::config::Config;
use crate::error::Result;
use crate::mods::{self, BulkToggle};

/// Enables every disabled archive in the mods directory.
///
/// # Errors
///
/// Returns an error if the directory cannot be listed or any rename fails.
pub fn run_restore_command(config: &Config) -> Result<BulkToggle> {
    let dir = config.server_paths().mods_dir;
    let summary = mods::enable_all(&dir)
        .with_context(|| format!("cannot restore mods in {}", dir.display()))?;

    tracing::info!(%summary, dir = %dir.display(), "restore finished");
    if summary.failed > 0 {
        bail!("{} mods could not be re-enabled", summary.failed);
    }
    println!("Re-enabled {} mods", summary.changed);
    Ok(summary)
}
