// modhunt: finds the mod that crashes a modded game server
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Hunt command implementation.

use anyhow::Context;
use tokio_util::sync::CancellationToken;

use crate::config::Config;
use crate::error::Result;
use crate::hunt::{Hunt, HuntReport};
use crate::logscan::LogInspector;
use crate::mods::Inventory;
use crate::server::ServerRunner;

/// Main handler for the hunt command.
///
/// Ctrl+C cancels the hunt: the running server is killed and every mod is
/// re-enabled before returning [`HuntReport::Interrupted`].
///
/// # Errors
///
/// Returns an error if the mods directory cannot be listed or holds no
/// enabled mod.
pub async fn run_hunt_command(config: &Config) -> Result<HuntReport> {
    let paths = config.server_paths();
    let mut inventory = Inventory::scan(&paths.mods_dir)
        .with_context(|| format!("cannot scan mods in {}", paths.mods_dir.display()))?;

    let cancel_token = CancellationToken::new();
    let listener_token = cancel_token.clone();
    let listener = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Received Ctrl+C, stopping the server...");
            listener_token.cancel();
        }
    });

    let runner = ServerRunner::from_config(config);
    let result = Hunt::builder()
        .with_launcher(&runner)
        .with_inspector(LogInspector::new(config.detect.crash_signature.clone()))
        .with_settle(config.server.settle())
        .with_token(cancel_token)
        .build()
        .run(&mut inventory)
        .await;
    listener.abort();

    let report = result?;
    println!("{report}");
    if let Some(note) = restore_note(&report, inventory.pre_disabled()) {
        println!("{note}");
    }
    Ok(report)
}

/// Tells the user that mods they had disabled before the hunt were
/// re-enabled by the final restore.
#[must_use]
pub fn restore_note(report: &HuntReport, pre_disabled: usize) -> Option<String> {
    if pre_disabled == 0 || matches!(report, HuntReport::CulpritFound { .. }) {
        return None;
    }
    Some(format!(
        "note: {pre_disabled} mod(s) disabled before the hunt were re-enabled as well"
    ))
}
