// modhunt: finds the mod that crashes a modded game server
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! List command implementation.

use anyhow::Context;
use serde::Serialize;

use crate::cli::ListArgs;
use crate::config::Config;
use crate::error::Result;
use crate::mods::{ModArchive, list_archives};

/// One row of the list output.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct ModEntry {
    pub file: String,
    pub enabled: bool,
    pub id: Option<String>,
    /// Lookup outcome when no id was found.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl From<&ModArchive> for ModEntry {
    fn from(archive: &ModArchive) -> Self {
        let id = archive.id().map(str::to_string);
        Self {
            file: archive.name(),
            enabled: archive.is_enabled(),
            note: id.is_none().then(|| archive.lookup().to_string()),
            id,
        }
    }
}

/// Collects the rows for the mods directory.
///
/// # Errors
///
/// Returns an error if the directory cannot be listed.
pub fn collect_entries(args: &ListArgs, config: &Config) -> Result<Vec<ModEntry>> {
    let dir = config.server_paths().mods_dir;
    let archives =
        list_archives(&dir).with_context(|| format!("cannot list mods in {}", dir.display()))?;
    Ok(archives
        .iter()
        .filter(|a| args.all || a.is_enabled())
        .map(ModEntry::from)
        .collect())
}

/// Formats rows as aligned `state  file  id` lines.
#[must_use]
pub fn format_entries(entries: &[ModEntry]) -> Vec<String> {
    let width = entries.iter().map(|e| e.file.len()).max().unwrap_or(0);
    entries
        .iter()
        .map(|e| {
            let state = if e.enabled { "enabled" } else { "disabled" };
            let id = e.id.as_deref().or(e.note.as_deref()).unwrap_or_default();
            format!("{state:<8}  {:<width$}  {id}", e.file)
        })
        .collect()
}

/// Main handler for list command.
///
/// # Errors
///
/// Returns an error if the mods directory cannot be listed.
pub fn run_list_command(args: &ListArgs, config: &Config) -> Result<()> {
    let entries = collect_entries(args, config)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else if entries.is_empty() {
        println!("No mods found");
    } else {
        for line in format_entries(&entries) {
            println!("{line}");
        }
    }
    Ok(())
}
