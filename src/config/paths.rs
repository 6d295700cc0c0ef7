// modhunt: finds the mod that crashes a modded game server
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Server path resolution.
//!
//! ```text
//! root/            (~ expanded)
//!   start.sh       (script)
//!   server_log.txt (log_file)
//!   mods/          (mods_dir)
//! ```
//!
//! Absolute `script`, `log_file` and `mods_dir` values are used as-is.

use std::path::{Component, Path, PathBuf};

use super::types::ServerConfig;

/// Server paths with the root expanded and everything else joined onto it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerPaths {
    pub root: PathBuf,
    pub script: PathBuf,
    pub mods_dir: PathBuf,
    pub log_file: PathBuf,
}

impl ServerPaths {
    /// Resolve all paths of a server section.
    #[must_use]
    pub fn resolve(server: &ServerConfig) -> Self {
        let root = expand_home(&server.root);
        Self {
            script: root.join(&server.script),
            mods_dir: root.join(&server.mods_dir),
            log_file: root.join(&server.log_file),
            root,
        }
    }
}

/// Replace a leading `~` component with the user's home directory.
///
/// The path is returned unchanged if it has no leading `~` or the home
/// directory cannot be determined.
#[must_use]
pub fn expand_home(path: &Path) -> PathBuf {
    let mut components = path.components();
    match components.next() {
        Some(Component::Normal(first)) if first == "~" => dirs::home_dir().map_or_else(
            || path.to_path_buf(),
            |home| home.join(components.as_path()),
        ),
        _ => path.to_path_buf(),
    }
}
