// modhunt: finds the mod that crashes a modded game server
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Mod inventory and enable/disable toggling.
//!
//! ```text
//! mods/
//!   alpha.jar            enabled
//!   beta.jar.disabled    disabled (marker suffix)
//!
//! ModArchive::disable   alpha.jar          --> alpha.jar.disabled
//! ModArchive::enable    beta.jar.disabled  --> beta.jar
//!
//! Inventory::scan  --> sorted ModArchive list, ids read once
//! disable_all/enable_all(dir) re-list the directory (disk is the truth),
//! Inventory::*_all then refresh in-memory paths
//! ```
//!
//! Rename failures never abort a run: they are logged and reported back as
//! [`FsError::Rename`] so the caller can carry on. A rename never replaces an
//! existing file; when both `a.jar` and `a.jar.disabled` exist the toggle
//! fails with [`std::io::ErrorKind::AlreadyExists`] and both files stay.

pub mod descriptor;

#[cfg(test)]
mod tests;

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::FsError;

pub use self::descriptor::{DescriptorLookup, read_mod_id};

/// Extension of an enabled archive.
pub const ENABLED_EXT: &str = ".jar";

/// Suffix appended to disable an archive.
pub const DISABLED_MARKER: &str = ".disabled";

/// Full suffix of a disabled archive.
pub const DISABLED_EXT: &str = ".jar.disabled";

/// Result of a single enable/disable request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    /// The file was renamed.
    Changed,
    /// The archive was already in the requested state.
    Unchanged,
}

/// Summary of a directory-wide toggle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BulkToggle {
    pub changed: usize,
    pub failed: usize,
}

impl fmt::Display for BulkToggle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} renamed, {} failed", self.changed, self.failed)
    }
}

// --- Name helpers ---

fn file_name(path: &Path) -> Option<&str> {
    path.file_name().and_then(|n| n.to_str())
}

/// The enabled form of `path`, if it is a disabled archive.
fn enabled_form(path: &Path) -> Option<PathBuf> {
    let name = file_name(path)?;
    let stem = name.strip_suffix(DISABLED_MARKER)?;
    stem.ends_with(ENABLED_EXT).then(|| path.with_file_name(stem))
}

/// The disabled form of `path`, if it is an enabled archive.
fn disabled_form(path: &Path) -> Option<PathBuf> {
    let name = file_name(path)?;
    name.ends_with(ENABLED_EXT)
        .then(|| path.with_file_name(format!("{name}{DISABLED_MARKER}")))
}

/// Name ends in `.jar`: the archive is enabled.
fn is_enabled_name(path: &Path) -> bool {
    disabled_form(path).is_some()
}

/// Name ends in `.jar.disabled`: the archive is disabled.
fn is_disabled_name(path: &Path) -> bool {
    enabled_form(path).is_some()
}

/// Renames `from` to `to`, refusing to replace an existing `to`.
fn rename(from: &Path, to: &Path) -> Result<(), FsError> {
    let rename_err = |source| FsError::Rename {
        from: from.display().to_string(),
        to: to.display().to_string(),
        source,
    };

    match to.try_exists() {
        Ok(false) => std::fs::rename(from, to).map_err(rename_err),
        Ok(true) => Err(rename_err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            "target already exists",
        ))),
        Err(source) => Err(rename_err(source)),
    }
}

/// Regular files directly inside `dir`, sorted by path.
fn list_files(dir: &Path) -> Result<Vec<PathBuf>, FsError> {
    let read_dir_err = |source| FsError::ReadDir {
        path: dir.display().to_string(),
        source,
    };

    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(read_dir_err)? {
        let path = entry.map_err(read_dir_err)?.path();
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

// --- ModArchive ---

/// One mod archive on disk.
#[derive(Debug)]
pub struct ModArchive {
    path: PathBuf,
    lookup: DescriptorLookup,
}

impl ModArchive {
    /// Wraps the archive at `path` and reads its mod id.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let lookup = read_mod_id(&path);
        match &lookup {
            DescriptorLookup::Found(id) => debug!(path = %path.display(), id, "mod id"),
            DescriptorLookup::Unreadable(e) => {
                debug!(path = %path.display(), error = %e, "archive unreadable");
            }
            other => debug!(path = %path.display(), lookup = %other, "no mod id"),
        }
        Self { path, lookup }
    }

    /// Current path, with or without the disabled marker.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name for display.
    #[must_use]
    pub fn name(&self) -> String {
        self.path
            .file_name()
            .map_or_else(|| self.path.display().to_string(), |n| n.to_string_lossy().into_owned())
    }

    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.lookup.id()
    }

    #[must_use]
    pub fn lookup(&self) -> &DescriptorLookup {
        &self.lookup
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        !is_disabled_name(&self.path)
    }

    /// Removes the disabled marker.
    ///
    /// # Errors
    ///
    /// Returns [`FsError::Rename`] if the rename fails; the path is left as is.
    pub fn enable(&mut self) -> Result<Toggle, FsError> {
        match enabled_form(&self.path) {
            Some(target) => self.move_to(target),
            None => Ok(Toggle::Unchanged),
        }
    }

    /// Appends the disabled marker.
    ///
    /// # Errors
    ///
    /// Returns [`FsError::Rename`] if the rename fails; the path is left as is.
    pub fn disable(&mut self) -> Result<Toggle, FsError> {
        match disabled_form(&self.path) {
            Some(target) => self.move_to(target),
            None => Ok(Toggle::Unchanged),
        }
    }

    /// Re-syncs the path after something else renamed the file.
    ///
    /// Returns `true` if the path changed.
    pub fn refresh(&mut self) -> bool {
        if self.path.exists() {
            return false;
        }
        let other = enabled_form(&self.path).or_else(|| disabled_form(&self.path));
        match other.filter(|p| p.exists()) {
            Some(found) => {
                self.path = found;
                true
            }
            None => false,
        }
    }

    fn move_to(&mut self, target: PathBuf) -> Result<Toggle, FsError> {
        match rename(&self.path, &target) {
            Ok(()) => {
                debug!(from = %self.path.display(), to = %target.display(), "renamed");
                self.path = target;
                Ok(Toggle::Changed)
            }
            Err(e) => {
                warn!("{e}");
                Err(e)
            }
        }
    }
}

// --- Directory-wide toggles ---

/// Disables every enabled archive currently in `dir`.
///
/// # Errors
///
/// Fails only if the directory cannot be listed; individual rename
/// failures are counted in the summary.
pub fn disable_all(dir: &Path) -> Result<BulkToggle, FsError> {
    toggle_dir(dir, disabled_form)
}

/// Enables every disabled archive currently in `dir`.
///
/// # Errors
///
/// Fails only if the directory cannot be listed.
pub fn enable_all(dir: &Path) -> Result<BulkToggle, FsError> {
    toggle_dir(dir, enabled_form)
}

fn toggle_dir(dir: &Path, target: fn(&Path) -> Option<PathBuf>) -> Result<BulkToggle, FsError> {
    let mut summary = BulkToggle::default();
    for path in list_files(dir)? {
        let Some(to) = target(&path) else { continue };
        match rename(&path, &to) {
            Ok(()) => summary.changed += 1,
            Err(e) => {
                warn!("{e}");
                summary.failed += 1;
            }
        }
    }
    debug!(dir = %dir.display(), %summary, "bulk toggle");
    Ok(summary)
}

/// Every archive in `dir`, enabled or disabled, sorted by file name.
///
/// # Errors
///
/// Returns [`FsError::ReadDir`] if the directory cannot be listed.
pub fn list_archives(dir: &Path) -> Result<Vec<ModArchive>, FsError> {
    Ok(list_files(dir)?
        .into_iter()
        .filter(|p| is_enabled_name(p) || is_disabled_name(p))
        .map(ModArchive::open)
        .collect())
}

// --- Inventory ---

/// Every enabled archive found in the mods directory at scan time.
#[derive(Debug)]
pub struct Inventory {
    dir: PathBuf,
    archives: Vec<ModArchive>,
    pre_disabled: usize,
}

impl Inventory {
    /// Lists `dir` and reads each archive's id. Archives that are already
    /// disabled are reported but not included.
    ///
    /// # Errors
    ///
    /// Returns [`FsError::ReadDir`] if the directory cannot be listed.
    pub fn scan(dir: impl Into<PathBuf>) -> Result<Self, FsError> {
        let dir = dir.into();
        let mut archives = Vec::new();
        let mut pre_disabled = 0usize;

        for path in list_files(&dir)? {
            if is_enabled_name(&path) {
                archives.push(ModArchive::open(path));
            } else if is_disabled_name(&path) {
                pre_disabled += 1;
            }
        }

        if pre_disabled > 0 {
            warn!(
                count = pre_disabled,
                dir = %dir.display(),
                "archives already disabled will not be tested but are re-enabled on restore"
            );
        }

        Ok(Self {
            dir,
            archives,
            pre_disabled,
        })
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.archives.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.archives.is_empty()
    }

    /// Archives that were already disabled at scan time.
    #[must_use]
    pub fn pre_disabled(&self) -> usize {
        self.pre_disabled
    }

    pub fn iter(&self) -> impl Iterator<Item = &ModArchive> {
        self.archives.iter()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&ModArchive> {
        self.archives.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut ModArchive> {
        self.archives.get_mut(index)
    }

    /// Index of the first archive declaring `id`.
    #[must_use]
    pub fn find_by_id(&self, id: &str) -> Option<usize> {
        self.archives.iter().position(|a| a.id() == Some(id))
    }

    /// Disables everything in the directory, then re-syncs paths.
    ///
    /// # Errors
    ///
    /// Fails if the directory cannot be listed.
    pub fn disable_all(&mut self) -> Result<BulkToggle, FsError> {
        let summary = disable_all(&self.dir)?;
        self.refresh();
        Ok(summary)
    }

    /// Enables everything in the directory, then re-syncs paths.
    ///
    /// This includes archives counted by [`Inventory::pre_disabled`].
    ///
    /// # Errors
    ///
    /// Fails if the directory cannot be listed.
    pub fn enable_all(&mut self) -> Result<BulkToggle, FsError> {
        let summary = enable_all(&self.dir)?;
        self.refresh();
        Ok(summary)
    }

    fn refresh(&mut self) {
        for archive in &mut self.archives {
            archive.refresh();
        }
    }
}
