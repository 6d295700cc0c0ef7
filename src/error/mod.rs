// modhunt: finds the mod that crashes a modded game server
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//!   HuntError (~24 bytes)
//!         |
//!    +----+-----+
//!    |          |
//!    v          v
//! Nothing      Fs
//! ToTest       Box
//! Box<str>
//!
//! Sub-errors (unboxed internally; Config, Process and Archive
//! surface through anyhow or DescriptorLookup):
//!   Config  InvalidValue, NotFound
//!   Process SpawnFailed, WaitFailed, OutputRedirect
//!   Fs      ReadDir, Rename
//!   Archive Open, Zip, Read
//! ```

use std::path::Path;

use thiserror::Error;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

/// Result type using [`HuntError`].
pub type HuntResult<T> = std::result::Result<T, HuntError>;

/// Top-level application error type.
///
/// All sub-errors are boxed to keep this enum at ~24 bytes on the stack.
#[derive(Debug, Error)]
pub enum HuntError {
    /// The mods directory holds no enabled archive to test.
    #[error("no mods found to test in {0}")]
    NothingToTest(Box<str>),

    /// Filesystem error.
    #[error("filesystem error: {0}")]
    Fs(#[from] Box<FsError>),
}

impl HuntError {
    /// Create a [`HuntError::NothingToTest`] for the given directory.
    pub fn nothing_to_test(dir: &Path) -> Self {
        Self::NothingToTest(dir.display().to_string().into_boxed_str())
    }
}

// --- From implementations for boxing ---

/// Macro to generate `From` implementations that box the source error.
macro_rules! impl_from_boxed {
    ($($error:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$error> for HuntError {
                fn from(err: $error) -> Self {
                    HuntError::$variant(Box::new(err))
                }
            }
        )+
    };
}

impl_from_boxed! {
    FsError => Fs,
}

// --- Config Errors ---

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Invalid configuration value.
    #[error("invalid value for '{key}' in section '[{section}]': {message}")]
    InvalidValue {
        section: String,
        key: String,
        message: String,
    },

    /// Configuration file not found.
    #[error("config file not found: {0}")]
    NotFound(String),
}

// --- Process Errors ---

/// Process execution errors.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// Failed to spawn process.
    #[error("failed to spawn process '{command}': {source}")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed while waiting for (or killing) the process.
    #[error("failed waiting for process '{command}': {source}")]
    WaitFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Output file could not be opened for redirection.
    #[error("failed to redirect output to '{path}': {source}")]
    OutputRedirect {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

// --- Filesystem Errors ---

/// Filesystem operation errors.
#[derive(Debug, Error)]
pub enum FsError {
    /// Directory could not be listed.
    #[error("failed to list '{path}': {source}")]
    ReadDir {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Rename failed (permissions, collisions).
    #[error("failed to rename '{from}' to '{to}': {source}")]
    Rename {
        from: String,
        to: String,
        #[source]
        source: std::io::Error,
    },
}

// --- Archive Errors ---

/// Errors raised while reading a mod archive.
#[derive(Debug, Error)]
pub enum ArchiveError {
    /// Archive file could not be opened.
    #[error("failed to open '{path}': {source}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// File is not a valid zip container.
    #[error("invalid zip '{path}': {source}")]
    Zip {
        path: String,
        #[source]
        source: zip::result::ZipError,
    },

    /// Descriptor entry could not be read.
    #[error("failed to read '{entry}' in '{path}': {source}")]
    Read {
        path: String,
        entry: String,
        #[source]
        source: std::io::Error,
    },
}
