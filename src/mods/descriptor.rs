// modhunt: finds the mod that crashes a modded game server
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Mod id extraction from the descriptor embedded in a jar.
//!
//! ```text
//! read_mod_id(jar)
//!   open zip --------------------------- fail --> Unreadable
//!   first META-INF/*mods.toml|*mod.json  none --> NoDescriptor
//!   lossy UTF-8 text
//!   AssignmentStyle  modId = "x"  -+
//!   JsonKeyStyle    "modId": "x"  -+-- match --> Found(x)
//!                                   no match --> Unparsable
//! ```

use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::ArchiveError;

/// Directory prefix of descriptor entries.
pub const DESCRIPTOR_DIR: &str = "META-INF/";

/// File name endings recognised as descriptors (Forge TOML, JSON style).
pub const DESCRIPTOR_NAMES: [&str; 2] = ["mods.toml", "mod.json"];

/// Outcome of looking for a mod id inside an archive.
#[derive(Debug)]
pub enum DescriptorLookup {
    /// A descriptor was found and one of the patterns matched.
    Found(String),
    /// The archive has no descriptor entry.
    NoDescriptor,
    /// A descriptor exists but neither pattern matched its text.
    Unparsable { entry: String },
    /// The archive could not be opened or read.
    Unreadable(ArchiveError),
}

impl DescriptorLookup {
    /// The mod id, if one was found.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        match self {
            Self::Found(id) => Some(id),
            _ => None,
        }
    }
}

impl fmt::Display for DescriptorLookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Found(id) => f.write_str(id),
            Self::NoDescriptor => f.write_str("<no descriptor>"),
            Self::Unparsable { entry } => write!(f, "<no modId in {entry}>"),
            Self::Unreadable(_) => f.write_str("<unreadable>"),
        }
    }
}

/// A textual strategy extracting a mod id from descriptor text.
pub trait IdPattern {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// Extract the id, or `None` if the text does not match.
    fn extract(&self, text: &str) -> Option<String>;
}

/// `modId = "value"`, quotes optional.
#[derive(Debug, Clone, Copy, Default)]
pub struct AssignmentStyle;

/// `"modId": "value"`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonKeyStyle;

static ASSIGNMENT_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"modId\s*=\s*(\S+)").ok());

static JSON_KEY_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r#""modId"\s*:\s*"([^"]+)""#).ok());

impl IdPattern for AssignmentStyle {
    fn name(&self) -> &'static str {
        "assignment"
    }

    fn extract(&self, text: &str) -> Option<String> {
        let raw = ASSIGNMENT_RE.as_ref()?.captures(text)?.get(1)?.as_str();
        let id = raw.trim().trim_matches('"').trim_matches('\'');
        // `modId = ""` is not an id; let the next style try.
        (!id.is_empty()).then(|| id.to_string())
    }
}

impl IdPattern for JsonKeyStyle {
    fn name(&self) -> &'static str {
        "json-key"
    }

    fn extract(&self, text: &str) -> Option<String> {
        let id = JSON_KEY_RE.as_ref()?.captures(text)?.get(1)?.as_str().trim();
        (!id.is_empty()).then(|| id.to_string())
    }
}

/// Strategies in priority order; the first match wins.
const PATTERNS: [&dyn IdPattern; 2] = [&AssignmentStyle, &JsonKeyStyle];

/// Apply every strategy in order to descriptor text.
#[must_use]
pub fn parse_mod_id(text: &str) -> Option<String> {
    PATTERNS.iter().find_map(|pattern| {
        let id = pattern.extract(text)?;
        tracing::trace!(pattern = pattern.name(), id = %id, "descriptor matched");
        Some(id)
    })
}

/// Whether a zip entry name is a descriptor.
#[must_use]
pub fn is_descriptor_entry(name: &str) -> bool {
    name.starts_with(DESCRIPTOR_DIR) && DESCRIPTOR_NAMES.iter().any(|d| name.ends_with(d))
}

/// Read the mod id of the archive at `path`. Never fails; problems are
/// reported through the returned variant.
#[must_use]
pub fn read_mod_id(path: &Path) -> DescriptorLookup {
    match read_descriptor(path) {
        Ok(None) => DescriptorLookup::NoDescriptor,
        Ok(Some((entry, text))) => {
            parse_mod_id(&text).map_or(DescriptorLookup::Unparsable { entry }, DescriptorLookup::Found)
        }
        Err(e) => DescriptorLookup::Unreadable(e),
    }
}

/// Returns the first descriptor entry's name and lossily decoded text.
fn read_descriptor(path: &Path) -> Result<Option<(String, String)>, ArchiveError> {
    let display = || path.display().to_string();

    let file = File::open(path).map_err(|source| ArchiveError::Open {
        path: display(),
        source,
    })?;
    let mut archive = zip::ZipArchive::new(file).map_err(|source| ArchiveError::Zip {
        path: display(),
        source,
    })?;

    let Some(entry) = archive
        .file_names()
        .find(|name| is_descriptor_entry(name))
        .map(String::from)
    else {
        return Ok(None);
    };

    let mut zipped = archive
        .by_name(&entry)
        .map_err(|source| ArchiveError::Zip {
            path: display(),
            source,
        })?;
    let mut bytes = Vec::new();
    zipped
        .read_to_end(&mut bytes)
        .map_err(|source| ArchiveError::Read {
            path: display(),
            entry: entry.clone(),
            source,
        })?;

    Ok(Some((entry, String::from_utf8_lossy(&bytes).into_owned())))
}
