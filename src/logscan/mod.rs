// modhunt: finds the mod that crashes a modded game server
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Server log inspection.
//!
//! Two contracts are read from a captured log: the crash signature, matched
//! as a case-sensitive substring anywhere in the text, and every
//! `Mod ID: '<id>'` fragment, which the loader prints for each missing
//! dependency.


use std::sync::LazyLock;

use regex::Regex;

use crate::config::types::DEFAULT_CRASH_SIGNATURE;

static MISSING_ID_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"Mod ID: '([^']+)'").ok());

/// What a single log says.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogScan {
    pub crash: bool,
    /// Missing dependency ids, first-occurrence order, duplicates kept.
    pub missing: Vec<String>,
}

/// Reads crash and dependency information out of server logs.
#[derive(Debug, Clone)]
pub struct LogInspector {
    signature: String,
}

impl Default for LogInspector {
    fn default() -> Self {
        Self::new(DEFAULT_CRASH_SIGNATURE)
    }
}

impl LogInspector {
    #[must_use]
    pub fn new(signature: impl Into<String>) -> Self {
        Self {
            signature: signature.into(),
        }
    }

    #[must_use]
    pub fn signature(&self) -> &str {
        &self.signature
    }

    #[must_use]
    pub fn contains_crash(&self, log: &str) -> bool {
        log.contains(&self.signature)
    }

    #[must_use]
    pub fn missing_ids(&self, log: &str) -> Vec<String> {
        let Some(re) = MISSING_ID_RE.as_ref() else {
            return Vec::new();
        };
        re.captures_iter(log)
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
            .collect()
    }

    #[must_use]
    pub fn scan(&self, log: &str) -> LogScan {
        LogScan {
            crash: self.contains_crash(log),
            missing: self.missing_ids(log),
        }
    }
}
