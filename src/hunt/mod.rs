// modhunt: finds the mod that crashes a modded game server
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! The crash-finding loop.
//!
//! ```text
//! disable all
//!   for each mod (inventory order)
//!     enable --> reset log --> launch
//!       TimedOut     --> disable, next
//!       Interrupted  --> restore all, Interrupted
//!     crash in log   --> CulpritFound (mod left enabled)
//!     missing deps?  --> enable known deps --> relaunch --> settle
//!       crash        --> disable deps + mod, CulpritFound (retry)
//!       no crash     --> disable deps
//!     disable mod
//! enable all --> NoCulprit
//! ```
//!
//! Exactly one server runs at a time. Cancellation is checked between
//! steps; a cancelled launch kills the server and ends the hunt with every
//! mod re-enabled.
//!
//! "enable all" works on the whole mods directory, so archives that were
//! already disabled before the hunt come back enabled too.


use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use bon::Builder;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::core::process::builder::INTERRUPT_EXIT_CODE;
use crate::error::{HuntError, HuntResult};
use crate::logscan::LogInspector;
use crate::mods::Inventory;
use crate::server::{ServerLauncher, ServerStatus};

/// Final result of a hunt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HuntReport {
    /// The signature appeared with this mod enabled.
    CulpritFound {
        /// Path of the archive while it was enabled.
        archive: PathBuf,
        id: Option<String>,
        /// The crash only showed once missing dependencies were enabled.
        during_dependency_retry: bool,
    },
    /// Every mod was tried without reproducing the crash.
    NoCulprit { checked: usize },
    /// Cancelled before finishing.
    Interrupted { checked: usize },
}

impl HuntReport {
    /// Process exit status for this outcome.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Interrupted { .. } => INTERRUPT_EXIT_CODE,
            _ => 0,
        }
    }
}

impl fmt::Display for HuntReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CulpritFound {
                archive,
                id,
                during_dependency_retry,
            } => {
                write!(f, "crash caused by {}", archive.display())?;
                if let Some(id) = id {
                    write!(f, " (mod id '{id}')")?;
                }
                if *during_dependency_retry {
                    f.write_str(" with its dependencies enabled")?;
                }
                Ok(())
            }
            Self::NoCulprit { checked } => {
                write!(f, "checked {checked} mods, no offending mod found")
            }
            Self::Interrupted { checked } => {
                write!(f, "interrupted after checking {checked} mods")
            }
        }
    }
}

/// Outcome of testing one candidate.
enum Step {
    Clean,
    Culprit(HuntReport),
    Interrupted,
}

/// Drives the launcher over an inventory until the culprit is found.
#[derive(Builder)]
pub struct Hunt<'a> {
    #[builder(setters(name = with_launcher))]
    launcher: &'a dyn ServerLauncher,
    #[builder(setters(name = with_inspector), default)]
    inspector: LogInspector,
    /// Pause after the dependency relaunch before reading the log.
    #[builder(setters(name = with_settle), default = Duration::from_secs(2))]
    settle: Duration,
    #[builder(setters(name = with_token), default)]
    token: CancellationToken,
}

impl Hunt<'_> {
    /// Runs the hunt over every archive in `inventory`.
    ///
    /// # Errors
    ///
    /// Returns [`HuntError::NothingToTest`] for an empty inventory and a
    /// filesystem error if the mods directory cannot be listed for the
    /// bulk disable/enable.
    pub async fn run(&self, inventory: &mut Inventory) -> HuntResult<HuntReport> {
        if inventory.is_empty() {
            return Err(HuntError::nothing_to_test(inventory.dir()));
        }

        let total = inventory.len();
        info!(total, dir = %inventory.dir().display(), "found mods");

        let summary = inventory.disable_all()?;
        info!(%summary, "all mods disabled, starting test loop");

        let mut checked = 0;
        for index in 0..total {
            if self.token.is_cancelled() {
                return interrupted(inventory, checked);
            }
            match self.test_one(inventory, index).await {
                Step::Clean => checked += 1,
                Step::Culprit(report) => {
                    warn!("{report}");
                    return Ok(report);
                }
                Step::Interrupted => return interrupted(inventory, checked),
            }
        }

        let summary = inventory.enable_all()?;
        info!(%summary, "mods restored");
        let report = HuntReport::NoCulprit { checked };
        info!("{report}");
        Ok(report)
    }

    async fn test_one(&self, inventory: &mut Inventory, index: usize) -> Step {
        let total = inventory.len();
        let Some(archive) = inventory.get(index) else {
            return Step::Clean;
        };
        info!(
            "[{}/{total}] enabling '{}' ({})",
            index + 1,
            archive.id().unwrap_or("?"),
            archive.name()
        );
        set_enabled(inventory, index, true);

        self.launcher.reset_log().await;
        match self.launcher.launch(&self.token).await {
            ServerStatus::Interrupted => return Step::Interrupted,
            ServerStatus::TimedOut => {
                warn!("server timed out, skipping this mod");
                set_enabled(inventory, index, false);
                return Step::Clean;
            }
            _ => {}
        }

        let scan = self.inspector.scan(&self.launcher.read_log().await);
        if scan.crash {
            return Step::Culprit(culprit(inventory, index, false));
        }

        if !scan.missing.is_empty() {
            match self.retry_with_dependencies(inventory, index, &scan.missing).await {
                Step::Clean => {}
                other => return other,
            }
        }

        set_enabled(inventory, index, false);
        info!("crash signature not found");
        Step::Clean
    }

    async fn retry_with_dependencies(
        &self,
        inventory: &mut Inventory,
        index: usize,
        missing: &[String],
    ) -> Step {
        warn!(missing = %missing.join(" "), "missing dependencies");

        let mut deps: Vec<usize> = Vec::new();
        for id in missing {
            match inventory.find_by_id(id) {
                Some(found) if found == index || deps.contains(&found) => {}
                Some(found) => {
                    set_enabled(inventory, found, true);
                    deps.push(found);
                }
                None => warn!("cannot find jar for missing mod '{id}'"),
            }
        }
        if deps.is_empty() {
            return Step::Clean;
        }

        self.launcher.reset_log().await;
        if self.launcher.launch(&self.token).await == ServerStatus::Interrupted {
            return Step::Interrupted;
        }
        tokio::select! {
            () = tokio::time::sleep(self.settle) => {}
            () = self.token.cancelled() => return Step::Interrupted,
        }

        let crashed = self
            .inspector
            .contains_crash(&self.launcher.read_log().await);
        let step = if crashed {
            Step::Culprit(culprit(inventory, index, true))
        } else {
            Step::Clean
        };

        for dep in deps {
            set_enabled(inventory, dep, false);
        }
        if crashed {
            set_enabled(inventory, index, false);
        }
        step
    }
}

fn interrupted(inventory: &mut Inventory, checked: usize) -> HuntResult<HuntReport> {
    warn!("interrupted, re-enabling all mods");
    let summary = inventory.enable_all()?;
    info!(%summary, "mods restored");
    Ok(HuntReport::Interrupted { checked })
}

fn culprit(inventory: &Inventory, index: usize, during_dependency_retry: bool) -> HuntReport {
    let (archive, id) = inventory.get(index).map_or_else(
        || (PathBuf::new(), None),
        |a| (a.path().to_path_buf(), a.id().map(str::to_string)),
    );
    HuntReport::CulpritFound {
        archive,
        id,
        during_dependency_retry,
    }
}

/// Toggles one archive; rename failures are already logged by the archive.
fn set_enabled(inventory: &mut Inventory, index: usize, enabled: bool) {
    if let Some(archive) = inventory.get_mut(index) {
        let _ = if enabled {
            archive.enable()
        } else {
            archive.disable()
        };
    }
}
