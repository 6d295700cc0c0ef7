// modhunt: finds the mod that crashes a modded game server
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use tokio::process::Child;
use tracing::debug;
use windows::Win32::Foundation::{CloseHandle, HANDLE};
use windows::Win32::System::JobObjects::{
    AssignProcessToJobObject, CreateJobObjectW, JOB_OBJECT_LIMIT_KILL_ON_JOB_CLOSE,
    JOBOBJECT_EXTENDED_LIMIT_INFORMATION, JobObjectExtendedLimitInformation,
    SetInformationJobObject, TerminateJobObject,
};
use windows::Win32::System::Threading::{OpenProcess, PROCESS_SET_QUOTA, PROCESS_TERMINATE};

/// A Job Object holding a spawned child and every process it creates.
///
/// Closing the handle kills the whole tree (`KILL_ON_JOB_CLOSE`).
#[derive(Debug)]
pub struct Job(HANDLE);

// SAFETY: HANDLE is a pointer-sized value and Job Objects may be used from
// any thread.
unsafe impl Send for Job {}
unsafe impl Sync for Job {}

impl Job {
    /// Creates a kill-on-close Job Object and assigns `child` to it.
    ///
    /// # Errors
    ///
    /// Fails if the child has no pid, or a Win32 call fails.
    pub fn attach(child: &Child) -> std::io::Result<Self> {
        let pid = child
            .id()
            .ok_or_else(|| std::io::Error::other("child already reaped"))?;

        // SAFETY: every handle passed below was just returned by the API and
        // is closed on each error path or owned by the returned Job.
        unsafe {
            let handle = CreateJobObjectW(None, None).map_err(std::io::Error::other)?;
            let job = Self(handle);

            let mut info = JOBOBJECT_EXTENDED_LIMIT_INFORMATION::default();
            info.BasicLimitInformation.LimitFlags = JOB_OBJECT_LIMIT_KILL_ON_JOB_CLOSE;
            SetInformationJobObject(
                job.0,
                JobObjectExtendedLimitInformation,
                (&raw const info).cast(),
                u32::try_from(std::mem::size_of::<JOBOBJECT_EXTENDED_LIMIT_INFORMATION>())
                    .unwrap_or(u32::MAX),
            )
            .map_err(std::io::Error::other)?;

            let process = OpenProcess(PROCESS_SET_QUOTA | PROCESS_TERMINATE, false, pid)
                .map_err(std::io::Error::other)?;
            let assigned = AssignProcessToJobObject(job.0, process);
            let _ = CloseHandle(process);
            assigned.map_err(std::io::Error::other)?;

            Ok(job)
        }
    }

    /// Terminates every process in the job.
    pub fn kill(&self) {
        // SAFETY: the handle is valid for the lifetime of self.
        if let Err(e) = unsafe { TerminateJobObject(self.0, 1) } {
            debug!(error = %e, "TerminateJobObject failed");
        }
    }
}

impl Drop for Job {
    fn drop(&mut self) {
        // SAFETY: we own this handle; closing it kills the remaining tree.
        unsafe {
            let _ = CloseHandle(self.0);
        }
    }
}
