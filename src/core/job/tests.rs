// modhunt: finds the mod that crashes a modded game server
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::Job;
use tokio::process::Command;

#[cfg(unix)]
#[tokio::test]
async fn test_job_kill_stops_group() {
    let mut child = Command::new("/bin/sh")
        .args(["-c", "sleep 30 & wait"])
        .process_group(0)
        .kill_on_drop(true)
        .spawn()
        .expect("sh should spawn");

    let job = Job::attach(&child).expect("running child has a pid");
    job.kill();

    let status = tokio::time::timeout(std::time::Duration::from_secs(5), child.wait())
        .await
        .expect("child should die promptly")
        .expect("wait should succeed");
    assert!(!status.success());
}

#[cfg(unix)]
#[tokio::test]
async fn test_job_drop_after_exit_is_harmless() {
    let mut child = Command::new("/bin/sh")
        .args(["-c", "exit 0"])
        .process_group(0)
        .spawn()
        .expect("sh should spawn");

    let job = Job::attach(&child).expect("fresh child has a pid");
    assert!(child.wait().await.expect("wait should succeed").success());
    // group is gone, killpg reports ESRCH, which is ignored
    drop(job);
}

#[cfg(windows)]
#[tokio::test]
async fn test_job_kill_stops_child() {
    let mut child = Command::new("cmd")
        .args(["/C", "ping -n 30 127.0.0.1 > NUL"])
        .kill_on_drop(true)
        .spawn()
        .expect("cmd should spawn");

    let job = Job::attach(&child).expect("running child has a pid");
    job.kill();

    let status = tokio::time::timeout(std::time::Duration::from_secs(5), child.wait())
        .await
        .expect("child should die promptly")
        .expect("wait should succeed");
    assert!(!status.success());
}
