// modhunt: finds the mod that crashes a modded game server
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! End-to-end hunts against a fake server.
//!
//! Each test lays out a server root with real jar archives and a `start.sh`
//! that prints the crash signature or a missing dependency depending on
//! which jars are enabled.

#![cfg(unix)]

use std::io::Write;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;

use modhunt::cmd::hunt::run_hunt_command;
use modhunt::cmd::restore::run_restore_command;
use modhunt::config::Config;
use modhunt::hunt::HuntReport;
use zip::write::SimpleFileOptions;

const CRASH: &str =
    "Attempted to load class net/minecraft/client/gui/Gui for invalid dist DEDICATED_SERVER";

struct Server {
    root: tempfile::TempDir,
}

impl Server {
    fn new(script_body: &str) -> Self {
        let root = tempfile::tempdir().unwrap();
        std::fs::create_dir(root.path().join("mods")).unwrap();

        let script = root.path().join("start.sh");
        std::fs::write(&script, format!("#!/bin/sh\n{script_body}\n")).unwrap();
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();
        Self { root }
    }

    fn with_mod(self, file: &str, id: &str) -> Self {
        let f = std::fs::File::create(self.mods().join(file)).unwrap();
        let mut zip = zip::ZipWriter::new(f);
        zip.start_file("META-INF/mods.toml", SimpleFileOptions::default())
            .unwrap();
        write!(zip, "modLoader=\"javafml\"\n[[mods]]\nmodId=\"{id}\"\n").unwrap();
        zip.finish().unwrap();
        self
    }

    fn mods(&self) -> std::path::PathBuf {
        self.root.path().join("mods")
    }

    fn config(&self, timeout_secs: i64) -> Config {
        Config::builder()
            .set("server.root", self.root.path().display().to_string())
            .unwrap()
            .set("server.timeout_secs", timeout_secs)
            .unwrap()
            .set("server.settle_secs", 0_i64)
            .unwrap()
            .build()
            .unwrap()
    }

    fn names(&self) -> Vec<String> {
        names_in(&self.mods())
    }
}

fn names_in(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[tokio::test]
async fn hunt_finds_crashing_mod() {
    let server = Server::new(&format!(
        "if [ -f mods/clientonly.jar ]; then echo '{CRASH}'; exit 1; fi\necho Done"
    ))
    .with_mod("aaa.jar", "aaa")
    .with_mod("clientonly.jar", "clientonly")
    .with_mod("zzz.jar", "zzz");

    let report = run_hunt_command(&server.config(10)).await.unwrap();

    assert!(matches!(
        &report,
        HuntReport::CulpritFound { id: Some(id), during_dependency_retry: false, .. }
            if id == "clientonly"
    ));
    assert_eq!(
        server.names(),
        ["aaa.jar.disabled", "clientonly.jar", "zzz.jar.disabled"]
    );
}

#[tokio::test]
async fn hunt_enables_missing_dependency() {
    let server = Server::new(&format!(
        "if [ -f mods/needy.jar ] && [ ! -f mods/lib.jar ]; then\n\
         \techo \"Mod ID: 'library', Requested by: 'needy'\"; exit 1\n\
         fi\n\
         if [ -f mods/needy.jar ]; then echo '{CRASH}'; exit 1; fi\n\
         echo Done"
    ))
    .with_mod("lib.jar", "library")
    .with_mod("needy.jar", "needy");

    let report = run_hunt_command(&server.config(10)).await.unwrap();

    assert!(matches!(
        &report,
        HuntReport::CulpritFound { id: Some(id), during_dependency_retry: true, .. }
            if id == "needy"
    ));
    assert_eq!(server.names(), ["lib.jar.disabled", "needy.jar.disabled"]);

    run_restore_command(&server.config(10)).unwrap();
    assert_eq!(server.names(), ["lib.jar", "needy.jar"]);
}

#[tokio::test]
async fn hunt_skips_hanging_mod_and_restores() {
    let server = Server::new("if [ -f mods/hang.jar ]; then sleep 30; fi\necho Done")
        .with_mod("hang.jar", "hang")
        .with_mod("ok.jar", "ok");

    let report = run_hunt_command(&server.config(1)).await.unwrap();

    assert_eq!(report, HuntReport::NoCulprit { checked: 2 });
    assert_eq!(report.exit_code(), 0);
    assert_eq!(server.names(), ["hang.jar", "ok.jar"]);
}

#[tokio::test]
async fn hunt_without_mods_fails() {
    let server = Server::new("echo Done");

    let err = run_hunt_command(&server.config(5)).await.unwrap_err();
    assert!(err.to_string().starts_with("no mods found to test in"));
}

#[tokio::test]
async fn hunt_missing_script_finds_nothing() {
    let server = Server::new("echo Done").with_mod("a.jar", "a");
    std::fs::remove_file(server.root.path().join("start.sh")).unwrap();

    let report = run_hunt_command(&server.config(5)).await.unwrap();

    assert_eq!(report, HuntReport::NoCulprit { checked: 1 });
    assert_eq!(server.names(), ["a.jar"]);
}
