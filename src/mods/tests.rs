// modhunt: finds the mod that crashes a modded game server
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::io::Write;
use std::path::{Path, PathBuf};

use zip::write::SimpleFileOptions;

use super::descriptor::{
    AssignmentStyle, IdPattern, JsonKeyStyle, is_descriptor_entry, parse_mod_id,
};
use super::*;

fn write_jar(dir: &Path, name: &str, entries: &[(&str, &str)]) -> PathBuf {
    let path = dir.join(name);
    let file = std::fs::File::create(&path).unwrap();
    let mut zip = zip::ZipWriter::new(file);
    for (entry, content) in entries {
        zip.start_file(*entry, SimpleFileOptions::default()).unwrap();
        zip.write_all(content.as_bytes()).unwrap();
    }
    zip.finish().unwrap();
    path
}

fn forge_jar(dir: &Path, name: &str, id: &str) -> PathBuf {
    let toml = format!("modLoader=\"javafml\"\n[[mods]]\nmodId=\"{id}\"\nversion=\"1.0\"\n");
    write_jar(dir, name, &[("META-INF/mods.toml", &toml)])
}

fn names_in(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

// --- Id patterns ---

#[test]
fn test_assignment_style_strips_quotes() {
    assert_eq!(
        AssignmentStyle.extract("modId = \"examplemod\"").as_deref(),
        Some("examplemod")
    );
    assert_eq!(AssignmentStyle.extract("modId='single'").as_deref(), Some("single"));
    assert_eq!(AssignmentStyle.extract("modId=bare\n").as_deref(), Some("bare"));
    assert_eq!(AssignmentStyle.extract("name = \"x\""), None);
}

#[test]
fn test_json_key_style() {
    let json = r#"{ "modId" : "fabricish", "version": "2" }"#;
    assert_eq!(JsonKeyStyle.extract(json).as_deref(), Some("fabricish"));
    assert_eq!(JsonKeyStyle.extract(r#"{"id": "other"}"#), None);
}

#[test]
fn test_assignment_wins_over_json() {
    let text = "modId = \"first\"\n{\"modId\": \"second\"}";
    assert_eq!(parse_mod_id(text).as_deref(), Some("first"));
}

#[test]
fn test_empty_assignment_is_not_an_id() {
    assert_eq!(AssignmentStyle.extract("modId = \"\""), None);
    assert_eq!(
        parse_mod_id("modId = \"\"\n{\"modId\": \"real\"}").as_deref(),
        Some("real")
    );
    assert_eq!(parse_mod_id("modId=''"), None);
}

#[test]
fn test_parse_is_case_sensitive() {
    assert_eq!(parse_mod_id("modid = \"lower\""), None);
}

#[test]
fn test_descriptor_entry_names() {
    assert!(is_descriptor_entry("META-INF/mods.toml"));
    assert!(is_descriptor_entry("META-INF/neoforge.mods.toml"));
    assert!(is_descriptor_entry("META-INF/mod.json"));
    assert!(!is_descriptor_entry("mods.toml"));
    assert!(!is_descriptor_entry("META-INF/MANIFEST.MF"));
}

#[test]
fn test_archive_name_predicates() {
    assert!(is_enabled_name(Path::new("mods/a.jar")));
    assert!(!is_disabled_name(Path::new("mods/a.jar")));
    assert!(is_disabled_name(Path::new("mods/a.jar.disabled")));
    assert!(!is_enabled_name(Path::new("mods/a.jar.disabled")));
    assert!(!is_enabled_name(Path::new("mods/notes.txt")));
    assert!(!is_disabled_name(Path::new("mods/notes.disabled")));
}

// --- read_mod_id ---

#[test]
fn test_read_mod_id_forge_toml() {
    let dir = tempfile::tempdir().unwrap();
    let jar = forge_jar(dir.path(), "a.jar", "alpha");

    let lookup = read_mod_id(&jar);
    assert_eq!(lookup.id(), Some("alpha"));
}

#[test]
fn test_read_mod_id_first_descriptor_in_archive_order() {
    let dir = tempfile::tempdir().unwrap();
    let jar = write_jar(
        dir.path(),
        "multi.jar",
        &[
            ("assets/readme.txt", "modId = \"decoy\""),
            ("META-INF/mod.json", r#"{"modId": "from_json"}"#),
            ("META-INF/mods.toml", "modId = \"from_toml\""),
        ],
    );

    assert_eq!(read_mod_id(&jar).id(), Some("from_json"));
}

#[test]
fn test_read_mod_id_no_descriptor() {
    let dir = tempfile::tempdir().unwrap();
    let jar = write_jar(dir.path(), "lib.jar", &[("com/example/Lib.class", "cafebabe")]);

    let lookup = read_mod_id(&jar);
    assert!(matches!(lookup, DescriptorLookup::NoDescriptor));
    assert_eq!(lookup.id(), None);
}

#[test]
fn test_read_mod_id_unparsable() {
    let dir = tempfile::tempdir().unwrap();
    let jar = write_jar(dir.path(), "odd.jar", &[("META-INF/mods.toml", "license = \"MIT\"")]);

    let lookup = read_mod_id(&jar);
    assert!(
        matches!(&lookup, DescriptorLookup::Unparsable { entry } if entry == "META-INF/mods.toml")
    );
    assert_eq!(lookup.to_string(), "<no modId in META-INF/mods.toml>");
}

#[test]
fn test_read_mod_id_corrupt_archive() {
    let dir = tempfile::tempdir().unwrap();
    let jar = dir.path().join("broken.jar");
    std::fs::write(&jar, b"this is not a zip").unwrap();

    let lookup = read_mod_id(&jar);
    assert!(matches!(lookup, DescriptorLookup::Unreadable(_)));
    assert_eq!(lookup.id(), None);
}

#[test]
fn test_read_mod_id_lossy_utf8() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("latin.jar");
    let file = std::fs::File::create(&path).unwrap();
    let mut zip = zip::ZipWriter::new(file);
    zip.start_file("META-INF/mods.toml", SimpleFileOptions::default())
        .unwrap();
    zip.write_all(b"description=\"caf\xe9\"\nmodId=\"cafe\"\n").unwrap();
    zip.finish().unwrap();

    assert_eq!(read_mod_id(&path).id(), Some("cafe"));
}

// --- Toggling ---

#[test]
fn test_disable_then_enable_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let original = forge_jar(dir.path(), "alpha.jar", "alpha");
    let mut archive = ModArchive::open(&original);

    assert_eq!(archive.disable().unwrap(), Toggle::Changed);
    assert_eq!(archive.path(), dir.path().join("alpha.jar.disabled"));
    assert!(!archive.is_enabled());
    assert!(!original.exists());

    assert_eq!(archive.enable().unwrap(), Toggle::Changed);
    assert_eq!(archive.path(), original);
    assert!(archive.is_enabled());
    assert!(original.exists());
}

#[test]
fn test_toggle_in_same_state_is_noop() {
    let dir = tempfile::tempdir().unwrap();
    let mut archive = ModArchive::open(forge_jar(dir.path(), "a.jar", "a"));

    assert_eq!(archive.enable().unwrap(), Toggle::Unchanged);
    archive.disable().unwrap();
    assert_eq!(archive.disable().unwrap(), Toggle::Unchanged);
    assert_eq!(names_in(dir.path()), ["a.jar.disabled"]);
}

#[test]
fn test_rename_failure_keeps_path() {
    let dir = tempfile::tempdir().unwrap();
    let jar = forge_jar(dir.path(), "gone.jar", "gone");
    let mut archive = ModArchive::open(&jar);
    std::fs::remove_file(&jar).unwrap();

    let err = archive.disable().unwrap_err();
    assert!(matches!(err, FsError::Rename { .. }));
    assert_eq!(archive.path(), jar);
}

#[test]
fn test_disable_refuses_to_replace_existing_target() {
    let dir = tempfile::tempdir().unwrap();
    let jar = dir.path().join("a.jar");
    let disabled = dir.path().join("a.jar.disabled");
    std::fs::write(&jar, "NEW").unwrap();
    std::fs::write(&disabled, "OLD").unwrap();
    let mut archive = ModArchive::open(&jar);

    let err = archive.disable().unwrap_err();
    assert!(matches!(
        &err,
        FsError::Rename { source, .. } if source.kind() == std::io::ErrorKind::AlreadyExists
    ));
    assert_eq!(archive.path(), jar);
    assert_eq!(std::fs::read_to_string(&jar).unwrap(), "NEW");
    assert_eq!(std::fs::read_to_string(&disabled).unwrap(), "OLD");
}

#[test]
fn test_enable_refuses_to_replace_existing_target() {
    let dir = tempfile::tempdir().unwrap();
    let jar = dir.path().join("a.jar");
    let disabled = dir.path().join("a.jar.disabled");
    std::fs::write(&disabled, "OLD").unwrap();
    let mut archive = ModArchive::open(&disabled);
    std::fs::write(&jar, "FRESH").unwrap();

    let err = archive.enable().unwrap_err();
    assert!(matches!(
        &err,
        FsError::Rename { source, .. } if source.kind() == std::io::ErrorKind::AlreadyExists
    ));
    assert_eq!(archive.path(), disabled);
    assert_eq!(std::fs::read_to_string(&jar).unwrap(), "FRESH");
    assert_eq!(std::fs::read_to_string(&disabled).unwrap(), "OLD");
}

#[test]
fn test_bulk_toggles_count_collisions_as_failed() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("a.jar"), "NEW").unwrap();
    std::fs::write(dir.path().join("a.jar.disabled"), "OLD").unwrap();
    forge_jar(dir.path(), "b.jar", "b");

    let summary = disable_all(dir.path()).unwrap();
    assert_eq!(summary, BulkToggle { changed: 1, failed: 1 });
    assert_eq!(names_in(dir.path()), ["a.jar", "a.jar.disabled", "b.jar.disabled"]);

    let summary = enable_all(dir.path()).unwrap();
    assert_eq!(summary, BulkToggle { changed: 1, failed: 1 });
    assert_eq!(names_in(dir.path()), ["a.jar", "a.jar.disabled", "b.jar"]);

    assert_eq!(std::fs::read_to_string(dir.path().join("a.jar")).unwrap(), "NEW");
    assert_eq!(
        std::fs::read_to_string(dir.path().join("a.jar.disabled")).unwrap(),
        "OLD"
    );
}

#[test]
fn test_disable_all_leaves_no_plain_jar() {
    let dir = tempfile::tempdir().unwrap();
    forge_jar(dir.path(), "a.jar", "a");
    forge_jar(dir.path(), "b.jar", "b");
    forge_jar(dir.path(), "c.jar.disabled", "c");
    std::fs::write(dir.path().join("notes.txt"), "keep me").unwrap();

    let summary = disable_all(dir.path()).unwrap();
    assert_eq!(summary, BulkToggle { changed: 2, failed: 0 });
    assert_eq!(
        names_in(dir.path()),
        ["a.jar.disabled", "b.jar.disabled", "c.jar.disabled", "notes.txt"]
    );
}

#[test]
fn test_enable_all_leaves_no_disabled() {
    let dir = tempfile::tempdir().unwrap();
    forge_jar(dir.path(), "a.jar.disabled", "a");
    forge_jar(dir.path(), "b.jar", "b");

    let summary = enable_all(dir.path()).unwrap();
    assert_eq!(summary.changed, 1);
    assert_eq!(names_in(dir.path()), ["a.jar", "b.jar"]);
}

#[test]
fn test_bulk_toggle_missing_dir() {
    let err = disable_all(Path::new("/definitely/not/a/mods/dir")).unwrap_err();
    assert!(matches!(err, FsError::ReadDir { .. }));
}

// --- Inventory ---

#[test]
fn test_inventory_scan_sorted_and_skips_disabled() {
    let dir = tempfile::tempdir().unwrap();
    forge_jar(dir.path(), "zeta.jar", "zeta");
    forge_jar(dir.path(), "alpha.jar", "alpha");
    forge_jar(dir.path(), "old.jar.disabled", "old");
    std::fs::write(dir.path().join("config.cfg"), "").unwrap();

    let inventory = Inventory::scan(dir.path()).unwrap();
    let names: Vec<String> = inventory.iter().map(ModArchive::name).collect();
    assert_eq!(names, ["alpha.jar", "zeta.jar"]);
    assert_eq!(inventory.len(), 2);
    assert_eq!(inventory.pre_disabled(), 1);
    assert!(!inventory.is_empty());
}

#[test]
fn test_inventory_find_by_id_first_match() {
    let dir = tempfile::tempdir().unwrap();
    forge_jar(dir.path(), "a.jar", "shared");
    forge_jar(dir.path(), "b.jar", "shared");
    write_jar(dir.path(), "c.jar", &[]);

    let inventory = Inventory::scan(dir.path()).unwrap();
    assert_eq!(inventory.find_by_id("shared"), Some(0));
    assert_eq!(inventory.find_by_id("missing"), None);
    assert_eq!(inventory.get(2).unwrap().id(), None);
}

#[test]
fn test_inventory_bulk_toggles_refresh_paths() {
    let dir = tempfile::tempdir().unwrap();
    forge_jar(dir.path(), "a.jar", "a");
    forge_jar(dir.path(), "b.jar", "b");
    let mut inventory = Inventory::scan(dir.path()).unwrap();

    inventory.disable_all().unwrap();
    assert!(inventory.iter().all(|a| !a.is_enabled() && a.path().exists()));

    inventory.enable_all().unwrap();
    assert!(inventory.iter().all(|a| a.is_enabled() && a.path().exists()));
}

#[test]
fn test_inventory_empty_dir() {
    let dir = tempfile::tempdir().unwrap();
    let inventory = Inventory::scan(dir.path()).unwrap();
    assert!(inventory.is_empty());
}

#[test]
fn test_inventory_unlistable_dir() {
    let err = Inventory::scan("/definitely/not/a/mods/dir").unwrap_err();
    assert!(err.to_string().starts_with("failed to list"));
}

#[test]
fn test_list_archives_includes_disabled() {
    let dir = tempfile::tempdir().unwrap();
    forge_jar(dir.path(), "b.jar", "b");
    forge_jar(dir.path(), "a.jar.disabled", "a");
    std::fs::write(dir.path().join("readme.md"), "").unwrap();

    let archives = list_archives(dir.path()).unwrap();
    let summary: Vec<(String, bool, Option<&str>)> = archives
        .iter()
        .map(|a| (a.name(), a.is_enabled(), a.id()))
        .collect();
    assert_eq!(
        summary,
        [
            ("a.jar.disabled".to_string(), false, Some("a")),
            ("b.jar".to_string(), true, Some("b")),
        ]
    );
}
