//! End-to-end flow: parse -> resolve -> mutate -> save -> reopen
//!
//! Exercises the whole pipeline across crate boundaries the way an
//! application consumer drives it.

use std::fs;
use std::path::{Path, PathBuf};

use overlay_settings::SettingsGetter;
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn write_settings(dir: &Path, name: &str, inner: &str) -> PathBuf {
    let text = format!(
        "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<settings>\n{inner}\n</settings>"
    );
    let path = dir.join(name);
    fs::write(&path, text).unwrap();
    path
}

/// A layered setup close to the real deployment shape: a machine-level file
/// importing a user-level overlay, which imports a project overlay.
fn layered_fixture(dir: &Path) -> PathBuf {
    fs::create_dir_all(dir.join("overlays")).unwrap();
    write_settings(
        &dir.join("overlays"),
        "project.xml",
        "  <var name=\"LOG_LEVEL\" value=\"trace\" />\n  \
         <block name=\"PLUGINS\" enabled=\"true\">\n    <plugin id=\"fmt\" />\n  </block>",
    );
    write_settings(
        &dir.join("overlays"),
        "user.xml",
        "  <import from=\"project.xml\" />\n  <var name=\"THEME\" value=\"dark\" />",
    );
    write_settings(
        dir,
        "settings.xml",
        "  <import from=\"overlays/user.xml\" />\n  \
         <var name=\"LOG_LEVEL\" value=\"info\" />\n  \
         <var name=\"SHOW_WELCOME_TEXT\" value=\"true\" />",
    )
}

#[test]
fn layered_reads_follow_traversal_order() {
    let dir = TempDir::new().unwrap();
    let root = layered_fixture(dir.path());
    let getter = SettingsGetter::open(&root).unwrap();

    assert!(getter.get::<bool>("SHOW_WELCOME_TEXT"));
    assert_eq!(getter.get::<String>("THEME"), "dark");
    // The deepest overlay is visited last and shadows the root's value.
    assert_eq!(getter.get::<String>("LOG_LEVEL"), "trace");
    assert_eq!(getter.block_enabled("PLUGINS"), Some(true));
}

#[test]
fn cross_file_edits_persist_to_their_owning_files() {
    let dir = TempDir::new().unwrap();
    let root = layered_fixture(dir.path());

    let mut getter = SettingsGetter::open(&root).unwrap();
    getter.set("THEME", "light");
    getter.set("NEW_FLAG", "true");
    getter.save().unwrap();

    // THEME lives in the user overlay; NEW_FLAG is unseen and goes to root.
    let user = fs::read_to_string(dir.path().join("overlays/user.xml")).unwrap();
    assert!(user.contains("<var name=\"THEME\" value=\"light\" />"));
    let root_text = fs::read_to_string(&root).unwrap();
    assert!(root_text.contains("<var name=\"NEW_FLAG\" value=\"true\" />"));
    assert!(!root_text.contains("THEME"));

    // The untouched project overlay keeps its original bytes.
    let reopened = SettingsGetter::open(&root).unwrap();
    assert_eq!(reopened.get::<String>("THEME"), "light");
    assert_eq!(reopened.get::<bool>("NEW_FLAG"), true);
    assert_eq!(reopened.get::<String>("LOG_LEVEL"), "trace");
}

#[test]
fn in_memory_edits_are_visible_before_save() {
    let dir = TempDir::new().unwrap();
    let root = layered_fixture(dir.path());

    let mut getter = SettingsGetter::open(&root).unwrap();
    getter.set("LOG_LEVEL", "warn");
    // The merged view reflects the edit immediately; no file was written.
    assert_eq!(getter.get::<String>("LOG_LEVEL"), "warn");
    let project = fs::read_to_string(dir.path().join("overlays/project.xml")).unwrap();
    assert!(project.contains("value=\"trace\""));
}

#[test]
fn added_import_takes_effect_on_reopen() {
    let dir = TempDir::new().unwrap();
    write_settings(
        dir.path(),
        "extra.xml",
        "  <var name=\"EXTRA\" value=\"42\" />",
    );
    let root = write_settings(dir.path(), "settings.xml", "  <var name=\"A\" value=\"1\" />");

    let mut getter = SettingsGetter::open(&root).unwrap();
    getter.set_import("extra.xml");
    // Not resolved within this getter's lifetime.
    assert_eq!(getter.get::<i32>("EXTRA"), 0);
    getter.save().unwrap();

    let reopened = SettingsGetter::open(&root).unwrap();
    assert_eq!(reopened.get::<i32>("EXTRA"), 42);
}

#[test]
fn block_round_trip_through_save_and_reopen() {
    let dir = TempDir::new().unwrap();
    let root = write_settings(dir.path(), "settings.xml", "");

    let mut getter = SettingsGetter::open(&root).unwrap();
    getter.set_block("REPOSITORIES", Some(true), Some("<repository folderName=\"base\" />"));
    getter.save().unwrap();

    let reopened = SettingsGetter::open(&root).unwrap();
    assert_eq!(reopened.block_enabled("REPOSITORIES"), Some(true));
    assert_eq!(
        reopened.block_content("REPOSITORIES").unwrap(),
        "\n    <repository folderName=\"base\" />\n  "
    );
}

#[test]
fn save_is_idempotent_per_document() {
    let dir = TempDir::new().unwrap();
    let root = layered_fixture(dir.path());

    let mut getter = SettingsGetter::open(&root).unwrap();
    getter.set("SHOW_WELCOME_TEXT", "false");
    getter.save().unwrap();
    let after_first = fs::read_to_string(&root).unwrap();
    getter.save().unwrap();
    assert_eq!(fs::read_to_string(&root).unwrap(), after_first);
}
