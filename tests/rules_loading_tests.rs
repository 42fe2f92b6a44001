//! Rule profiles loaded from directories on disk
use std::fs;

use kahani_language_server::config::Config;
use kahani_language_server::rules::{RuleRegistry, ViolationKind, DEFAULT_PROFILE};
use kahani_language_server::validate_identifier;

const SHORT_STORIES: &str = r#"
[profile]
name = "short-stories"
version = "0.1"
max_paragraph_words = 20

[identifier]
min_length = 1
max_length = 10

[identifier.messages]
length = "ID too long (max {max})"

[content]
min_length = 5
max_length = 500
"#;

#[test]
fn load_dir_adds_profiles() {
    let dir = tempfile::tempdir().expect("create temp dir");
    fs::write(dir.path().join("short.rules.toml"), SHORT_STORIES).unwrap();
    fs::write(dir.path().join("notes.txt"), "not a rules file").unwrap();

    let mut registry = RuleRegistry::with_defaults();
    let loaded = registry.load_dir(dir.path()).expect("load dir");

    assert_eq!(loaded, 1);
    assert_eq!(registry.list_profiles(), vec![DEFAULT_PROFILE, "short-stories"]);

    assert!(registry.set_active_profile("short-stories"));
    let profile = registry.get_active_profile().unwrap();
    assert_eq!(profile.max_paragraph_words, 20);

    let outcome = validate_identifier(&"क".repeat(11), &profile.identifier);
    assert_eq!(outcome.kind(), Some(ViolationKind::Length));
    assert_eq!(outcome.reason(), Some("ID too long (max 10)"));
}

#[test]
fn invalid_files_are_skipped() {
    let dir = tempfile::tempdir().expect("create temp dir");
    fs::write(dir.path().join("broken.rules.toml"), "[profile\nname=").unwrap();
    fs::write(
        dir.path().join("inverted.rules.toml"),
        SHORT_STORIES.replace("min_length = 5", "min_length = 900"),
    )
    .unwrap();
    fs::write(dir.path().join("good.rules.toml"), SHORT_STORIES).unwrap();

    let mut registry = RuleRegistry::new();
    assert_eq!(registry.load_dir(dir.path()).unwrap(), 1);
    assert!(registry.get_profile("short-stories").is_some());
}

#[test]
fn missing_dir_loads_nothing() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let mut registry = RuleRegistry::new();
    assert_eq!(registry.load_dir(&dir.path().join("absent")).unwrap(), 0);
}

#[test]
fn later_directories_override_embedded_profile() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let override_profile = SHORT_STORIES.replace("short-stories", DEFAULT_PROFILE);
    fs::write(dir.path().join("override.rules.toml"), override_profile).unwrap();

    let config = Config {
        rules_dirs: vec![dir.path().to_path_buf()],
        ..Config::default()
    };
    let registry = config.load_rules().expect("load rules");
    let active = registry.get_active_profile().unwrap();

    assert_eq!(active.name, DEFAULT_PROFILE);
    assert_eq!(active.max_paragraph_words, 20);
    assert_eq!(active.identifier.max_length, 10);
}

#[test]
fn cli_profile_selects_loaded_profile() {
    let dir = tempfile::tempdir().expect("create temp dir");
    fs::write(dir.path().join("short.rules.toml"), SHORT_STORIES).unwrap();

    let config = Config {
        cli_rules: Some("short-stories".to_string()),
        rules_dirs: vec![dir.path().to_path_buf()],
        ..Config::default()
    };
    let registry = config.load_rules().expect("load rules");
    assert_eq!(registry.get_active_profile().unwrap().name, "short-stories");
}
