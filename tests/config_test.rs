//! Integration tests for Settings config loading with layered merge semantics.
//!
//! Layers (lowest to highest): defaults → global file → explicit file → env vars.
//! These tests pass their own files to `load_from`, so the user's real
//! global config never takes part.

use std::fs;

use tempfile::TempDir;

use utilkit::application::ApplicationError;
use utilkit::config::Settings;

#[test]
fn given_no_files_when_load_then_defaults() {
    let settings = Settings::load_from(None, None).expect("load settings");
    assert_eq!(settings, Settings::default());
}

#[test]
fn given_explicit_file_when_load_then_only_listed_keys_change() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("utilkit.toml");
    fs::write(
        &path,
        r#"
[tree]
children_field = "items"

[chart]
split_count = 4
"#,
    )
    .unwrap();

    let settings = Settings::load_from(None, Some(&path)).expect("load settings");

    assert_eq!(settings.tree.children_field, "items");
    assert_eq!(settings.tree.identity_field, "id");
    assert_eq!(settings.chart.split_count, 4);
    assert_eq!(settings.chart.decimal_places, 2);
    assert_eq!(settings.chart.interval_minutes, 5);
}

#[test]
fn given_global_and_explicit_when_load_then_explicit_wins() {
    let dir = TempDir::new().unwrap();
    let global = dir.path().join("global.toml");
    let explicit = dir.path().join("explicit.toml");
    fs::write(&global, "[chart]\ninterval_minutes = 15\ndecimal_places = 3\n").unwrap();
    fs::write(&explicit, "[chart]\ninterval_minutes = 10\n").unwrap();

    let settings = Settings::load_from(Some(&global), Some(&explicit)).expect("load settings");

    assert_eq!(settings.chart.interval_minutes, 10);
    assert_eq!(settings.chart.decimal_places, 3);
}

#[test]
fn given_missing_global_when_load_then_skipped() {
    let dir = TempDir::new().unwrap();
    let settings = Settings::load_from(Some(&dir.path().join("nope.toml")), None).expect("load settings");
    assert_eq!(settings, Settings::default());
}

#[test]
fn given_missing_explicit_when_load_then_config_error() {
    let dir = TempDir::new().unwrap();
    let result = Settings::load_from(None, Some(&dir.path().join("nope.toml")));
    assert!(matches!(result, Err(ApplicationError::Config { .. })));
}

#[test]
fn given_malformed_toml_when_load_then_config_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.toml");
    fs::write(&path, "[chart\nsplit_count = ").unwrap();

    let result = Settings::load_from(None, Some(&path));
    assert!(matches!(result, Err(ApplicationError::Config { .. })));
}

#[test]
fn given_zero_interval_when_load_then_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("zero.toml");
    fs::write(&path, "[chart]\ninterval_minutes = 0\n").unwrap();

    let err = Settings::load_from(None, Some(&path)).unwrap_err();
    assert!(err.to_string().contains("interval_minutes"), "{err}");
}

#[test]
fn given_template_when_written_and_loaded_then_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("template.toml");
    fs::write(&path, Settings::template()).unwrap();

    let settings = Settings::load_from(None, Some(&path)).expect("load settings");
    assert_eq!(settings, Settings::default());
}

#[test]
fn given_effective_settings_when_shown_then_reloadable() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("shown.toml");
    let mut settings = Settings::default();
    settings.tree.identity_field = "key".into();
    fs::write(&path, settings.to_toml().unwrap()).unwrap();

    let reloaded = Settings::load_from(None, Some(&path)).expect("load settings");
    assert_eq!(reloaded, settings);
}
