//! Integration tests for Settings layered loading.
//!
//! These tests pass explicit layer paths (temp directories only), so a real
//! global config on the machine does not leak in.

use std::fs;
use std::sync::{Mutex, MutexGuard};

use tempfile::TempDir;

use contactbook::application::ApplicationError;
use contactbook::config::Settings;

/// Serializes tests that load settings, since loading reads process-wide env vars.
static ENV_LOCK: Mutex<()> = Mutex::new(());

fn env_lock() -> MutexGuard<'static, ()> {
    ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn write_config(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).expect("write config");
    path
}

#[test]
fn given_global_config_when_loading_then_overrides_defaults() {
    let _env = env_lock();
    let dir = TempDir::new().unwrap();
    let global = write_config(
        &dir,
        "contactbook.toml",
        r#"
banner = "Address Book"
[display]
separator = " | "
"#,
    );

    let settings = Settings::load_layers(Some(&global), None).expect("load settings");

    assert_eq!(settings.banner, "Address Book");
    assert_eq!(settings.display.separator, " | ");
    assert_eq!(settings.display.placeholder, "None");
}

#[test]
fn given_explicit_config_when_loading_then_wins_over_global() {
    let _env = env_lock();
    let dir = TempDir::new().unwrap();
    let global = write_config(&dir, "global.toml", "prompt = \"g> \"\nbanner = \"Global\"\n");
    let local = write_config(&dir, "local.toml", "prompt = \"l> \"\n");

    let settings = Settings::load_layers(Some(&global), Some(&local)).expect("load settings");

    assert_eq!(settings.prompt, "l> ");
    assert_eq!(settings.banner, "Global");
}

#[test]
fn given_missing_global_config_when_loading_then_skips_it() {
    let _env = env_lock();
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("absent.toml");

    let settings = Settings::load_layers(Some(&missing), None).expect("load settings");

    assert_eq!(settings.prompt, Settings::default().prompt);
}

#[test]
fn given_missing_explicit_config_when_loading_then_errors() {
    let _env = env_lock();
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("absent.toml");

    let result = Settings::load_layers(None, Some(&missing));

    assert!(matches!(result, Err(ApplicationError::Config { .. })));
}

#[test]
fn given_malformed_config_when_loading_then_reports_parse_error() {
    let _env = env_lock();
    let dir = TempDir::new().unwrap();
    let broken = write_config(&dir, "broken.toml", "banner = [unterminated\n");

    let err = Settings::load_layers(None, Some(&broken)).unwrap_err();

    assert!(err.to_string().contains("parse"), "unexpected error: {err}");
}

#[test]
fn given_env_override_when_loading_then_replaces_file_value() {
    let _env = env_lock();
    let dir = TempDir::new().unwrap();
    let local = write_config(&dir, "local.toml", "confirm_exit = true\n");

    std::env::set_var("CONTACTBOOK_CONFIRM_EXIT", "false");
    let settings = Settings::load_layers(None, Some(&local));
    std::env::remove_var("CONTACTBOOK_CONFIRM_EXIT");

    assert!(!settings.expect("load settings").confirm_exit);
}

#[test]
fn given_effective_settings_when_serialized_then_contains_all_keys() {
    let text = Settings::default().to_toml().unwrap();

    assert!(text.contains("banner"));
    assert!(text.contains("confirm_exit"));
    assert!(text.contains("[display]"));
}

#[test]
fn given_nested_env_override_when_loading_then_replaces_display_value() {
    let _env = env_lock();
    let dir = TempDir::new().unwrap();
    let local = write_config(&dir, "local.toml", "[display]\nseparator = \" | \"\n");

    std::env::set_var("CONTACTBOOK_DISPLAY__SEPARATOR", ";");
    let settings = Settings::load_layers(None, Some(&local));
    std::env::remove_var("CONTACTBOOK_DISPLAY__SEPARATOR");

    let settings = settings.expect("load settings");
    assert_eq!(settings.display.separator, ";");
    assert_eq!(settings.display.placeholder, "None");
}
