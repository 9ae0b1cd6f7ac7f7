use std::fs;
use std::path::PathBuf;

use asc_core::config::{Config, ConfigError, TableConfig};
use asc_core::render::{Overflow, TableStyle};
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// 1. Missing or empty files
// ---------------------------------------------------------------------------

#[test]
fn load_from_nonexistent_path_returns_default_config() {
    let path = PathBuf::from("/tmp/asc-test-nonexistent/does/not/exist/config.toml");
    assert!(!path.exists());

    let config = Config::load_from_path(&path).expect("missing file should give defaults");
    assert_eq!(config, Config::default());
}

#[test]
fn load_empty_config_file_returns_default_config() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("config.toml");
    fs::write(&config_path, "").unwrap();

    let config = Config::load_from_path(&config_path).expect("empty file should parse as default");
    assert!(config.profile.is_none());
    assert!(config.region.is_none());
    assert_eq!(config.table, TableConfig::default());
}

// ---------------------------------------------------------------------------
// 2. Malformed or invalid content
// ---------------------------------------------------------------------------

#[test]
fn load_corrupt_toml_returns_parse_error() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("config.toml");
    fs::write(&config_path, "[[[broken").unwrap();

    let err = Config::load_from_path(&config_path).unwrap_err();
    assert!(matches!(err, ConfigError::ParseError(_)));
    assert!(err.to_string().contains("parse"), "{err}");
}

#[test]
fn load_unknown_style_is_a_parse_error() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("config.toml");
    fs::write(&config_path, "[table]\nstyle = \"fancy\"\n").unwrap();

    assert!(matches!(
        Config::load_from_path(&config_path),
        Err(ConfigError::ParseError(_))
    ));
}

#[test]
fn load_rejects_zero_columns() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("config.toml");
    fs::write(&config_path, "[table]\ncolumns = 0\n").unwrap();

    let err = Config::load_from_path(&config_path).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "table.columns"));
}

// ---------------------------------------------------------------------------
// 3. Environment expansion
// ---------------------------------------------------------------------------

#[test]
#[serial_test::serial]
fn load_expands_environment_references() {
    unsafe {
        std::env::set_var("ASC_EDGE_PROFILE", "staging");
        std::env::remove_var("ASC_EDGE_REGION");
    }

    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("config.toml");
    fs::write(
        &config_path,
        "profile = \"${ASC_EDGE_PROFILE}\"\nregion = \"${ASC_EDGE_REGION:-eu-west-1}\"\n",
    )
    .unwrap();

    let config = Config::load_from_path(&config_path).unwrap();
    assert_eq!(config.profile.as_deref(), Some("staging"));
    assert_eq!(config.region.as_deref(), Some("eu-west-1"));

    unsafe {
        std::env::remove_var("ASC_EDGE_PROFILE");
    }
}

// ---------------------------------------------------------------------------
// 4. Table settings
// ---------------------------------------------------------------------------

#[test]
fn table_section_is_read_in_full() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("config.toml");
    fs::write(
        &config_path,
        "[table]\nstyle = \"separated\"\nmax_column_width = 60\noverflow = \"truncate\"\ncolumns = 4\n",
    )
    .unwrap();

    let config = Config::load_from_path(&config_path).unwrap();
    assert_eq!(
        config.table,
        TableConfig {
            style: Some(TableStyle::Separated),
            max_column_width: Some(60),
            overflow: Some(Overflow::Truncate),
            columns: Some(4),
        }
    );
}

#[test]
fn unknown_overflow_mode_is_a_parse_error() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("config.toml");
    fs::write(&config_path, "[table]\noverflow = \"ellipsis\"\n").unwrap();

    let err = Config::load_from_path(&config_path).unwrap_err();
    assert!(matches!(err, ConfigError::ParseError(_)));
}

#[cfg(unix)]
#[test]
fn load_unreadable_path_is_a_load_error() {
    let dir = TempDir::new().unwrap();
    // a directory exists but cannot be read as a file
    let config_path = dir.path().join("config.toml");
    fs::create_dir(&config_path).unwrap();

    let err = Config::load_from_path(&config_path).unwrap_err();
    assert!(matches!(err, ConfigError::LoadError { .. }));
}
