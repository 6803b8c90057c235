#![cfg(feature = "toml-config")]

use std::fs;

use anyhow::Result;
use wrapcall::config::{ConfigError, DriverConfig};

fn temp_config_dir() -> tempfile::TempDir {
    tempfile::Builder::new()
        .prefix("wrapcall-config-test")
        .tempdir()
        .expect("failed to create temp dir")
}

#[test]
fn config_file_roundtrip() -> Result<()> {
    let dir = temp_config_dir();
    let path = dir.path().join("wrapcall.toml");
    fs::write(&path, "sleep_ms = 10\nrepeat = 7\nquiet = true\n")?;

    let config = DriverConfig::load(&path)?;

    assert_eq!(config.sleep_ms, 10);
    assert_eq!(config.repeat, 7);
    assert!(config.quiet);
    assert!(!config.json);
    Ok(())
}

#[test]
fn missing_config_file_reports_path() {
    let dir = temp_config_dir();
    let path = dir.path().join("absent.toml");

    let err = DriverConfig::load(&path).unwrap_err();

    assert!(matches!(err, ConfigError::Read { .. }));
    assert!(err.to_string().contains("absent.toml"));
}

#[test]
fn malformed_config_file_is_a_parse_error() -> Result<()> {
    let dir = temp_config_dir();
    let path = dir.path().join("broken.toml");
    fs::write(&path, "sleep_ms = \"soon\"\n")?;

    let err = DriverConfig::load(&path).unwrap_err();

    assert!(matches!(err, ConfigError::Parse(_)));
    Ok(())
}

#[test]
fn out_of_range_sleep_is_invalid() -> Result<()> {
    let dir = temp_config_dir();
    let path = dir.path().join("slow.toml");
    fs::write(&path, "sleep_ms = 60000\n")?;

    let err = DriverConfig::load(&path).unwrap_err();

    assert!(matches!(err, ConfigError::Invalid { field: "sleep_ms", .. }));
    Ok(())
}
