//! Integration tests for loading configuration files from disk.

use std::io::Write;
use strata_core::{ConfigError, StrataConfig};

#[test]
fn test_load_from_explicit_path() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        "console:\n  hide_legacy_links: true\n  base_url: http://router:8888\nserver:\n  port: 9100"
    )
    .unwrap();

    let config = StrataConfig::from_file(file.path()).unwrap();
    assert!(config.console.hide_legacy_links);
    assert_eq!(config.console.resolved_base_url(), "http://router:8888");
    assert_eq!(config.server.port, 9100);
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.yaml");

    let err = StrataConfig::from_file(&missing).unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));
}

#[test]
fn test_malformed_yaml_is_parse_error() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "server: [not, a, map").unwrap();

    let err = StrataConfig::from_file(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Yaml(_)));
}

#[test]
fn test_unknown_sections_are_ignored() {
    let config = StrataConfig::from_yaml("extra:\n  key: value\nlogging:\n  level: warn\n").unwrap();
    assert_eq!(config.logging.level, "warn");
}
