//! Configuration files and the effective host settings

use framekit::config::{ConfigLoader, FramekitConfig, HostConfig};
use framekit::error::ErrorKind;
use std::path::PathBuf;
use tempfile::TempDir;

#[test]
fn test_config_file_overrides_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let config_file = temp_dir.path().join("framekit.toml");
    std::fs::write(
        &config_file,
        r#"
[host]
output_dir = "reduced"
pipeline_id = "uves/6.1"
check_constraints = false

[output]
format = "json"

[logging]
level = "debug"
output = "file"
file = "logs/framekit.log"
"#,
    )
    .unwrap();

    let config = ConfigLoader::load_from_file(&config_file).unwrap();
    assert!(config.validate().is_ok());
    assert_eq!(config.host.output_dir, PathBuf::from("reduced"));
    assert_eq!(config.host.pipeline_id, "uves/6.1");
    assert!(!config.host.check_constraints);
    // Untouched keys keep their defaults
    assert_eq!(config.host.dictionary_id, HostConfig::default().dictionary_id);
    assert!(!config.host.dump_products);
    assert_eq!(config.output.format, "json");
    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.logging.file, PathBuf::from("logs/framekit.log"));
}

#[test]
fn test_invalid_values_are_all_reported() {
    let temp_dir = TempDir::new().unwrap();
    let config_file = temp_dir.path().join("bad.toml");
    std::fs::write(
        &config_file,
        r#"
[host]
pipeline_id = " "

[output]
format = "yaml"
"#,
    )
    .unwrap();

    let config = ConfigLoader::load_from_file(&config_file).unwrap();
    let errors = config.validate().unwrap_err();
    assert_eq!(errors.len(), 2);
    assert!(errors[0].to_string().starts_with("Host:"));
    assert!(errors[1].to_string().starts_with("Output:"));
}

#[test]
fn test_missing_config_file() {
    let temp_dir = TempDir::new().unwrap();
    let err = ConfigLoader::load_from_file(&temp_dir.path().join("absent.toml")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::FileNotFound);
}

#[test]
fn test_malformed_config_file() {
    let temp_dir = TempDir::new().unwrap();
    let config_file = temp_dir.path().join("broken.toml");
    std::fs::write(&config_file, "[host\noutput_dir = ").unwrap();
    let err = ConfigLoader::load_from_file(&config_file).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Config);
}

#[test]
fn test_config_serializes_back_to_toml() {
    let config = FramekitConfig::default();
    let text = toml::to_string_pretty(&config).unwrap();
    assert!(text.contains("[host]"));
    assert!(text.contains("check_constraints = true"));
    let parsed: FramekitConfig = toml::from_str(&text).unwrap();
    assert_eq!(parsed, config);
}
