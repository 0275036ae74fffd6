//! Loading configuration files from disk.

use std::io::Write;

use covenant_config::{ConfigError, ConfigLoader, LogFormat};
use tempfile::NamedTempFile;

/// Writes `content` to a temporary file with the given extension.
fn config_file(content: &str, extension: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(extension)
        .tempfile()
        .unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_toml_file() {
    let file = config_file(
        r#"
        [router]
        base_path = "/somePrefix"
        not_found_status = 410

        [logging]
        level = "debug"
        format = "pretty"
        "#,
        ".toml",
    );

    let loader = ConfigLoader::new().with_file(file.path()).unwrap();
    assert!(loader.file_loaded());

    let config = loader.load().unwrap();
    assert_eq!(config.router.base_path, "/somePrefix");
    assert_eq!(config.router.not_found_status, 410);
    assert_eq!(config.router.breach_status, 400);
    assert_eq!(config.logging.format, LogFormat::Pretty);
}

#[test]
fn test_json_file() {
    let file = config_file(r#"{"logging": {"include_target": false}}"#, ".json");

    let config = ConfigLoader::new()
        .with_optional_file(file.path())
        .unwrap()
        .load()
        .unwrap();

    assert!(!config.logging.include_target);
    assert_eq!(config.router.base_path, "/");
}

#[test]
fn test_file_without_router_keeps_production_preset() {
    let file = config_file("[logging]\nlevel = \"warn\"\n", ".toml");

    let config = ConfigLoader::new()
        .with_production()
        .with_file(file.path())
        .unwrap()
        .load()
        .unwrap();

    assert_eq!(config.logging.level, "warn");
    assert!(!config.router.expose_failures);
}

#[test]
fn test_unsupported_extension() {
    let file = config_file("router: {}", ".yaml");
    let result = ConfigLoader::new().with_file(file.path());
    assert!(matches!(result, Err(ConfigError::ValidationError(_))));
}

#[test]
fn test_malformed_file() {
    let file = config_file("[router\nbase_path = 1", ".toml");
    let result = ConfigLoader::new().with_file(file.path());
    assert!(matches!(result, Err(ConfigError::TomlError(_))));
}
