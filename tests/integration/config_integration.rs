//! Configuration loading feeding manager construction.

use super::test_utils::Server;
use causestack::config::ConfigLoader;
use causestack::{CauseEntry, CauseStackManager};
use tempfile::TempDir;

#[test]
fn test_config_file_enables_debug_frames() {
    let temp_dir = TempDir::new().unwrap();
    let config_file = temp_dir.path().join("causestack.toml");
    std::fs::write(
        &config_file,
        r#"
debug_frames = true

[logging]
level = "warn"

[logging.modules]
"causestack::manager" = "trace"
"#,
    )
    .unwrap();

    let config = ConfigLoader::load_from_file(&config_file).unwrap();
    assert_eq!(config.logging.level, "warn");
    assert_eq!(
        config.logging.modules.get("causestack::manager").map(String::as_str),
        Some("trace")
    );

    let manager = CauseStackManager::with_config(CauseEntry::new(Server), &config);
    assert!(manager.debug_frames());
}

#[test]
fn test_defaults_when_file_is_empty() {
    let temp_dir = TempDir::new().unwrap();
    let config_file = temp_dir.path().join("empty.toml");
    std::fs::write(&config_file, "").unwrap();

    let config = ConfigLoader::load_from_file(&config_file).unwrap();
    assert!(!config.debug_frames);
    assert_eq!(config.logging.format, "text");

    let manager = CauseStackManager::with_config(CauseEntry::new(Server), &config);
    assert!(!manager.debug_frames());
}

#[test]
fn test_malformed_file_is_an_error() {
    let temp_dir = TempDir::new().unwrap();
    let config_file = temp_dir.path().join("broken.toml");
    std::fs::write(&config_file, "debug_frames = [not valid").unwrap();
    assert!(ConfigLoader::load_from_file(&config_file).is_err());
}
