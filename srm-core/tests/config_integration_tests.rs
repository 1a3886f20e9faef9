// srm-core/tests/config_integration_tests.rs
use anyhow::Result;
use std::io::Write;
use tempfile::NamedTempFile;

use srm_core::config::{self, CipherChoice, DeletionConfig, DeletionSettings};
use srm_core::SrmError;

fn settings_file(yaml: &str) -> Result<NamedTempFile> {
    let mut file = NamedTempFile::new()?;
    file.write_all(yaml.as_bytes())?;
    Ok(file)
}

#[test]
fn test_load_full_settings() -> Result<()> {
    let file = settings_file(
        r#"
overwrite_passes: 7
cipher: ChaCha20
sanitize_metadata: false
secure_log: true
recursive: true
rename_iterations: 5
"#,
    )?;
    let settings = DeletionSettings::load_from_file(file.path())?;
    let config = DeletionConfig::from_settings(&settings)?;

    assert_eq!(config.overwrite_passes(), 7);
    assert_eq!(config.cipher(), CipherChoice::ChaCha20);
    assert!(!config.sanitize_metadata());
    assert!(config.secure_log_enabled());
    assert!(config.recursive());
    assert_eq!(config.rename_iterations(), 5);
    assert!(!config.verbose());
    Ok(())
}

#[test]
fn test_partial_settings_keep_defaults() -> Result<()> {
    let file = settings_file("cipher: AES-256\n")?;
    let settings = DeletionSettings::load_from_file(file.path())?;
    let config = DeletionConfig::from_settings(&settings)?;
    assert_eq!(config, DeletionConfig::default());
    Ok(())
}

#[test]
fn test_empty_file_is_defaults() -> Result<()> {
    let file = settings_file("")?;
    assert_eq!(DeletionSettings::load_from_file(file.path())?, DeletionSettings::default());
    Ok(())
}

#[test]
fn test_unknown_field_is_rejected() -> Result<()> {
    let file = settings_file("overwrite_passes: 3\nshred_twice: true\n")?;
    let err = DeletionSettings::load_from_file(file.path()).unwrap_err();
    assert!(format!("{:#}", err).contains("Failed to parse config file"));
    Ok(())
}

#[test]
fn test_missing_file_has_context() {
    let err = DeletionSettings::load_from_file("/definitely/not/here/srm.yaml").unwrap_err();
    assert!(err.to_string().contains("Failed to read config file"));
}

#[test]
fn test_out_of_range_passes_from_file() -> Result<()> {
    let file = settings_file("overwrite_passes: 36\n")?;
    let settings = DeletionSettings::load_from_file(file.path())?;
    let err = DeletionConfig::from_settings(&settings).unwrap_err();
    assert!(matches!(err, SrmError::InvalidPasses(36)));
    assert!(err.is_config_error());
    Ok(())
}

#[test]
fn test_command_line_overrides_file() -> Result<()> {
    let file = settings_file("overwrite_passes: 9\nsecure_log: true\n")?;
    let from_file = DeletionSettings::load_from_file(file.path())?;
    let flags = DeletionSettings {
        overwrite_passes: Some(2),
        ..Default::default()
    };
    let merged = config::merge_settings(from_file, Some(flags));
    let config = DeletionConfig::from_settings(&merged)?;
    assert_eq!(config.overwrite_passes(), 2);
    assert!(config.secure_log_enabled());
    Ok(())
}
