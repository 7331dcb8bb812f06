use std::fs;

use tempfile::tempdir;
use transistor_cli::config::TransistorConfig;
use transistor_cli::generate::{FlagEnum, GenerateError};

fn permission() -> FlagEnum {
    let mut flags = FlagEnum::new("Permission").unwrap();
    for flag in ["read", "write", "delete_all", "super-admin"] {
        flags.push(flag).unwrap();
    }
    flags
}

#[test]
fn renders_enum() {
    let expected = "\
use transistor::Flags;

#[derive(Flags, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum Permission {
    Read = 1 << 0,
    Write = 1 << 1,
    DeleteAll = 1 << 2,
    SuperAdmin = 1 << 3,
}
";
    assert_eq!(permission().render().unwrap(), expected);
}

#[test]
fn writes_snake_case_file() {
    let dir = tempdir().unwrap();
    let mut flags = FlagEnum::new("UserSetting").unwrap();
    flags.push("dark_mode").unwrap();

    let path = flags.write(dir.path(), false).unwrap();
    assert_eq!(path, dir.path().join("user_setting.rs"));
    let written = fs::read_to_string(&path).unwrap();
    assert!(written.contains("pub enum UserSetting {"));
    assert!(written.contains("    DarkMode = 1 << 0,"));
}

#[test]
fn creates_output_dir() {
    let dir = tempdir().unwrap();
    let nested = dir.path().join("src").join("flags");
    let path = permission().write(&nested, false).unwrap();
    assert!(path.is_file());
}

#[test]
fn refuses_to_overwrite_without_force() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("permission.rs");
    fs::write(&path, "// keep").unwrap();

    let err = permission().write(dir.path(), false).unwrap_err();
    assert!(matches!(err, GenerateError::Exists(_)));
    assert_eq!(fs::read_to_string(&path).unwrap(), "// keep");

    permission().write(dir.path(), true).unwrap();
    assert!(fs::read_to_string(&path).unwrap().contains("pub enum Permission"));
}

#[test]
fn no_flags_writes_nothing() {
    let dir = tempdir().unwrap();
    let flags = FlagEnum::new("Empty").unwrap();
    let err = flags.write(dir.path(), false).unwrap_err();
    assert!(matches!(err, GenerateError::NoFlags));
    assert!(!dir.path().join("empty.rs").exists());
}

#[test]
fn rejects_invalid_enum_names() {
    for name in ["permission", "Per-mission", "1Permission", ""] {
        assert!(matches!(
            FlagEnum::new(name),
            Err(GenerateError::InvalidName(_))
        ));
    }
}

#[test]
fn duplicates_detected_after_normalization() {
    let mut flags = FlagEnum::new("Permission").unwrap();
    flags.push("some_flag").unwrap();
    let err = flags.push("some-flag").unwrap_err();
    assert_eq!(err.to_string(), "flag 'SomeFlag' already exists");
}

#[test]
fn writes_into_configured_dir() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("transistor.toml");
    let out = dir.path().join("generated");
    fs::write(
        &config_path,
        format!("output_dir = {:?}\n", out.to_str().unwrap()),
    )
    .unwrap();

    let config = TransistorConfig::load_or_default(&config_path).unwrap();
    let path = permission().write(&config.output_dir, false).unwrap();
    assert_eq!(path, out.join("permission.rs"));
}

#[test]
fn invalid_config_is_an_error() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("transistor.toml");
    fs::write(&config_path, "output_dir = [").unwrap();
    assert!(TransistorConfig::load_or_default(&config_path).is_err());
}
