use std::error::Error;
use std::fs;

use crbuild::config::{load_and_validate, ConfigFile};

type TestResult = Result<(), Box<dyn Error>>;

#[test]
fn missing_config_file_yields_defaults() -> TestResult {
    let dir = tempfile::tempdir()?;
    let cfg = load_and_validate(dir.path().join("Crbuild.toml"))?;

    assert!(cfg.project.root.is_none());
    assert!(cfg.targets.is_empty());
    assert_eq!(cfg.shell.program, "/bin/bash");
    Ok(())
}

#[test]
fn full_config_round_trips() -> TestResult {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("Crbuild.toml");
    fs::write(
        &path,
        r#"
            [project]
            root = "/src/chromium/src"

            [targets]
            linux = ["chrome", "content_shell"]

            [shell]
            program = "/bin/zsh"
        "#,
    )?;

    let cfg = load_and_validate(&path)?;
    assert_eq!(cfg.project.root.as_deref(), Some("/src/chromium/src"));
    assert_eq!(
        cfg.targets.get("linux"),
        Some(&vec!["chrome".to_string(), "content_shell".to_string()])
    );
    assert_eq!(cfg.shell.program, "/bin/zsh");
    Ok(())
}

#[test]
fn empty_target_list_is_rejected() -> TestResult {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("Crbuild.toml");
    fs::write(&path, "[targets]\nlinux = []\n")?;

    assert!(load_and_validate(&path).is_err());
    Ok(())
}

#[test]
fn multi_word_target_is_rejected() -> TestResult {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("Crbuild.toml");
    fs::write(&path, "[targets]\nlinux = [\"chrome content_shell\"]\n")?;

    assert!(load_and_validate(&path).is_err());
    Ok(())
}

#[test]
fn malformed_toml_is_an_error() -> TestResult {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("Crbuild.toml");
    fs::write(&path, "[project\nroot = 1")?;

    assert!(load_and_validate(&path).is_err());
    Ok(())
}

#[test]
fn defaults_are_usable_directly() -> TestResult {
    let cfg = ConfigFile::default();
    assert_eq!(cfg.shell.program, "/bin/bash");
    Ok(())
}
