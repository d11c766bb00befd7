use std::collections::BTreeMap;
use std::error::Error;
use std::path::PathBuf;

use crbuild::config::{BuildSettings, ConfigFile};
use crbuild::engine::Platform;

type TestResult = Result<(), Box<dyn Error>>;

#[test]
fn linux_build_dir_follows_out_token_default_convention() -> TestResult {
    let cfg = ConfigFile::default();
    let settings = BuildSettings::derive(Platform::Linux, "", "/src/chromium/src", &cfg);

    assert_eq!(settings.platform_token, "linux");
    assert_eq!(
        settings.build_dir,
        PathBuf::from("/src/chromium/src/out_linux/Default")
    );
    assert_eq!(settings.targets, vec!["chrome".to_string()]);

    // Idempotent: same inputs, same derivation.
    let again = BuildSettings::derive(Platform::Linux, "", "/src/chromium/src", &cfg);
    assert_eq!(settings, again);
    assert_eq!(settings.build_dir, again.build_dir);

    Ok(())
}

#[test]
fn chrome_os_device_uses_board_name_as_token() -> TestResult {
    let cfg = ConfigFile::default();
    let settings = BuildSettings::derive(Platform::ChromeOsDevice, "eve", "/work/cr", &cfg);

    assert_eq!(settings.platform_token, "eve");
    assert_eq!(settings.build_dir, PathBuf::from("/work/cr/out_eve/Default"));
    assert_eq!(settings.scratch_gn_path(), PathBuf::from("/work/cr/eve.gn"));

    Ok(())
}

#[test]
fn android_gets_apk_default_target() -> TestResult {
    let cfg = ConfigFile::default();
    let settings = BuildSettings::derive(Platform::Android, "", "/work/cr", &cfg);

    assert_eq!(settings.platform_token, "android");
    assert_eq!(settings.targets, vec!["chrome_public_apk".to_string()]);

    Ok(())
}

#[test]
fn equality_ignores_target_list() -> TestResult {
    let plain = ConfigFile::default();

    let mut targets = BTreeMap::new();
    targets.insert(
        "linux".to_string(),
        vec!["chrome".to_string(), "content_shell".to_string()],
    );
    let overridden = ConfigFile {
        targets,
        ..ConfigFile::default()
    };

    let a = BuildSettings::derive(Platform::Linux, "", "/work/cr", &plain);
    let b = BuildSettings::derive(Platform::Linux, "", "/work/cr", &overridden);

    assert_ne!(a.targets, b.targets);
    assert_eq!(a, b);

    Ok(())
}

#[test]
fn config_overrides_roots_and_targets() -> TestResult {
    let toml = r#"
        [project]
        root = "/ssd/chromium/src"
        source_root = "/home/me/gn-scratch"

        [targets]
        linux = ["content_shell"]
    "#;
    let cfg: ConfigFile = toml::from_str(toml)?;

    let settings = BuildSettings::derive(Platform::Linux, "", "/ignored", &cfg);

    assert_eq!(settings.project_root, PathBuf::from("/ssd/chromium/src"));
    assert_eq!(
        settings.build_dir,
        PathBuf::from("/ssd/chromium/src/out_linux/Default")
    );
    assert_eq!(
        settings.scratch_gn_path(),
        PathBuf::from("/home/me/gn-scratch/linux.gn")
    );
    assert_eq!(settings.targets, vec!["content_shell".to_string()]);
    assert_eq!(settings.run_binary(), "content_shell");

    Ok(())
}

#[test]
fn derived_paths_use_documented_file_names() -> TestResult {
    let cfg = ConfigFile::default();
    let settings = BuildSettings::derive(Platform::Linux, "", "/work/cr", &cfg);

    assert_eq!(
        settings.gn_args_path(),
        PathBuf::from("/work/cr/out_linux/Default/args.gn")
    );
    assert_eq!(
        settings.build_log_path(),
        PathBuf::from("/work/cr/out_linux/Default/build_output.txt")
    );
    assert_eq!(
        settings.run_log_path(),
        PathBuf::from("/work/cr/out_linux/Default/chrome_output.txt")
    );
    assert_eq!(
        settings.flags_file_path(),
        PathBuf::from("/work/cr/command_line_flags.txt")
    );

    Ok(())
}
