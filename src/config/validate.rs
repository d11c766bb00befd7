// src/config/validate.rs

use anyhow::{anyhow, Result};

use crate::config::model::ConfigFile;

/// Run basic semantic validation against a loaded configuration.
///
/// This checks:
/// - every `[targets]` entry has at least one target
/// - target names are single shell words (they get space-joined into the
///   build command line)
/// - `[shell].program` is non-empty
///
/// It does **not** check that platform tokens in `[targets]` are known:
/// Chrome OS device tokens are arbitrary board names.
pub fn validate_config(cfg: &ConfigFile) -> Result<()> {
    validate_targets(cfg)?;
    validate_shell(cfg)?;
    Ok(())
}

fn validate_targets(cfg: &ConfigFile) -> Result<()> {
    for (token, targets) in cfg.targets.iter() {
        if token.trim().is_empty() {
            return Err(anyhow!("[targets] contains an empty platform token"));
        }
        if targets.is_empty() {
            return Err(anyhow!(
                "[targets].{} must list at least one build target",
                token
            ));
        }
        for target in targets {
            if target.trim().is_empty() || target.contains(char::is_whitespace) {
                return Err(anyhow!(
                    "[targets].{} has invalid target name '{}' (must be a single word)",
                    token,
                    target
                ));
            }
        }
    }
    Ok(())
}

fn validate_shell(cfg: &ConfigFile) -> Result<()> {
    if cfg.shell.program.trim().is_empty() {
        return Err(anyhow!("[shell].program must not be empty"));
    }
    Ok(())
}
