// src/exec/launcher.rs

use std::path::Path;
use std::process::Stdio;

use anyhow::{Context, Result};
use tokio::fs::File;
use tokio::process::{Child, Command};
use tracing::{debug, info};

use crate::config::BuildSettings;
use crate::shell::shell_quote;

/// Sentinel echoed into the log file by the launched command itself once the
/// real command has finished, successfully or not. The file tailer treats a
/// line containing this token as logical end of stream, independent of the
/// process exit status.
pub const COMPLETION_SENTINEL: &str = "CRBUILD_OPERATION_COMPLETE";

/// Parallelism hint passed to ninja; goma/reclient absorb the excess.
const NINJA_JOBS: u32 = 1000;

/// Compose the detached build command line.
///
/// Shape: change into the project root, run ninja against the build
/// directory with the space-joined target list, redirect combined output
/// into the build log, and append the sentinel when ninja exits.
pub fn build_command_line(settings: &BuildSettings) -> String {
    let log = shell_quote(&settings.build_log_path().display().to_string());

    format!(
        "cd {root} && ninja -j {jobs} -C {build_dir} {targets} > {log} 2>&1; echo {sentinel} >> {log}",
        root = shell_quote(&settings.project_root.display().to_string()),
        jobs = NINJA_JOBS,
        build_dir = shell_quote(&settings.build_dir.display().to_string()),
        targets = settings.targets.join(" "),
        log = log,
        sentinel = COMPLETION_SENTINEL,
    )
}

/// Compose the detached run command line.
///
/// The binary named by the first target is launched from inside the build
/// directory with the flags from the flags file, same log/sentinel
/// convention as the build.
pub fn run_command_line(settings: &BuildSettings, flags: &[String]) -> String {
    let log = shell_quote(&settings.run_log_path().display().to_string());

    let mut invocation = shell_quote(&format!("./{}", settings.run_binary()));
    for flag in flags {
        invocation.push(' ');
        invocation.push_str(&shell_quote(flag));
    }

    format!(
        "cd {build_dir} && {invocation} > {log} 2>&1; echo {sentinel} >> {log}",
        build_dir = shell_quote(&settings.build_dir.display().to_string()),
        log = log,
        sentinel = COMPLETION_SENTINEL,
    )
}

/// Truncate (create empty) a log file, creating parent directories.
///
/// This must happen before the writing command is launched and before the
/// tailer starts reading; the ordering is what keeps the tailer from racing
/// a not-yet-created file.
pub async fn truncate_log(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("creating log directory at {:?}", parent))?;
    }

    File::create(path)
        .await
        .with_context(|| format!("truncating log file at {:?}", path))?;

    debug!(path = ?path, "log file truncated");
    Ok(())
}

/// Spawn a command line as a detached external process.
///
/// All stdio is null: the command line itself redirects output into its log
/// file. The child is *not* killed on drop; termination is the lifecycle
/// manager's job, and an orphaned run process surviving the host is the
/// intended detached behaviour.
pub fn spawn_detached(command_line: &str) -> Result<Child> {
    info!(cmd = %command_line, "launching detached process");

    let mut cmd = if cfg!(windows) {
        let mut c = Command::new("cmd");
        c.arg("/C").arg(command_line);
        c
    } else {
        let mut c = Command::new("sh");
        c.arg("-c").arg(command_line);
        c
    };

    cmd.stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null());

    cmd.spawn()
        .with_context(|| format!("spawning detached process for '{command_line}'"))
}
