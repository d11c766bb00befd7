// src/engine/orchestrator.rs

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::config::{load_flags_file, BuildSettings, ConfigFile};
use crate::engine::{operation_supported, Operation, Platform};
use crate::exec::{self, ProcessRole, ProcessSlots};
use crate::shell::{shell_quote, spawn_file_tail, spawn_live_tail, ShellSession};
use crate::sink::OutputSink;

/// Poll timeout for the generator's live-stream tail. `gn gen` can chew for
/// a long while before printing anything.
const GN_GEN_TIMEOUT: Duration = Duration::from_secs(60);

/// The (platform, operation, device) selection record handed to the
/// orchestrator. `device` defaults to empty when absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationRequest {
    pub operation: Operation,
    pub platform: Platform,
    pub device: String,
}

/// Orchestration context for one host session.
///
/// Owns the shared shell session (created lazily), the per-role process
/// slots and the output sink. Replaces the original's process-wide
/// singletons so tests can run independent instances side by side.
///
/// Not internally serialized across callers: concurrent `dispatch` calls on
/// clones would race on the process slots, so a single caller (the CLI, or
/// an editor's single-flight command surface) must own each instance.
pub struct Orchestrator {
    cfg: ConfigFile,
    cli_project_root: PathBuf,
    shell: Arc<ShellSession>,
    slots: ProcessSlots,
    sink: Arc<dyn OutputSink>,
    previous: Option<OperationRequest>,
    tails: Vec<JoinHandle<Result<()>>>,
}

impl Orchestrator {
    pub fn new(
        cfg: ConfigFile,
        cli_project_root: impl AsRef<Path>,
        sink: Arc<dyn OutputSink>,
    ) -> Self {
        let shell = Arc::new(ShellSession::new(cfg.shell.program.clone()));

        Self {
            cfg,
            cli_project_root: cli_project_root.as_ref().to_path_buf(),
            shell,
            slots: ProcessSlots::new(),
            sink,
            previous: None,
            tails: Vec::new(),
        }
    }

    /// Dispatch one operation request.
    ///
    /// Returns as soon as any detached processes are launched and their tail
    /// tasks spawned; use [`Orchestrator::wait_idle`] to await relay
    /// completion.
    pub async fn dispatch(&mut self, request: OperationRequest) -> Result<()> {
        info!(
            operation = ?request.operation,
            platform = ?request.platform,
            device = %request.device,
            "dispatching: {}",
            request.operation.describe()
        );

        let request = match request.operation {
            Operation::RepeatPrevious => match self.previous.clone() {
                Some(previous) => {
                    info!(operation = ?previous.operation, "repeating previous operation");
                    previous
                }
                None => {
                    self.sink.show();
                    self.sink.append_line("no previous operation to repeat");
                    return Ok(());
                }
            },
            _ => request,
        };

        self.execute(request).await
    }

    /// Await all outstanding tail tasks.
    ///
    /// Tail failures are user-facing, so they land in the sink rather than
    /// propagating.
    pub async fn wait_idle(&mut self) -> Result<()> {
        for handle in self.tails.drain(..) {
            match handle.await {
                Ok(Ok(())) => {}
                Ok(Err(err)) => {
                    warn!(error = %err, "tail task failed");
                    self.sink.append_line(&format!("output relay failed: {err:#}"));
                }
                Err(err) => {
                    warn!(error = %err, "tail task panicked or was cancelled");
                }
            }
        }
        Ok(())
    }

    /// OS pid of the currently tracked process in `role`, if any.
    pub fn current_pid(&self, role: ProcessRole) -> Option<u32> {
        self.slots.current_pid(role)
    }

    /// True if a tracked process in `role` is still running.
    pub fn is_live(&mut self, role: ProcessRole) -> bool {
        self.slots.is_live(role)
    }

    async fn execute(&mut self, request: OperationRequest) -> Result<()> {
        if !operation_supported(request.platform, request.operation) {
            self.sink.show();
            self.sink.append_line(&format!(
                "operation '{}' is not supported on platform {:?}",
                request.operation.describe(),
                request.platform
            ));
            return Ok(());
        }

        // Record only operations that actually execute, so a later repeat
        // cannot replay a rejected request.
        self.previous = Some(request.clone());

        let settings = BuildSettings::derive(
            request.platform,
            &request.device,
            &self.cli_project_root,
            &self.cfg,
        );
        debug!(?settings, "resolved build settings");

        match request.operation {
            Operation::ShowOutput => {
                self.sink.show();
                Ok(())
            }
            Operation::GenerateArgs => self.generate_args(&settings).await,
            Operation::Build => self.build(&settings).await,
            Operation::Run => self.run(&settings).await,
            Operation::Deploy => self.deploy(&settings),
            Operation::BuildAndRun => {
                self.build(&settings).await?;
                self.run(&settings).await
            }
            Operation::BuildAndDeploy => {
                self.build(&settings).await?;
                self.deploy(&settings)
            }
            // Translated into the recorded request inside `dispatch`.
            Operation::RepeatPrevious => Ok(()),
        }
    }

    /// Launch a detached build, superseding any previous one, and tail its
    /// log into the sink.
    async fn build(&mut self, settings: &BuildSettings) -> Result<()> {
        self.sink.show();

        let log = settings.build_log_path();
        exec::truncate_log(&log).await?;

        // Ordering matters: terminate the stale build before the new one
        // starts, truncate before launch, launch before tail.
        let _superseded = self.slots.supersede(ProcessRole::Build);

        let command_line = exec::build_command_line(settings);
        let child = exec::spawn_detached(&command_line)?;
        let pid = child.id();
        self.slots.track(ProcessRole::Build, child);

        self.sink.append_line(&format!(
            "build started (pid {}): {} in {}",
            format_pid(pid),
            settings.targets.join(" "),
            settings.build_dir.display()
        ));

        self.tails.push(spawn_file_tail(
            log,
            self.sink.clone(),
            exec::COMPLETION_SENTINEL.to_string(),
        ));

        Ok(())
    }

    /// Launch the built binary detached, superseding any previous run, and
    /// tail its log into the sink.
    async fn run(&mut self, settings: &BuildSettings) -> Result<()> {
        self.sink.show();

        let flags = load_flags_file(settings.flags_file_path())?;
        debug!(?flags, "resolved run flags");

        let log = settings.run_log_path();
        exec::truncate_log(&log).await?;

        let _superseded = self.slots.supersede(ProcessRole::Run);

        let command_line = exec::run_command_line(settings, &flags);
        let child = exec::spawn_detached(&command_line)?;
        let pid = child.id();
        self.slots.track(ProcessRole::Run, child);

        self.sink.append_line(&format!(
            "run started (pid {}): {}",
            format_pid(pid),
            settings.run_binary()
        ));

        self.tails.push(spawn_file_tail(
            log,
            self.sink.clone(),
            exec::COMPLETION_SENTINEL.to_string(),
        ));

        Ok(())
    }

    /// Copy the edited scratch gn file into the build directory and run the
    /// generator, live-tailing its output.
    ///
    /// Skipped entirely when the scratch content already matches the
    /// generated `args.gn`, so repeated invocations are cheap.
    async fn generate_args(&mut self, settings: &BuildSettings) -> Result<()> {
        self.sink.show();

        let scratch = settings.scratch_gn_path();
        if !scratch.exists() {
            self.shell
                .touch_file(&scratch.display().to_string())
                .await?;
            self.sink.append_line(&format!(
                "created empty gn args scratch file at {}; edit it and rerun generate-args",
                scratch.display()
            ));
            return Ok(());
        }

        self.shell
            .create_directory(&settings.build_dir.display().to_string())
            .await?;

        let args_gn = settings.gn_args_path();
        let scratch_hash = content_hash(&scratch)?;
        if scratch_hash.is_some() && scratch_hash == content_hash(&args_gn)? {
            info!(path = ?args_gn, "gn args unchanged; skipping generation");
            self.sink.append_line("gn args unchanged; skipping generation");
            return Ok(());
        }

        let contents = tokio::fs::read(&scratch)
            .await
            .with_context(|| format!("reading scratch gn file at {:?}", scratch))?;
        tokio::fs::write(&args_gn, contents)
            .await
            .with_context(|| format!("writing gn args to {:?}", args_gn))?;

        self.shell
            .write_command(&format!(
                "cd {} && gn gen {}",
                shell_quote(&settings.project_root.display().to_string()),
                shell_quote(&settings.build_dir.display().to_string())
            ))
            .await?;

        self.tails.push(spawn_live_tail(
            self.shell.clone(),
            self.sink.clone(),
            GN_GEN_TIMEOUT,
        ));

        Ok(())
    }

    /// Placeholder: deploy semantics are undefined so far.
    fn deploy(&mut self, settings: &BuildSettings) -> Result<()> {
        warn!(platform_token = %settings.platform_token, "deploy requested but not implemented");
        self.sink
            .append_line("deploy is not implemented yet; nothing was deployed");
        Ok(())
    }
}

fn format_pid(pid: Option<u32>) -> String {
    match pid {
        Some(pid) => pid.to_string(),
        None => "unknown".to_string(),
    }
}

/// blake3 hash of a file's contents, or `None` when the file is missing.
fn content_hash(path: &Path) -> Result<Option<String>> {
    if !path.is_file() {
        return Ok(None);
    }

    let mut hasher = blake3::Hasher::new();
    let mut file =
        File::open(path).with_context(|| format!("opening file for hashing: {:?}", path))?;
    let mut buf = [0u8; 8192];

    loop {
        let n = file.read(&mut buf)?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }

    Ok(Some(hasher.finalize().to_hex().to_string()))
}
