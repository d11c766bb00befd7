// src/shell/session.rs

use std::process::Stdio;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::process::{Child, ChildStdin, ChildStdout, Command};
use tokio::sync::{Mutex, MutexGuard};
use tokio::time::timeout;
use tracing::{debug, info, warn};

/// Timeout used by the short synchronous helper queries.
const HELPER_TIMEOUT: Duration = Duration::from_millis(500);

/// Quote a string for interpolation into a shell command line.
///
/// Plain tokens (paths, flags) pass through untouched; anything containing
/// shell-special characters is single-quoted, with embedded single quotes
/// escaped, so paths with spaces survive the composed command lines.
pub fn shell_quote(s: &str) -> String {
    let is_plain = !s.is_empty()
        && s.chars()
            .all(|c| c.is_ascii_alphanumeric() || "/._-+=:,@".contains(c));

    if is_plain {
        s.to_string()
    } else {
        format!("'{}'", s.replace('\'', "'\\''"))
    }
}

/// A single persistent shell process shared by all operations.
///
/// The child is spawned lazily on first use and kept for the lifetime of the
/// session; `kill_on_drop` ties its lifetime to the host process. All access
/// goes through one lock covering stdin *and* stdout, so concurrent callers
/// can neither interleave command text nor steal each other's output.
///
/// Shell state is shared: a `cd` issued by one command persists for the
/// next. Callers that depend on the working directory must encode it into
/// their own command line.
///
/// Recovery policy: if the shell child has exited, the next access respawns
/// it (with a warning). Shell-local state is lost across a respawn.
pub struct ShellSession {
    program: String,
    inner: Mutex<Option<ShellInner>>,
}

struct ShellInner {
    child: Child,
    stdin: ChildStdin,
    stdout: ChildStdout,
}

impl ShellSession {
    /// Create a session that will spawn `program` on first use.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            inner: Mutex::new(None),
        }
    }

    /// Write a command to the shell without collecting any output.
    ///
    /// The trailing newline is appended here; callers pass the bare command.
    pub async fn write_command(&self, cmd: &str) -> Result<()> {
        let mut guard = self.lock_alive().await?;
        let inner = guard.as_mut().context("shell session unavailable")?;
        inner.write_line(cmd).await
    }

    /// Write a command, then synchronously drain whatever output arrives.
    ///
    /// Draining stops the first time `poll_timeout` elapses with no data, so
    /// this blocks the caller for at least one timeout interval. The result
    /// is everything read, decoded as (lossy) UTF-8. Command success is not
    /// checked; encode it into the command itself if needed.
    pub async fn run_and_wait(&self, cmd: &str, poll_timeout: Duration) -> Result<String> {
        let mut guard = self.lock_alive().await?;
        let inner = guard.as_mut().context("shell session unavailable")?;
        inner.write_line(cmd).await?;
        inner.drain_available(poll_timeout).await
    }

    /// Drain currently pending shell output without writing anything.
    ///
    /// Used by the live-stream tailer; holds the session lock for the whole
    /// drain so reads cannot race a concurrent `run_and_wait`.
    pub async fn collect_output(&self, poll_timeout: Duration) -> Result<String> {
        let mut guard = self.lock_alive().await?;
        let inner = guard.as_mut().context("shell session unavailable")?;
        inner.drain_available(poll_timeout).await
    }

    /// True when running inside a Chrome OS SDK shell (cros chroot).
    pub async fn is_chrome_sdk(&self) -> Result<bool> {
        let board = self.chrome_sdk_board().await?;
        Ok(!board.is_empty())
    }

    /// The `SDK_BOARD` value of the shell environment, or empty.
    pub async fn chrome_sdk_board(&self) -> Result<String> {
        let output = self
            .run_and_wait("printenv SDK_BOARD", HELPER_TIMEOUT)
            .await?;
        Ok(output.trim().to_string())
    }

    /// Create a directory (and parents) through the shell.
    pub async fn create_directory(&self, path: &str) -> Result<()> {
        // run_and_wait rather than write_command so the caller can rely on
        // the directory existing once this returns.
        self.run_and_wait(&format!("mkdir -p {}", shell_quote(path)), HELPER_TIMEOUT)
            .await?;
        Ok(())
    }

    /// Create an empty file through the shell if it does not exist.
    pub async fn touch_file(&self, path: &str) -> Result<()> {
        self.run_and_wait(&format!("touch {}", shell_quote(path)), HELPER_TIMEOUT)
            .await?;
        Ok(())
    }

    /// Lock the session, spawning or respawning the shell child if needed.
    async fn lock_alive(&self) -> Result<MutexGuard<'_, Option<ShellInner>>> {
        let mut guard = self.inner.lock().await;

        let needs_spawn = match guard.as_mut() {
            None => true,
            Some(inner) => match inner.child.try_wait() {
                Ok(None) => false,
                Ok(Some(status)) => {
                    warn!(%status, "shell session died; respawning on next use");
                    true
                }
                Err(err) => {
                    warn!(error = %err, "cannot query shell child; respawning");
                    true
                }
            },
        };

        if needs_spawn {
            *guard = Some(ShellInner::spawn(&self.program).await?);
        }

        Ok(guard)
    }
}

impl ShellInner {
    async fn spawn(program: &str) -> Result<Self> {
        info!(program = %program, "spawning persistent shell session");

        let mut child = Command::new(program)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .with_context(|| format!("spawning shell '{program}'"))?;

        let stdin = child
            .stdin
            .take()
            .context("shell child has no stdin pipe")?;
        let stdout = child
            .stdout
            .take()
            .context("shell child has no stdout pipe")?;

        let mut inner = Self {
            child,
            stdin,
            stdout,
        };

        // Merge the shell's stderr into the stdout pipe so command errors
        // show up in drained output.
        inner.write_line("exec 2>&1").await?;

        Ok(inner)
    }

    async fn write_line(&mut self, cmd: &str) -> Result<()> {
        debug!(cmd = %cmd, "writing command to shell");

        self.stdin
            .write_all(cmd.as_bytes())
            .await
            .context("writing command to shell stdin")?;
        self.stdin
            .write_all(b"\n")
            .await
            .context("writing command terminator to shell stdin")?;
        self.stdin
            .flush()
            .await
            .context("flushing shell stdin")?;

        Ok(())
    }

    /// Read until `poll_timeout` elapses with no data (or the pipe closes).
    async fn drain_available(&mut self, poll_timeout: Duration) -> Result<String> {
        let mut collected = Vec::new();
        let mut buf = [0u8; 4096];

        loop {
            match timeout(poll_timeout, self.stdout.read(&mut buf)).await {
                Err(_) => break,   // no data within the poll window
                Ok(Ok(0)) => break, // pipe closed
                Ok(Ok(n)) => collected.extend_from_slice(&buf[..n]),
                Ok(Err(err)) => {
                    return Err(err).context("reading shell stdout");
                }
            }
        }

        debug!(bytes = collected.len(), "drained shell output");
        Ok(String::from_utf8_lossy(&collected).into_owned())
    }
}
