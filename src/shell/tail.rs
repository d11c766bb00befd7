// src/shell/tail.rs

//! Background output tailers.
//!
//! Two modes, both fire-and-forget tokio tasks that relay text into an
//! [`OutputSink`] and whose completion is observable through the returned
//! `JoinHandle`:
//!
//! - [`spawn_live_tail`] drains the shared shell's stdout until a poll
//!   yields nothing, then flushes everything as a single append. Used for
//!   short-lived generator commands run through the shell itself.
//! - [`spawn_file_tail`] follows a growing log file line by line until it
//!   sees the end-of-stream sentinel. Used for detached build/run processes
//!   that redirect their output into the file and echo the sentinel when
//!   done, so the tailer never needs a handle to the process itself.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::{debug, warn};

use crate::sink::OutputSink;
use crate::shell::ShellSession;

/// Marker line appended to the sink when a file tail observes the sentinel.
pub const END_OF_OUTPUT_MARKER: &str = "[end of output]";

/// Placeholder appended when a live tail drains nothing at all.
const NO_OUTPUT_PLACEHOLDER: &str = "(no output generated)";

/// Interval between reads while waiting for a tailed file to grow.
const FILE_POLL_INTERVAL: Duration = Duration::from_millis(200);

/// How often and how long to retry opening a log file that the launching
/// command may not have created yet.
const OPEN_RETRY_INTERVAL: Duration = Duration::from_millis(200);
const OPEN_RETRY_LIMIT: u32 = 25;

/// Drain the live shell output once and flush it to the sink.
///
/// The task ends the first time a poll of `poll_timeout` yields no data;
/// everything accumulated up to that point goes to the sink as one append
/// (or a placeholder line if the command produced nothing).
pub fn spawn_live_tail(
    session: Arc<ShellSession>,
    sink: Arc<dyn OutputSink>,
    poll_timeout: Duration,
) -> JoinHandle<Result<()>> {
    tokio::spawn(async move {
        let output = session.collect_output(poll_timeout).await?;
        let trimmed = output.trim_end();

        if trimmed.is_empty() {
            sink.append_line(NO_OUTPUT_PLACEHOLDER);
        } else {
            sink.append_line(trimmed);
        }

        debug!(bytes = output.len(), "live tail finished");
        Ok(())
    })
}

/// Follow a growing log file, relaying lines to the sink until the sentinel.
///
/// Every non-empty line that does not contain `sentinel` is forwarded
/// immediately with its trailing newline stripped. The loop ends the instant
/// a line containing the sentinel is read; one [`END_OF_OUTPUT_MARKER`] line
/// is appended and nothing after the sentinel is ever relayed.
///
/// Callers must truncate the file before launching the writing command and
/// before spawning this task; as a second line of defence the open is
/// retried with a bounded backoff in case the file does not exist yet.
pub fn spawn_file_tail(
    path: PathBuf,
    sink: Arc<dyn OutputSink>,
    sentinel: String,
) -> JoinHandle<Result<()>> {
    tokio::spawn(async move {
        let file = open_with_retry(&path).await?;
        let mut reader = BufReader::new(file);
        let mut pending = String::new();

        loop {
            let mut chunk = String::new();
            let n = reader
                .read_line(&mut chunk)
                .await
                .with_context(|| format!("reading tailed log at {:?}", path))?;

            if n == 0 {
                // At the current end of file; the writer may still append.
                sleep(FILE_POLL_INTERVAL).await;
                continue;
            }

            pending.push_str(&chunk);
            if !pending.ends_with('\n') {
                // Partial line; wait for the writer to finish it.
                continue;
            }

            let line = pending.trim_end_matches(['\r', '\n']).to_string();
            pending.clear();

            if line.contains(&sentinel) {
                sink.append_line(END_OF_OUTPUT_MARKER);
                debug!(path = ?path, "file tail observed sentinel; done");
                return Ok(());
            }

            if !line.is_empty() {
                sink.append_line(&line);
            }
        }
    })
}

async fn open_with_retry(path: &PathBuf) -> Result<File> {
    let mut attempt = 0;

    loop {
        match File::open(path).await {
            Ok(file) => return Ok(file),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                attempt += 1;
                if attempt >= OPEN_RETRY_LIMIT {
                    return Err(err)
                        .with_context(|| format!("log file never appeared at {:?}", path));
                }
                warn!(path = ?path, attempt, "log file not created yet; retrying");
                sleep(OPEN_RETRY_INTERVAL).await;
            }
            Err(err) => {
                return Err(err).with_context(|| format!("opening tailed log at {:?}", path));
            }
        }
    }
}
