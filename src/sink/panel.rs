// src/sink/panel.rs

use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{LazyLock, Mutex};

use regex::Regex;
use tracing::debug;

use crate::sink::OutputSink;

/// Pattern for file:line references embedded in relayed build output, e.g.
///
/// ```text
/// ../../chrome/browser/ui/browser.cc:42:17: error: ...
/// (../../base/logging.h(88): warning ...
/// ```
///
/// Shape: optional `(` prefix, path token, then `:` or `(`, line number,
/// optional `,`/`:` column, closing `)` or `:`, trailing message.
static FILE_REF_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\(?([^\s:()]+)[:(](\d+)(?:[,:](\d+))?[):]")
        .expect("file reference pattern is valid")
});

/// A recognized file:line[:col] reference at the start of an output line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReference {
    pub path: String,
    pub line: u32,
    pub column: Option<u32>,
}

/// Try to recognize a file:line reference at the start of the given line.
pub fn parse_file_reference(line: &str) -> Option<FileReference> {
    let caps = FILE_REF_RE.captures(line)?;

    let path = caps.get(1)?.as_str().to_string();
    let line_no: u32 = caps.get(2)?.as_str().parse().ok()?;
    let column = caps.get(3).and_then(|m| m.as_str().parse().ok());

    Some(FileReference {
        path,
        line: line_no,
        column,
    })
}

/// Console-backed output sink.
///
/// Appends are serialized under a mutex so concurrent tailers never
/// interleave partial lines. Recognized file references are surfaced as
/// structured debug events for editor integrations to jump on.
pub struct PanelSink {
    write_lock: Mutex<()>,
    visible: AtomicBool,
}

impl PanelSink {
    pub fn new() -> Self {
        Self {
            write_lock: Mutex::new(()),
            visible: AtomicBool::new(false),
        }
    }
}

impl Default for PanelSink {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputSink for PanelSink {
    fn show(&self) {
        if !self.visible.swap(true, Ordering::SeqCst) {
            let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());
            println!("--- crbuild output ---");
        }
    }

    fn append_line(&self, line: &str) {
        if let Some(reference) = parse_file_reference(line) {
            debug!(
                path = %reference.path,
                line = reference.line,
                column = ?reference.column,
                "output line carries a file reference"
            );
        }

        // A poisoned lock only means another append panicked mid-println;
        // the surface itself is still usable.
        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());
        let mut stdout = std::io::stdout().lock();
        let _ = writeln!(stdout, "{line}");
    }
}
