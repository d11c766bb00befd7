// src/sink/memory.rs

//! Recording sink for tests.
//!
//! Public (not `#[cfg(test)]`) so integration tests under `tests/` can use
//! it as the orchestrator's display surface.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use crate::sink::OutputSink;

/// An [`OutputSink`] that records appended lines in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    lines: Mutex<Vec<String>>,
    shown: AtomicBool,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all appended lines, in append order.
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// True once `show()` has been called at least once.
    pub fn was_shown(&self) -> bool {
        self.shown.load(Ordering::SeqCst)
    }

    /// True if any recorded line contains the given needle.
    pub fn contains(&self, needle: &str) -> bool {
        self.lines().iter().any(|line| line.contains(needle))
    }
}

impl OutputSink for MemorySink {
    fn show(&self) {
        self.shown.store(true, Ordering::SeqCst);
    }

    fn append_line(&self, line: &str) {
        self.lines
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(line.to_string());
    }
}
