// src/sink/mod.rs

//! Output sink layer.
//!
//! Everything the orchestrator and the tailers have to say to the operator
//! flows through an [`OutputSink`]: an append-only visible text surface.
//!
//! - [`panel`] is the real console-backed sink, including the file:line
//!   reference recognizer for relayed compiler output.
//! - [`memory`] is a recording sink used by tests.

pub mod memory;
pub mod panel;

pub use memory::MemorySink;
pub use panel::{parse_file_reference, FileReference, PanelSink};

/// An append-only, thread-safe text surface.
///
/// Multiple tailer tasks may hold the same sink; implementations must make
/// each `append_line` atomic (no interleaved partial lines). No ordering is
/// guaranteed between lines appended by different tasks.
pub trait OutputSink: Send + Sync {
    /// Make the surface visible to the operator.
    fn show(&self);

    /// Append one line of text.
    fn append_line(&self, line: &str);
}
