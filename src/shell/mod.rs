// src/shell/mod.rs

//! Persistent shell session and output tailing.
//!
//! - [`session`] owns the single long-lived shell process that all
//!   operations write their commands to.
//! - [`tail`] contains the background tasks that relay live shell output or
//!   a growing log file into an [`crate::sink::OutputSink`].

pub mod session;
pub mod tail;

pub use session::{shell_quote, ShellSession};
pub use tail::{spawn_file_tail, spawn_live_tail, END_OF_OUTPUT_MARKER};
