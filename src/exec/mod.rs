// src/exec/mod.rs

//! Detached process layer.
//!
//! Build and run processes are launched detached from the orchestrator:
//! their combined output is redirected into a log file by the composed
//! command line, which also echoes a sentinel line on completion, so the
//! file tailer never needs a handle to the process.
//!
//! - [`launcher`] composes those command lines, truncates log files, and
//!   spawns the detached processes.
//! - [`lifecycle`] tracks the one live build and one live run process and
//!   supersedes stale ones.

pub mod launcher;
pub mod lifecycle;

pub use launcher::{
    build_command_line, run_command_line, spawn_detached, truncate_log, COMPLETION_SENTINEL,
};
pub use lifecycle::{ProcessRole, ProcessSlots};
