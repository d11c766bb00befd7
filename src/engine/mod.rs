// src/engine/mod.rs

//! Orchestration engine for crbuild.
//!
//! This module ties together:
//! - the operation/platform tokens and the supported-operation table
//! - the orchestrator state machine that turns one (platform, operation,
//!   device) request into shell commands, detached processes and tail tasks

pub mod operation;
pub mod orchestrator;

pub use operation::{operation_supported, Operation, Platform};
pub use orchestrator::{OperationRequest, Orchestrator};
