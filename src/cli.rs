// src/cli.rs

//! CLI argument parsing using `clap`.
//!
//! The (platform, operation, device) triple is the selection record the
//! orchestrator consumes; everything else is plumbing (config path, roots,
//! log level).

use clap::{Parser, ValueEnum};

use crate::engine::{Operation, Platform};

/// Command-line arguments for `crbuild`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "crbuild",
    version,
    about = "Configure, build, run and deploy Chromium from a persistent shell session.",
    long_about = None
)]
pub struct CliArgs {
    /// Platform to build for.
    #[arg(long, value_enum, value_name = "PLATFORM")]
    pub platform: Platform,

    /// Operation to perform.
    #[arg(long, value_enum, value_name = "OPERATION")]
    pub operation: Operation,

    /// Device board name (Chrome OS device builds only).
    ///
    /// Defaults to empty when absent; for `chrome-os-device` the board name
    /// becomes the platform token.
    #[arg(long, value_name = "BOARD", default_value = "")]
    pub device: String,

    /// Chromium checkout root (the directory containing `out_*` dirs).
    ///
    /// Default: the current working directory.
    #[arg(long, value_name = "PATH", default_value = ".")]
    pub project_root: String,

    /// Path to the config file (TOML).
    ///
    /// Default: `Crbuild.toml` in the current working directory. A missing
    /// config file is not an error; defaults apply.
    #[arg(long, value_name = "PATH", default_value = "Crbuild.toml")]
    pub config: String,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `CRBUILD_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
