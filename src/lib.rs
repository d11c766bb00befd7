// src/lib.rs

pub mod cli;
pub mod config;
pub mod engine;
pub mod errors;
pub mod exec;
pub mod logging;
pub mod shell;
pub mod sink;

use std::sync::Arc;

use anyhow::{bail, Result};
use tracing::info;

use crate::cli::CliArgs;
use crate::config::load_and_validate;
use crate::engine::{operation_supported, OperationRequest, Orchestrator};
use crate::sink::{OutputSink, PanelSink};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading
/// - the console sink
/// - the orchestration context (shell session, process slots)
/// - one operation dispatch, then waiting for output relay to finish
pub async fn run(args: CliArgs) -> Result<()> {
    let cfg = load_and_validate(&args.config)?;

    if !operation_supported(args.platform, args.operation) {
        bail!(
            "operation '{}' is not supported on platform {:?}",
            args.operation.describe(),
            args.platform
        );
    }

    let sink: Arc<dyn OutputSink> = Arc::new(PanelSink::new());
    let mut orchestrator = Orchestrator::new(cfg, &args.project_root, sink);

    let request = OperationRequest {
        operation: args.operation,
        platform: args.platform,
        device: args.device.clone(),
    };

    orchestrator.dispatch(request).await?;
    orchestrator.wait_idle().await?;

    info!("crbuild done");
    Ok(())
}
