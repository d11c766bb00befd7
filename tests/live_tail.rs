use std::error::Error;
use std::sync::Arc;
use std::time::Duration;

use crbuild::shell::{spawn_live_tail, ShellSession};
use crbuild::sink::MemorySink;

type TestResult = Result<(), Box<dyn Error>>;

const POLL: Duration = Duration::from_millis(500);

#[tokio::test]
async fn flushes_accumulated_output_in_one_append() -> TestResult {
    let session = Arc::new(ShellSession::new("/bin/bash"));
    session
        .write_command("echo first-line; echo second-line")
        .await?;

    let sink = Arc::new(MemorySink::new());
    spawn_live_tail(session, sink.clone(), POLL).await??;

    // Both lines drained, then flushed as a single append.
    let lines = sink.lines();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].contains("first-line"));
    assert!(lines[0].contains("second-line"));

    Ok(())
}

#[tokio::test]
async fn silent_session_yields_placeholder_after_timeout() -> TestResult {
    let session = Arc::new(ShellSession::new("/bin/bash"));

    // No command written: the poll times out with nothing drained and the
    // tail reports that explicitly instead of appending an empty line.
    let sink = Arc::new(MemorySink::new());
    spawn_live_tail(session, sink.clone(), POLL).await??;

    assert_eq!(sink.lines(), vec!["(no output generated)".to_string()]);

    Ok(())
}
