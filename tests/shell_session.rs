use std::error::Error;
use std::time::Duration;

use crbuild::shell::ShellSession;

type TestResult = Result<(), Box<dyn Error>>;

const POLL: Duration = Duration::from_millis(500);

#[tokio::test]
async fn run_and_wait_collects_command_output() -> TestResult {
    let session = ShellSession::new("/bin/bash");
    let output = session.run_and_wait("echo hello-from-shell", POLL).await?;
    assert!(output.contains("hello-from-shell"));
    Ok(())
}

#[tokio::test]
async fn shell_state_persists_between_commands() -> TestResult {
    let dir = tempfile::tempdir()?;
    let session = ShellSession::new("/bin/bash");

    session
        .run_and_wait(&format!("cd {}", dir.path().display()), POLL)
        .await?;
    let pwd = session.run_and_wait("pwd", POLL).await?;

    assert!(pwd.contains(&dir.path().display().to_string()));
    Ok(())
}

#[tokio::test]
async fn stderr_is_merged_into_drained_output() -> TestResult {
    let session = ShellSession::new("/bin/bash");
    let output = session
        .run_and_wait("echo oops-on-stderr 1>&2", POLL)
        .await?;
    assert!(output.contains("oops-on-stderr"));
    Ok(())
}

#[tokio::test]
async fn dead_shell_is_respawned_on_next_use() -> TestResult {
    let session = ShellSession::new("/bin/bash");

    // Kill the shell from the inside; drain returns whatever was pending.
    session.run_and_wait("exit 0", POLL).await?;

    let output = session.run_and_wait("echo still-alive", POLL).await?;
    assert!(output.contains("still-alive"));
    Ok(())
}

#[tokio::test]
async fn sdk_board_is_empty_outside_the_cros_chroot() -> TestResult {
    let session = ShellSession::new("/bin/bash");
    // SDK_BOARD is only set inside a cros SDK shell.
    session.run_and_wait("unset SDK_BOARD", POLL).await?;
    assert!(!session.is_chrome_sdk().await?);
    Ok(())
}
