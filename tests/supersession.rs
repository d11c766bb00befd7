use std::error::Error;

use crbuild::exec::{spawn_detached, ProcessRole, ProcessSlots};

type TestResult = Result<(), Box<dyn Error>>;

#[tokio::test]
async fn superseding_a_live_build_terminates_it() -> TestResult {
    let mut slots = ProcessSlots::new();

    let first = spawn_detached("sleep 5")?;
    slots.track(ProcessRole::Build, first);
    let first_pid = slots.current_pid(ProcessRole::Build);
    assert!(first_pid.is_some());
    assert!(slots.is_live(ProcessRole::Build));

    // Terminate the stale process before launching its replacement.
    let mut superseded = slots
        .supersede(ProcessRole::Build)
        .expect("previous build handle");
    let second = spawn_detached("sleep 5")?;
    slots.track(ProcessRole::Build, second);

    // The kill was requested before the second launch; awaiting the old
    // handle confirms it actually died well before its 5s sleep.
    let status = superseded.wait().await?;
    assert!(!status.success());

    // Exactly one live build process remains.
    assert!(slots.is_live(ProcessRole::Build));
    assert_ne!(slots.current_pid(ProcessRole::Build), first_pid);

    let mut last = slots.supersede(ProcessRole::Build).expect("second handle");
    last.wait().await?;
    Ok(())
}

#[tokio::test]
async fn superseding_an_exited_process_is_quiet() -> TestResult {
    let mut slots = ProcessSlots::new();

    let mut done = spawn_detached("true")?;
    done.wait().await?;
    slots.track(ProcessRole::Run, done);

    // Already exited; supersession just clears the slot.
    assert!(!slots.is_live(ProcessRole::Run));
    assert!(slots.supersede(ProcessRole::Run).is_some());
    assert!(slots.supersede(ProcessRole::Run).is_none());

    Ok(())
}

#[tokio::test]
async fn roles_are_tracked_independently() -> TestResult {
    let mut slots = ProcessSlots::new();

    slots.track(ProcessRole::Build, spawn_detached("sleep 5")?);
    slots.track(ProcessRole::Run, spawn_detached("sleep 5")?);

    assert!(slots.is_live(ProcessRole::Build));
    assert!(slots.is_live(ProcessRole::Run));
    assert_ne!(
        slots.current_pid(ProcessRole::Build),
        slots.current_pid(ProcessRole::Run)
    );

    let mut build = slots.supersede(ProcessRole::Build).expect("build handle");
    build.wait().await?;

    // Superseding one role leaves the other untouched.
    assert!(!slots.is_live(ProcessRole::Build));
    assert!(slots.is_live(ProcessRole::Run));

    let mut run = slots.supersede(ProcessRole::Run).expect("run handle");
    run.wait().await?;
    Ok(())
}
