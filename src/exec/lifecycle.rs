// src/exec/lifecycle.rs

use tokio::process::Child;
use tracing::{debug, warn};

/// Role of a tracked process. Each role holds at most one live handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessRole {
    Build,
    Run,
}

/// Tracks the single in-flight build process and the single in-flight run
/// process.
///
/// Supersession is best-effort and non-blocking: the previous process gets a
/// termination request but is never awaited, so a new process can start
/// while the old one is still dying. Callers that need confirmation can
/// await the returned superseded handle themselves.
#[derive(Debug, Default)]
pub struct ProcessSlots {
    build: Option<Child>,
    run: Option<Child>,
}

impl ProcessSlots {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request termination of the current process in `role` (if any, and if
    /// still running) and clear the slot.
    ///
    /// Returns the superseded handle so the caller may observe its death;
    /// the manager itself does not wait for exit confirmation. Failure to
    /// deliver the kill is logged, not reported.
    pub fn supersede(&mut self, role: ProcessRole) -> Option<Child> {
        let slot = self.slot_mut(role);
        let mut previous = slot.take()?;

        match previous.try_wait() {
            Ok(Some(status)) => {
                debug!(?role, %status, "previous process already exited");
            }
            Ok(None) => {
                debug!(?role, pid = ?previous.id(), "superseding live process");
                if let Err(err) = previous.start_kill() {
                    warn!(?role, error = %err, "failed to signal superseded process");
                }
            }
            Err(err) => {
                warn!(?role, error = %err, "cannot query superseded process state");
            }
        }

        Some(previous)
    }

    /// Record a freshly launched process as current for `role`.
    pub fn track(&mut self, role: ProcessRole, child: Child) {
        debug!(?role, pid = ?child.id(), "tracking new process");
        *self.slot_mut(role) = Some(child);
    }

    /// OS pid of the current process in `role`, if one is tracked and has
    /// not been reaped.
    pub fn current_pid(&self, role: ProcessRole) -> Option<u32> {
        self.slot(role).as_ref().and_then(|child| child.id())
    }

    /// True if a process is tracked in `role` and has not exited yet.
    pub fn is_live(&mut self, role: ProcessRole) -> bool {
        match self.slot_mut(role) {
            Some(child) => matches!(child.try_wait(), Ok(None)),
            None => false,
        }
    }

    fn slot(&self, role: ProcessRole) -> &Option<Child> {
        match role {
            ProcessRole::Build => &self.build,
            ProcessRole::Run => &self.run,
        }
    }

    fn slot_mut(&mut self, role: ProcessRole) -> &mut Option<Child> {
        match role {
            ProcessRole::Build => &mut self.build,
            ProcessRole::Run => &mut self.run,
        }
    }
}
