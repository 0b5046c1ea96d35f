//! Execution driver: simulate, gate on conflicts, then commit.
use super::action::Action;
use super::plan::plan;
use super::Request;
use crate::error::DotError;
use crate::logging::Logger;
use crate::resources::template::Environment;

/// Message logged when the conflict gate stops an invocation.
pub const CONFLICTS_MESSAGE: &str = "There were conflicts. Exiting without changing dotfiles.";

/// How an invocation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Conflicts were found; nothing was changed.
    Aborted {
        /// Number of conflicts.
        conflicts: usize,
    },
    /// Dry run without conflicts; nothing was changed.
    Previewed {
        /// Number of actions that would have been performed.
        planned: usize,
    },
    /// Every planned action was performed.
    Committed {
        /// Number of actions that changed the filesystem.
        applied: usize,
    },
}

impl Outcome {
    /// Process exit status for this outcome.
    #[must_use]
    pub const fn exit_code(self) -> u8 {
        match self {
            Self::Aborted { .. } => 1,
            Self::Previewed { .. } | Self::Committed { .. } => 0,
        }
    }

    /// Whether the invocation succeeded.
    #[must_use]
    pub const fn is_success(self) -> bool {
        self.exit_code() == 0
    }
}

/// Run `request`: plan everything, then commit only if the plan is clean.
///
/// # Errors
///
/// Returns an error on fatal I/O failures during planning or commit. A
/// failure during commit may leave earlier actions applied.
pub fn execute(request: &Request, env: &Environment, log: &Logger) -> Result<Outcome, DotError> {
    let plan = plan(request, env)?;
    for finding in &plan.report {
        log.emit(finding, request.dry_run);
    }

    let conflicts = plan.report.conflicts();
    if conflicts > 0 {
        log.error(CONFLICTS_MESSAGE);
        return Ok(Outcome::Aborted { conflicts });
    }
    if request.dry_run {
        return Ok(Outcome::Previewed {
            planned: plan.actions.len(),
        });
    }

    let applied = commit(&plan.actions, env, log)?;
    Ok(Outcome::Committed { applied })
}

/// Perform `actions` in order, stopping at the first failure.
fn commit(actions: &[Action], env: &Environment, log: &Logger) -> Result<usize, DotError> {
    for action in actions {
        action.apply(env)?;
        log.debug(&format!("applied: {action}"));
    }
    Ok(actions.len())
}
