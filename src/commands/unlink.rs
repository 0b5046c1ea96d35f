//! Unlink command implementation.
use anyhow::Result;

use crate::cli::{GlobalOpts, ProfileOpts};
use crate::engine::Command;
use crate::engine::driver::Outcome;
use crate::logging::Logger;
use crate::resources::template::Environment;

/// Run the unlink command.
///
/// # Errors
///
/// Returns an error if settings cannot be loaded or a link cannot be
/// inspected or removed.
pub fn run(global: &GlobalOpts, opts: &ProfileOpts, log: &Logger) -> Result<Outcome> {
    super::run_profile_command(
        Command::Unlink,
        global,
        opts,
        &Environment::from_process(),
        log,
    )
}
