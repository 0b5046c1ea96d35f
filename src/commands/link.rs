//! Link command implementation.
use anyhow::Result;

use crate::cli::{GlobalOpts, ProfileOpts};
use crate::engine::Command;
use crate::engine::driver::Outcome;
use crate::logging::Logger;
use crate::resources::template::Environment;

/// Run the link command against the process environment.
///
/// # Errors
///
/// Returns an error if settings cannot be loaded, a template cannot be read
/// or a file or link cannot be written.
pub fn run(global: &GlobalOpts, opts: &ProfileOpts, log: &Logger) -> Result<Outcome> {
    super::run_profile_command(
        Command::Link,
        global,
        opts,
        &Environment::from_process(),
        log,
    )
}
