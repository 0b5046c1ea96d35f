//! Top-level subcommand orchestration.
pub mod link;
pub mod unlink;
pub mod version;

use std::path::PathBuf;

use anyhow::{Context as _, Result};

use crate::cli::{GlobalOpts, ProfileOpts};
use crate::config::Settings;
use crate::engine::driver::{self, Outcome};
use crate::engine::{Command, Request};
use crate::logging::Logger;
use crate::resources::template::Environment;

/// Merge command-line options over the settings file into a [`Request`].
///
/// # Errors
///
/// Returns an error if the settings file cannot be loaded.
pub fn build_request(command: Command, global: &GlobalOpts, opts: &ProfileOpts) -> Result<Request> {
    let settings = Settings::load(global.config.as_deref()).context("failed to load settings")?;
    Ok(Request {
        command,
        home: opts
            .home
            .clone()
            .or(settings.home)
            .unwrap_or_else(|| PathBuf::from("~")),
        profiles: opts.profiles.clone(),
        recursion: opts.recursive.or(settings.recursive).unwrap_or(1),
        unlink_missing: settings.unlink_missing,
        dry_run: opts.dry_run(),
    })
}

/// Run `link` or `unlink` with an explicit template environment.
///
/// # Errors
///
/// Returns an error if settings cannot be loaded or a filesystem operation
/// fails. Conflicts are not errors; they yield [`Outcome::Aborted`].
pub fn run_profile_command(
    command: Command,
    global: &GlobalOpts,
    opts: &ProfileOpts,
    env: &Environment,
    log: &Logger,
) -> Result<Outcome> {
    let request = build_request(command, global, opts)?;
    log.stage(&format!(
        "{command}: {} profile(s) into {}",
        request.profiles.len(),
        request.home.display()
    ));
    log.debug(&format!(
        "recursion {}, dry run {}, {} environment variable(s)",
        request.recursion,
        request.dry_run,
        env.len()
    ));

    let outcome =
        driver::execute(&request, env, log).with_context(|| format!("{command} failed"))?;
    log.print_summary(&outcome);
    Ok(outcome)
}
