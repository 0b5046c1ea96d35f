//! `dot` binary entry point.
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

use dot_cli::cli::{Cli, Command};
use dot_cli::commands;
use dot_cli::config::env_flag;
use dot_cli::engine;
use dot_cli::logging::{Logger, console_level, init_subscriber};

fn main() -> Result<ExitCode> {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = Cli::parse();

    let (command, opts) = match &args.command {
        Command::Link(opts) => (engine::Command::Link, opts),
        Command::Unlink(opts) => (engine::Command::Unlink, opts),
        Command::Version => {
            commands::version::run();
            return Ok(ExitCode::SUCCESS);
        }
    };

    let name = command.to_string();
    init_subscriber(
        console_level(args.verbose, opts.dry_run(), env_flag("DOT_DEBUG")),
        &name,
    );
    let log = Logger::new(&name);

    let outcome = match command {
        engine::Command::Link => commands::link::run(&args.global, opts, &log)?,
        engine::Command::Unlink => commands::unlink::run(&args.global, opts, &log)?,
    };
    Ok(ExitCode::from(outcome.exit_code()))
}
