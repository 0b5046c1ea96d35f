//! Command-line interface definition.
use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

/// Top-level CLI entry point.
#[derive(Parser, Debug)]
#[command(
    name = "dot",
    about = "Link dotfiles from profile directories into your home",
    version
)]
pub struct Cli {
    #[allow(missing_docs)]
    #[command(subcommand)]
    pub command: Command,

    /// Increase console output (-v: actions, -vv: everything)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[allow(missing_docs)]
    #[command(flatten)]
    pub global: GlobalOpts,
}

/// Options shared across all subcommands.
#[derive(Parser, Debug, Clone)]
pub struct GlobalOpts {
    /// Settings file (default: $XDG_CONFIG_HOME/dot/config.toml)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Render templates and link profile entries into home
    Link(ProfileOpts),
    /// Remove links that point into the profiles
    Unlink(ProfileOpts),
    /// Print version information
    Version,
}

/// Options for `link` and `unlink`.
#[derive(Parser, Debug, Clone)]
pub struct ProfileOpts {
    /// Profile directories, processed in order
    #[arg(required = true, value_name = "PROFILES")]
    pub profiles: Vec<PathBuf>,

    /// Directory to create links in (default: ~)
    #[arg(long, value_name = "DIR")]
    pub home: Option<PathBuf>,

    /// Render nested templates up to this depth below each profile
    #[arg(short, long, value_name = "DEPTH", value_parser = parse_depth)]
    pub recursive: Option<usize>,

    /// Preview changes without applying
    #[arg(short = 'd', long, overrides_with = "no_dry_run")]
    dry_run: bool,

    /// Apply changes (cancels an earlier --dry-run)
    #[arg(long, overrides_with = "dry_run")]
    no_dry_run: bool,
}

impl ProfileOpts {
    /// Whether this run only previews changes.
    #[must_use]
    pub const fn dry_run(&self) -> bool {
        self.dry_run && !self.no_dry_run
    }
}

fn parse_depth(s: &str) -> Result<usize, String> {
    match s.parse::<usize>() {
        Ok(0) => Err("depth must be at least 1".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(e.to_string()),
    }
}
