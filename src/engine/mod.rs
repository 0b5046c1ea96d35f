//! Planning and execution of `link` and `unlink`.
//!
//! An invocation runs in two passes over the same candidate set. The
//! [`plan`] pass classifies every candidate and records a
//! [`Report`](report::Report) plus the [`Action`](action::Action)s it would
//! take. The [`driver`] only interprets those actions when the report holds
//! no conflict and the run is not a dry run.
pub mod action;
pub mod driver;
pub mod names;
pub mod plan;
pub mod report;

use std::fmt;
use std::path::PathBuf;

use serde::Deserialize;

/// The operation requested on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Render templates and create links.
    Link,
    /// Remove links that point into the profiles.
    Unlink,
}

impl Command {
    /// The ordered stages run for every candidate.
    ///
    /// ```
    /// use dot_cli::engine::{Command, Stage};
    ///
    /// assert_eq!(Command::Unlink.stages(), &[Stage::Unlink]);
    /// ```
    #[must_use]
    pub const fn stages(self) -> &'static [Stage] {
        match self {
            Self::Link => &[Stage::RecursiveRender, Stage::Render, Stage::Link],
            Self::Unlink => &[Stage::Unlink],
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Link => f.write_str("link"),
            Self::Unlink => f.write_str("unlink"),
        }
    }
}

/// One per-candidate step of a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Render and link templates nested inside a directory candidate.
    RecursiveRender,
    /// Produce the rendered artifact.
    Render,
    /// Create the target link.
    Link,
    /// Remove the target link.
    Unlink,
}

/// How `unlink` treats a target path where nothing exists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingPolicy {
    /// Count it as a conflict.
    #[default]
    Conflict,
    /// Report it and carry on.
    Ignore,
}

/// Everything a single invocation needs to know.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// Operation to run.
    pub command: Command,
    /// Directory the links are created in.
    pub home: PathBuf,
    /// Profile directories, processed in order.
    pub profiles: Vec<PathBuf>,
    /// Maximum profile-relative depth searched for nested templates.
    /// `1` disables the nested pass.
    pub recursion: usize,
    /// Policy for unlinking a target that does not exist.
    pub unlink_missing: MissingPolicy,
    /// Report only, never mutate.
    pub dry_run: bool,
}

impl Request {
    /// A request with default recursion, policy and no dry run.
    #[must_use]
    pub const fn new(command: Command, home: PathBuf, profiles: Vec<PathBuf>) -> Self {
        Self {
            command,
            home,
            profiles,
            recursion: 1,
            unlink_missing: MissingPolicy::Conflict,
            dry_run: false,
        }
    }
}
