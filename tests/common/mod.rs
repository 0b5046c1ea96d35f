// Shared helpers for integration tests.
//
// Provides a temporary home and profile layout and a fluent builder so each
// integration test can set up an isolated environment without repeating
// filesystem boilerplate.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::path::{Path, PathBuf};

use clap::Parser;

use dot_cli::cli::{Cli, Command, ProfileOpts};
use dot_cli::commands::run_profile_command;
use dot_cli::engine;
use dot_cli::engine::driver::Outcome;
use dot_cli::logging::Logger;
use dot_cli::resources::template::Environment;

/// An isolated `home/` and `profile/` pair backed by a [`tempfile::TempDir`].
///
/// Paths are canonicalized so assertions can compare them with link targets
/// on platforms where the temp dir lives behind a symlink.
pub struct IntegrationTestContext {
    _dir: tempfile::TempDir,
    /// Canonical temp directory.
    pub root: PathBuf,
    /// Environment handed to the template renderer.
    pub env: Environment,
}

impl IntegrationTestContext {
    /// Directory links are created in.
    pub fn home(&self) -> PathBuf {
        self.root.join("home")
    }

    /// The default profile.
    pub fn profile(&self) -> PathBuf {
        self.root.join("profile")
    }

    /// Settings file passed through `--config`.
    pub fn config_path(&self) -> PathBuf {
        self.root.join("config.toml")
    }

    /// Run `dot <args>` against this context and return the outcome.
    ///
    /// `--home`, `--config` and the default profile are appended, so `args`
    /// only carries the subcommand and flags.
    pub fn run(&self, args: &[&str]) -> anyhow::Result<Outcome> {
        let home = self.home();
        let config = self.config_path();
        let profile = self.profile();
        let mut argv: Vec<&str> = vec!["dot"];
        argv.extend_from_slice(args);
        argv.extend([
            "--home",
            home.to_str().expect("utf-8 path"),
            "--config",
            config.to_str().expect("utf-8 path"),
            profile.to_str().expect("utf-8 path"),
        ]);
        self.run_argv(&argv)
    }

    /// Run a full argument vector, without any implicit arguments.
    pub fn run_argv(&self, argv: &[&str]) -> anyhow::Result<Outcome> {
        let cli = Cli::try_parse_from(argv)?;
        let (command, opts) = split(cli.command);
        run_profile_command(command, &cli.global, &opts, &self.env, &Logger::default())
    }

    /// Run and require success.
    pub fn link(&self, flags: &[&str]) -> Outcome {
        let mut args = vec!["link"];
        args.extend_from_slice(flags);
        self.run(&args).expect("link should not fail")
    }

    /// Run unlink and require success.
    pub fn unlink(&self, flags: &[&str]) -> Outcome {
        let mut args = vec!["unlink"];
        args.extend_from_slice(flags);
        self.run(&args).expect("unlink should not fail")
    }

    /// Sorted names of the entries in `home/`.
    pub fn home_entries(&self) -> Vec<String> {
        list(&self.home())
    }

    /// Sorted names of the entries in `dir`, relative to the profile.
    pub fn profile_entries(&self, rel: &str) -> Vec<String> {
        list(&self.profile().join(rel))
    }

    /// The raw target of the link at `path`.
    pub fn link_target(&self, path: &Path) -> PathBuf {
        std::fs::read_link(path).expect("path should be a symlink")
    }

    /// Whether anything, including a dangling link, exists at `path`.
    pub fn exists(&self, path: &Path) -> bool {
        path.symlink_metadata().is_ok()
    }
}

fn split(command: Command) -> (engine::Command, ProfileOpts) {
    match command {
        Command::Link(opts) => Some((engine::Command::Link, opts)),
        Command::Unlink(opts) => Some((engine::Command::Unlink, opts)),
        Command::Version => None,
    }
    .expect("link or unlink")
}

fn list(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .expect("read dir")
        .map(|e| e.expect("dir entry").file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

/// Fluent builder for [`IntegrationTestContext`].
pub struct TestContextBuilder {
    ctx: IntegrationTestContext,
    vars: Vec<(String, String)>,
}

impl TestContextBuilder {
    /// Begin with an empty `home/`, an empty `profile/` and no settings.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let root = dunce::canonicalize(dir.path()).expect("canonicalize temp dir");
        std::fs::create_dir(root.join("home")).expect("create home");
        std::fs::create_dir(root.join("profile")).expect("create profile");
        std::fs::write(root.join("config.toml"), "").expect("write config");
        Self {
            ctx: IntegrationTestContext {
                _dir: dir,
                root,
                env: Environment::default(),
            },
            vars: Vec::new(),
        }
    }

    /// Write `content` to `profile/<rel>`, creating parent directories.
    pub fn with_file(self, rel: &str, content: &str) -> Self {
        let path = self.ctx.profile().join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create parent dir");
        }
        std::fs::write(&path, content).expect("write profile file");
        self
    }

    /// Create an empty directory `profile/<rel>`.
    pub fn with_dir(self, rel: &str) -> Self {
        std::fs::create_dir_all(self.ctx.profile().join(rel)).expect("create profile dir");
        self
    }

    /// Write `content` to `home/<rel>`.
    pub fn with_home_file(self, rel: &str, content: &str) -> Self {
        std::fs::write(self.ctx.home().join(rel), content).expect("write home file");
        self
    }

    /// Overwrite the settings file.
    pub fn with_settings(self, content: &str) -> Self {
        std::fs::write(self.ctx.config_path(), content).expect("write settings");
        self
    }

    /// Set a template variable.
    pub fn with_var(mut self, key: &str, value: &str) -> Self {
        self.vars.push((key.to_string(), value.to_string()));
        self
    }

    /// Finish building and return the configured context.
    pub fn build(mut self) -> IntegrationTestContext {
        self.ctx.env = self.vars.into_iter().collect();
        self.ctx
    }
}
