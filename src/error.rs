//! Domain-specific error types for the dotfile linker.
//!
//! Internal modules return typed errors (e.g. [`RenderError`], [`LinkError`])
//! while command handlers at the CLI boundary convert them to
//! [`anyhow::Error`] via the standard `?` operator.
//!
//! Conflicts are *not* errors: they are recorded as warning findings in a
//! [`Report`](crate::engine::report::Report) and abort the invocation before
//! anything is mutated. The types below only describe failures the engine
//! cannot recover from.
//!
//! # Error hierarchy
//!
//! ```text
//! DotError
//! ├── Config(ConfigError) — settings file loading and validation
//! ├── Render(RenderError) — reading templates, writing rendered files
//! ├── Link(LinkError)     — inspecting, creating and removing symlinks
//! ├── ReadDir             — listing a profile directory
//! └── Walk                — recursive template discovery
//! ```

use thiserror::Error;

/// Top-level error type for the engine.
#[derive(Error, Debug)]
pub enum DotError {
    /// Settings file could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A template could not be rendered.
    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    /// A symlink could not be inspected or changed.
    #[error("Link error: {0}")]
    Link(#[from] LinkError),

    /// A profile directory exists but cannot be listed.
    #[error("cannot read directory {path}: {source}")]
    ReadDir {
        /// Directory that could not be listed.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Recursive template discovery failed.
    #[error("cannot walk template directory: {0}")]
    Walk(#[from] walkdir::Error),
}

/// Errors that arise from loading the settings file.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The settings file could not be read.
    #[error("IO error reading config file {path}: {source}")]
    Io {
        /// Path to the file that could not be read.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The settings file is not valid TOML or has unknown keys.
    #[error("Invalid TOML in {path}: {message}")]
    InvalidSyntax {
        /// Path to the offending file.
        path: String,
        /// Parser message.
        message: String,
    },

    /// A key holds a value outside its accepted range.
    #[error("Invalid value for '{key}': {message}")]
    InvalidValue {
        /// Offending key.
        key: String,
        /// Why the value was rejected.
        message: String,
    },
}

/// Errors that arise while rendering a template.
#[derive(Error, Debug)]
pub enum RenderError {
    /// The template source could not be read.
    #[error("cannot read template {path}: {source}")]
    Read {
        /// Template path.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The rendered file could not be written.
    #[error("cannot write rendered file {path}: {source}")]
    Write {
        /// Destination path.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

/// Errors that arise from symlink operations.
#[derive(Error, Debug)]
pub enum LinkError {
    /// The target path could not be inspected.
    #[error("cannot inspect {path}: {source}")]
    Inspect {
        /// Path being inspected.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The symlink could not be created.
    #[error("cannot link {target} -> {destination}: {source}")]
    Create {
        /// Where the link was to be created.
        target: String,
        /// What the link was to point to.
        destination: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The symlink could not be removed.
    #[error("cannot remove link {target}: {source}")]
    Remove {
        /// Link that could not be removed.
        target: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}
