//! Dotfile linker.
//!
//! Links every entry of one or more profile directories into a home
//! directory as a hidden symlink (`profile/bashrc` becomes `~/.bashrc`).
//! Files ending in `.template` are first rendered with environment variable
//! substitution and the link points at the rendered copy.
//!
//! Each invocation plans everything before touching the filesystem. A single
//! conflict (a foreign file or link where one would be created) aborts the
//! whole run with nothing changed.
//!
//! The public API is organised into layers:
//!
//! - **[`resources`]**: template rendering and symlink inspection, creation and removal
//! - **[`engine`]**: name transform, planner and execution driver
//! - **[`config`]**: optional `config.toml` settings
//! - **[`commands`]**: `link` and `unlink` orchestration
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod engine;
pub mod error;
pub mod logging;
pub mod resources;
