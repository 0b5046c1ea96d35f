//! Typed mutations recorded during simulation and applied on commit.
use std::fmt;
use std::path::PathBuf;

use crate::error::DotError;
use crate::resources::symlink::SymlinkResource;
use crate::resources::template::{Environment, TemplateResource};

/// A filesystem mutation the commit pass performs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Render a template into its sibling file.
    RenderFile {
        /// The template.
        source: PathBuf,
        /// The rendered file.
        destination: PathBuf,
    },
    /// Create `target` as a symlink to `destination`.
    CreateLink {
        /// Where the link is created.
        target: PathBuf,
        /// What it points to.
        destination: PathBuf,
    },
    /// Remove the symlink at `target`.
    RemoveLink {
        /// The link to remove.
        target: PathBuf,
        /// What it currently points to.
        destination: PathBuf,
    },
}

impl Action {
    /// Perform the mutation.
    ///
    /// # Errors
    ///
    /// Any I/O failure is returned as-is; the commit pass does not retry.
    pub fn apply(&self, env: &Environment) -> Result<(), DotError> {
        match self {
            Self::RenderFile {
                source,
                destination,
            } => TemplateResource::new(source.clone(), destination.clone(), env).write()?,
            Self::CreateLink {
                target,
                destination,
            } => SymlinkResource::new(destination.clone(), target.clone()).create()?,
            Self::RemoveLink {
                target,
                destination,
            } => SymlinkResource::new(destination.clone(), target.clone()).remove()?,
        }
        Ok(())
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RenderFile {
                source,
                destination,
            } => write!(f, "render {} -> {}", source.display(), destination.display()),
            Self::CreateLink {
                target,
                destination,
            } => write!(f, "link {} -> {}", target.display(), destination.display()),
            Self::RemoveLink { target, .. } => write!(f, "unlink {}", target.display()),
        }
    }
}
