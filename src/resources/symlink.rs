//! Symlink resource: the per-entry link state machine.
use std::path::{Path, PathBuf};

use super::helpers::fs::{resolve, resolve_link_target};
use crate::error::LinkError;

/// State of a target path relative to the link it should hold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkState {
    /// Nothing exists at the target path.
    Missing,
    /// Something that is not a symlink occupies the target path.
    NotALink,
    /// A symlink exists but resolves somewhere else.
    Elsewhere {
        /// Resolved destination of the existing link.
        current: PathBuf,
    },
    /// The symlink resolves to the expected destination.
    Correct,
}

/// A symlink at `target` pointing to `destination`.
#[derive(Debug, Clone)]
pub struct SymlinkResource {
    /// What the symlink points to (the rendered path of a candidate).
    pub destination: PathBuf,
    /// Where the symlink lives.
    pub target: PathBuf,
}

impl SymlinkResource {
    /// Create a new symlink resource.
    #[must_use]
    pub const fn new(destination: PathBuf, target: PathBuf) -> Self {
        Self {
            destination,
            target,
        }
    }

    /// Classify the target path.
    ///
    /// A live link is compared by what the operating system resolves it to.
    /// A dangling symlink still counts as an existing link; its recorded
    /// target is resolved against the link's directory and compared.
    ///
    /// # Errors
    ///
    /// Returns [`LinkError::Inspect`] if the target's metadata or link
    /// contents cannot be read for a reason other than absence.
    pub fn current_state(&self) -> Result<LinkState, LinkError> {
        let meta = match std::fs::symlink_metadata(&self.target) {
            Ok(meta) => meta,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(LinkState::Missing),
            Err(source) => {
                return Err(LinkError::Inspect {
                    path: self.target.display().to_string(),
                    source,
                });
            }
        };
        if !meta.file_type().is_symlink() {
            return Ok(LinkState::NotALink);
        }

        let raw = std::fs::read_link(&self.target).map_err(|source| LinkError::Inspect {
            path: self.target.display().to_string(),
            source,
        })?;
        let current = dunce::canonicalize(&self.target)
            .unwrap_or_else(|_| resolve_link_target(&self.target, &raw));
        if current == resolve(&self.destination) {
            Ok(LinkState::Correct)
        } else {
            Ok(LinkState::Elsewhere { current })
        }
    }

    /// Create the symlink.
    ///
    /// # Errors
    ///
    /// Returns [`LinkError::Create`] if the link cannot be created, including
    /// when something already occupies the target path.
    pub fn create(&self) -> Result<(), LinkError> {
        create_symlink(&self.destination, &self.target).map_err(|source| LinkError::Create {
            target: self.target.display().to_string(),
            destination: self.destination.display().to_string(),
            source,
        })
    }

    /// Remove the symlink, leaving whatever it points to in place.
    ///
    /// # Errors
    ///
    /// Returns [`LinkError::Remove`] if the link cannot be removed.
    pub fn remove(&self) -> Result<(), LinkError> {
        remove_symlink(&self.target).map_err(|source| LinkError::Remove {
            target: self.target.display().to_string(),
            source,
        })
    }
}

/// Create a symlink at `link` pointing to `destination`.
fn create_symlink(destination: &Path, link: &Path) -> std::io::Result<()> {
    #[cfg(unix)]
    {
        std::os::unix::fs::symlink(destination, link)
    }

    #[cfg(windows)]
    {
        if destination.is_dir() {
            std::os::windows::fs::symlink_dir(destination, link)
        } else {
            std::os::windows::fs::symlink_file(destination, link)
        }
    }
}

/// Remove a symlink, handling platform differences.
///
/// On Windows, directory symlinks must be removed with `remove_dir` (not
/// `remove_file`), so the raw `FILE_ATTRIBUTE_DIRECTORY` flag is checked.
fn remove_symlink(path: &Path) -> std::io::Result<()> {
    let meta = std::fs::symlink_metadata(path)?;
    if is_dir_like(&meta) {
        std::fs::remove_dir(path)
    } else {
        std::fs::remove_file(path)
    }
}

/// Check if metadata represents a directory-like entry.
fn is_dir_like(meta: &std::fs::Metadata) -> bool {
    #[cfg(windows)]
    {
        use std::os::windows::fs::MetadataExt;
        meta.file_attributes() & 0x10 != 0 // FILE_ATTRIBUTE_DIRECTORY
    }
    #[cfg(not(windows))]
    {
        meta.is_dir()
    }
}
