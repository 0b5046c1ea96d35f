//! Name transform: derives the rendered and target paths of a candidate.
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::resources::template::{RENDERED_SUFFIX, TEMPLATE_SUFFIX};

/// A profile entry being linked or unlinked, with its derived paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// The entry inside the profile.
    pub source: PathBuf,
    /// What the target link points to: the rendered sibling of a template,
    /// otherwise the source itself.
    pub rendered: PathBuf,
    /// Where the link lives.
    pub target: PathBuf,
    /// Whether the source is a directory (directories are never rendered).
    pub is_dir: bool,
}

impl Candidate {
    /// Derive the paths of an entry found directly under a profile.
    ///
    /// The target is always `home/.<name>`, with a trailing `.template`
    /// stripped from file names.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::path::{Path, PathBuf};
    /// use dot_cli::engine::names::Candidate;
    ///
    /// let c = Candidate::top_level(Path::new("/home/ada"), PathBuf::from("/p/env.template"), false);
    /// assert_eq!(c.rendered, PathBuf::from("/p/env.rendered"));
    /// assert_eq!(c.target, PathBuf::from("/home/ada/.env"));
    /// ```
    #[must_use]
    pub fn top_level(home: &Path, source: PathBuf, is_dir: bool) -> Self {
        let name = source.file_name().map(OsString::from).unwrap_or_default();
        let template_stem = if is_dir {
            None
        } else {
            name.to_str().and_then(strip_template_suffix)
        };

        let (rendered, target) = template_stem.map_or_else(
            || (source.clone(), home.join(hidden(name.clone()))),
            |stem| {
                (
                    source.with_file_name(format!("{stem}{RENDERED_SUFFIX}")),
                    home.join(hidden(OsString::from(stem))),
                )
            },
        );

        Self {
            source,
            rendered,
            target,
            is_dir,
        }
    }

    /// Derive the paths of a template nested inside a linked directory.
    ///
    /// Both the rendered file and the link are siblings of the template:
    /// `dir/env.template` renders to `dir/env.rendered` and is linked from
    /// `dir/env`. Returns `None` if `source` is not a template file name.
    #[must_use]
    pub fn nested(source: PathBuf) -> Option<Self> {
        let stem = source
            .file_name()
            .and_then(|n| n.to_str())
            .and_then(strip_template_suffix)?
            .to_string();
        Some(Self {
            rendered: source.with_file_name(format!("{stem}{RENDERED_SUFFIX}")),
            target: source.with_file_name(stem),
            source,
            is_dir: false,
        })
    }

    /// Whether a rendered artifact distinct from the source is produced.
    #[must_use]
    pub fn is_template(&self) -> bool {
        self.source != self.rendered
    }
}

/// Strip a trailing `.template`, anchored at the end of the name.
///
/// Returns `None` when the name does not end in the suffix or nothing would
/// remain.
#[must_use]
pub fn strip_template_suffix(name: &str) -> Option<&str> {
    name.strip_suffix(TEMPLATE_SUFFIX).filter(|stem| !stem.is_empty())
}

/// Whether a profile entry is skipped entirely.
///
/// Hidden entries are never processed; regular files carrying the rendered
/// suffix are artifacts of a previous run, not sources.
#[must_use]
pub fn is_ignored(name: &str, is_dir: bool) -> bool {
    name.starts_with('.') || (!is_dir && name.ends_with(RENDERED_SUFFIX))
}

fn hidden(name: OsString) -> OsString {
    let mut dotted = OsString::from(".");
    dotted.push(name);
    dotted
}
