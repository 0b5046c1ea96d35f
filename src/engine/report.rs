//! Structured findings produced by a planning pass.
use std::path::{Path, PathBuf};

/// Severity of a finding. Only [`Level::Warn`] counts as a conflict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    /// Narration of skipped entries.
    Debug,
    /// What was (or would be) done.
    Info,
    /// A conflict that blocks the whole invocation.
    Warn,
}

/// What a finding is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FindingKind {
    /// Hidden entry or rendered artifact skipped.
    Ignored,
    /// A rendered file is (or would be) written.
    Rendered,
    /// A link is (or would be) created.
    Linked,
    /// The link already points where it should.
    AlreadyLinked,
    /// A link is (or would be) removed.
    Unlinked,
    /// Something that is not a symlink occupies the target path.
    NotALink,
    /// The target is a symlink to somewhere else.
    PointsElsewhere,
    /// Nothing exists at the target path of an unlink.
    MissingTarget,
    /// Two candidates map to the same target path.
    DuplicateTarget,
    /// The home directory does not exist.
    MissingHome,
    /// A profile directory does not exist.
    MissingProfile,
}

impl FindingKind {
    /// Whether the finding announces a filesystem mutation.
    #[must_use]
    pub const fn is_change(self) -> bool {
        matches!(self, Self::Rendered | Self::Linked | Self::Unlinked)
    }
}

/// One diagnostic emitted while planning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    /// Severity.
    pub level: Level,
    /// Classification.
    pub kind: FindingKind,
    /// The path the finding is about.
    pub path: PathBuf,
    /// Human-readable message.
    pub message: String,
}

impl Finding {
    /// Create a finding.
    #[must_use]
    pub fn new(level: Level, kind: FindingKind, path: &Path, message: String) -> Self {
        Self {
            level,
            kind,
            path: path.to_path_buf(),
            message,
        }
    }

    /// Whether this finding is a conflict.
    #[must_use]
    pub fn is_conflict(&self) -> bool {
        self.level == Level::Warn
    }
}

/// Ordered findings of one pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    findings: Vec<Finding>,
}

impl Report {
    /// Create an empty report.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            findings: Vec::new(),
        }
    }

    /// Append a finding.
    pub fn push(&mut self, finding: Finding) {
        self.findings.push(finding);
    }

    /// Record a debug-level finding.
    pub fn debug(&mut self, kind: FindingKind, path: &Path, message: String) {
        self.push(Finding::new(Level::Debug, kind, path, message));
    }

    /// Record an info-level finding.
    pub fn info(&mut self, kind: FindingKind, path: &Path, message: String) {
        self.push(Finding::new(Level::Info, kind, path, message));
    }

    /// Record a conflict.
    pub fn warn(&mut self, kind: FindingKind, path: &Path, message: String) {
        self.push(Finding::new(Level::Warn, kind, path, message));
    }

    /// Number of conflicts recorded.
    #[must_use]
    pub fn conflicts(&self) -> usize {
        self.findings.iter().filter(|f| f.is_conflict()).count()
    }

    /// Whether no conflict was recorded.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.conflicts() == 0
    }

    /// Iterate over findings in the order they were recorded.
    pub fn iter(&self) -> std::slice::Iter<'_, Finding> {
        self.findings.iter()
    }

    /// Number of findings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.findings.len()
    }

    /// Whether the report holds no findings at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.findings.is_empty()
    }
}

impl<'a> IntoIterator for &'a Report {
    type Item = &'a Finding;
    type IntoIter = std::slice::Iter<'a, Finding>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
