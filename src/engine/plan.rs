//! Batch planner: walks every profile and classifies every candidate.
//!
//! Planning never mutates the filesystem. It reads directories, link
//! targets and template sources, records a [`Finding`](super::report::Finding)
//! per decision and queues an [`Action`] for every change the commit pass
//! would make.
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use super::action::Action;
use super::names::{Candidate, is_ignored};
use super::report::{Finding, FindingKind, Level, Report};
use super::{MissingPolicy, Request, Stage};
use crate::error::DotError;
use crate::resources::helpers::fs::resolve_user_path;
use crate::resources::symlink::{LinkState, SymlinkResource};
use crate::resources::template::{Environment, TemplateResource};

/// Outcome of a planning pass.
#[derive(Debug, Clone, Default)]
pub struct Plan {
    /// Every finding, in enumeration order.
    pub report: Report,
    /// Mutations to perform on commit, in enumeration order.
    pub actions: Vec<Action>,
}

/// Plan `request` without touching the filesystem.
///
/// A missing home directory records one conflict and stops; a missing
/// profile records one conflict and moves on to the next profile.
///
/// # Errors
///
/// Returns an error if an existing profile cannot be listed, a template
/// cannot be read, or a target path cannot be inspected.
pub fn plan(request: &Request, env: &Environment) -> Result<Plan, DotError> {
    let mut planner = Planner::new(request, env);
    planner.run()?;
    Ok(planner.finish())
}

/// A direct child of a profile directory.
#[derive(Debug)]
struct Entry {
    name: String,
    path: PathBuf,
    is_dir: bool,
}

struct Planner<'a> {
    request: &'a Request,
    env: &'a Environment,
    report: Report,
    actions: Vec<Action>,
    /// Targets already linked in this plan, and what they point to.
    claimed: HashMap<PathBuf, PathBuf>,
    /// Targets already scheduled for removal in this plan.
    released: HashSet<PathBuf>,
}

impl<'a> Planner<'a> {
    fn new(request: &'a Request, env: &'a Environment) -> Self {
        Self {
            request,
            env,
            report: Report::new(),
            actions: Vec::new(),
            claimed: HashMap::new(),
            released: HashSet::new(),
        }
    }

    fn finish(self) -> Plan {
        Plan {
            report: self.report,
            actions: self.actions,
        }
    }

    fn run(&mut self) -> Result<(), DotError> {
        let home = resolve_user_path(&self.request.home);
        if !home.is_dir() {
            self.report.warn(
                FindingKind::MissingHome,
                &home,
                format!("Folder {} does not exist", home.display()),
            );
            return Ok(());
        }

        for profile in &self.request.profiles {
            let profile = resolve_user_path(profile);
            if !profile.is_dir() {
                self.report.warn(
                    FindingKind::MissingProfile,
                    &profile,
                    format!("Profile {} does not exist", profile.display()),
                );
                continue;
            }
            for entry in list_entries(&profile)? {
                self.visit(&home, entry)?;
            }
        }
        Ok(())
    }

    fn visit(&mut self, home: &Path, entry: Entry) -> Result<(), DotError> {
        if is_ignored(&entry.name, entry.is_dir) {
            self.report.debug(
                FindingKind::Ignored,
                &entry.path,
                format!("File {} ignored.", entry.path.display()),
            );
            return Ok(());
        }

        let candidate = Candidate::top_level(home, entry.path, entry.is_dir);
        for stage in self.request.command.stages() {
            match stage {
                Stage::RecursiveRender => {
                    if candidate.is_dir && self.request.recursion > 1 {
                        self.render_nested(&candidate.source)?;
                    }
                }
                Stage::Render => self.render(&candidate)?,
                Stage::Link => self.link(&candidate)?,
                Stage::Unlink => self.unlink(&candidate)?,
            }
        }
        Ok(())
    }

    /// Render and link every template below `dir`, up to the recursion limit.
    ///
    /// Depth is counted from the profile directory, so a limit of 2 reaches
    /// the direct children of `dir`.
    fn render_nested(&mut self, dir: &Path) -> Result<(), DotError> {
        let walker = WalkDir::new(dir)
            .min_depth(1)
            .max_depth(self.request.recursion.saturating_sub(1))
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| !e.file_name().to_string_lossy().starts_with('.'));

        for entry in walker {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            if let Some(candidate) = Candidate::nested(entry.into_path()) {
                self.render(&candidate)?;
                self.link(&candidate)?;
            }
        }
        Ok(())
    }

    fn render(&mut self, candidate: &Candidate) -> Result<(), DotError> {
        let template = TemplateResource::new(
            candidate.source.clone(),
            candidate.rendered.clone(),
            self.env,
        );
        if !template.is_identity() {
            // Read now so an unreadable template fails before anything changes.
            template.render()?;
            self.actions.push(Action::RenderFile {
                source: candidate.source.clone(),
                destination: candidate.rendered.clone(),
            });
        }
        self.report.info(
            FindingKind::Rendered,
            &candidate.rendered,
            format!("File {} created.", candidate.rendered.display()),
        );
        Ok(())
    }

    fn link(&mut self, candidate: &Candidate) -> Result<(), DotError> {
        let target = &candidate.target;
        let rendered = &candidate.rendered;

        if let Some(previous) = self.claimed.get(target) {
            if previous == rendered {
                self.report.debug(
                    FindingKind::AlreadyLinked,
                    target,
                    format!("File {} already planned for {}", target.display(), rendered.display()),
                );
            } else {
                self.report.warn(
                    FindingKind::DuplicateTarget,
                    target,
                    format!(
                        "File {} is claimed by both {} and {}",
                        target.display(),
                        previous.display(),
                        rendered.display()
                    ),
                );
            }
            return Ok(());
        }
        self.claimed.insert(target.clone(), rendered.clone());

        match SymlinkResource::new(rendered.clone(), target.clone()).current_state()? {
            LinkState::Missing => {
                self.actions.push(Action::CreateLink {
                    target: target.clone(),
                    destination: rendered.clone(),
                });
                self.report.info(
                    FindingKind::Linked,
                    target,
                    format!(
                        "File {} created and linked to {}",
                        target.display(),
                        rendered.display()
                    ),
                );
            }
            LinkState::NotALink => self.not_a_link(target),
            LinkState::Elsewhere { current } => self.points_elsewhere(target, &current, rendered),
            LinkState::Correct => self.report.info(
                FindingKind::AlreadyLinked,
                target,
                format!(
                    "File {} links to {} as expected",
                    target.display(),
                    rendered.display()
                ),
            ),
        }
        Ok(())
    }

    fn unlink(&mut self, candidate: &Candidate) -> Result<(), DotError> {
        let target = &candidate.target;
        let rendered = &candidate.rendered;

        if !self.released.insert(target.clone()) {
            self.report.debug(
                FindingKind::Unlinked,
                target,
                format!("File {} already planned for removal", target.display()),
            );
            return Ok(());
        }

        match SymlinkResource::new(rendered.clone(), target.clone()).current_state()? {
            LinkState::Missing => {
                let level = match self.request.unlink_missing {
                    MissingPolicy::Conflict => Level::Warn,
                    MissingPolicy::Ignore => Level::Info,
                };
                self.report.push(Finding::new(
                    level,
                    FindingKind::MissingTarget,
                    target,
                    format!("File {} does not exist", target.display()),
                ));
            }
            LinkState::NotALink => self.not_a_link(target),
            LinkState::Elsewhere { current } => self.points_elsewhere(target, &current, rendered),
            LinkState::Correct => {
                self.actions.push(Action::RemoveLink {
                    target: target.clone(),
                    destination: rendered.clone(),
                });
                self.report.info(
                    FindingKind::Unlinked,
                    target,
                    format!(
                        "File {} unlinked from {}",
                        target.display(),
                        rendered.display()
                    ),
                );
            }
        }
        Ok(())
    }

    fn not_a_link(&mut self, target: &Path) {
        self.report.warn(
            FindingKind::NotALink,
            target,
            format!("File {} exists but is not a link", target.display()),
        );
    }

    fn points_elsewhere(&mut self, target: &Path, current: &Path, rendered: &Path) {
        self.report.warn(
            FindingKind::PointsElsewhere,
            target,
            format!(
                "File {} exists and points to {} instead of {}",
                target.display(),
                current.display(),
                rendered.display()
            ),
        );
    }
}

/// List the direct children of `dir`, sorted by name.
fn list_entries(dir: &Path) -> Result<Vec<Entry>, DotError> {
    let read_err = |source| DotError::ReadDir {
        path: dir.display().to_string(),
        source,
    };
    let mut entries = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(read_err)? {
        let entry = entry.map_err(read_err)?;
        let path = entry.path();
        entries.push(Entry {
            name: entry.file_name().to_string_lossy().into_owned(),
            is_dir: path.is_dir(),
            path,
        });
    }
    entries.sort_by(|a, b| a.path.file_name().cmp(&b.path.file_name()));
    Ok(entries)
}
