//! Structured logger with dry-run awareness.
use std::path::PathBuf;

use super::utils::log_file_path;
use super::{DRY_RUN_TARGET, STAGE_TARGET};
use crate::engine::driver::Outcome;
use crate::engine::report::{Finding, Level};

/// Structured logger with dry-run awareness.
///
/// Every message is also written to `$XDG_CACHE_HOME/dot/<command>.log`
/// (default `~/.cache/dot/<command>.log`) with timestamps and ANSI codes
/// stripped, regardless of console verbosity.
#[derive(Debug, Default)]
pub struct Logger {
    log_file: Option<PathBuf>,
}

impl Logger {
    /// Create a new logger.
    ///
    /// Only remembers the log file path for the summary; the file itself is
    /// created by [`init_subscriber`](super::subscriber::init_subscriber).
    #[must_use]
    pub fn new(command: &str) -> Self {
        Self {
            log_file: log_file_path(command),
        }
    }

    /// Return the log file path, if available.
    #[must_use]
    pub const fn log_path(&self) -> Option<&PathBuf> {
        self.log_file.as_ref()
    }

    /// Log an error message.
    pub fn error(&self, msg: &str) {
        tracing::error!("{msg}");
    }

    /// Log a warning message.
    pub fn warn(&self, msg: &str) {
        tracing::warn!("{msg}");
    }

    /// Log a stage header.
    pub fn stage(&self, msg: &str) {
        tracing::info!(target: STAGE_TARGET, "{msg}");
    }

    /// Log an informational message.
    pub fn info(&self, msg: &str) {
        tracing::info!("{msg}");
    }

    /// Log a debug message (console only when verbose, always in the file).
    pub fn debug(&self, msg: &str) {
        tracing::debug!("{msg}");
    }

    /// Log a dry-run action message.
    pub fn dry_run(&self, msg: &str) {
        tracing::info!(target: DRY_RUN_TARGET, "{msg}");
    }

    /// Log a planning finding.
    ///
    /// In a preview, findings that announce a change are tagged as dry-run
    /// output since nothing will actually happen.
    pub fn emit(&self, finding: &Finding, preview: bool) {
        match finding.level {
            Level::Warn => self.warn(&finding.message),
            Level::Info if preview && finding.kind.is_change() => self.dry_run(&finding.message),
            Level::Info => self.info(&finding.message),
            Level::Debug => self.debug(&finding.message),
        }
    }

    /// Log a one-line summary of how the invocation ended.
    pub fn print_summary(&self, outcome: &Outcome) {
        match outcome {
            Outcome::Aborted { conflicts } => {
                self.debug(&format!("{conflicts} conflict(s) found"));
            }
            Outcome::Previewed { planned } => {
                self.dry_run(&format!("{planned} change(s) would be made"));
            }
            Outcome::Committed { applied } => {
                self.info(&format!("{applied} change(s) made"));
            }
        }
        if let Some(path) = &self.log_file {
            self.debug(&format!("log: {}", path.display()));
        }
    }
}
