//! Tracing subscriber setup: console formatter, file layer, and initialisation.
use std::fmt::Write as _;
use std::fs;
use std::sync::Mutex;

use tracing_subscriber::filter::LevelFilter;

use super::utils::{format_utc_datetime, format_utc_time, log_file_path, strip_ansi};
use super::{DRY_RUN_TARGET, STAGE_TARGET};

/// How an event is labelled, decided from its level and target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Label {
    Stage,
    Preview,
    Error,
    Warn,
    Info,
    Debug,
}

impl Label {
    fn of(metadata: &tracing::Metadata<'_>) -> Self {
        match (*metadata.level(), metadata.target()) {
            (tracing::Level::ERROR, _) => Self::Error,
            (tracing::Level::WARN, _) => Self::Warn,
            (tracing::Level::INFO, STAGE_TARGET) => Self::Stage,
            (tracing::Level::INFO, DRY_RUN_TARGET) => Self::Preview,
            (tracing::Level::INFO, _) => Self::Info,
            _ => Self::Debug,
        }
    }

    /// Colored console line, without the trailing newline.
    fn console(self, msg: &str) -> String {
        match self {
            Self::Error => format!("\x1b[31merror:\x1b[0m {msg}"),
            Self::Warn => format!("\x1b[33mwarning:\x1b[0m {msg}"),
            Self::Stage => format!("\x1b[1m:: {msg}\x1b[0m"),
            Self::Preview => format!("   \x1b[36m(dry run)\x1b[0m {msg}"),
            Self::Info => format!("   {msg}"),
            Self::Debug => format!("   \x1b[2m{msg}\x1b[0m"),
        }
    }

    /// Plain log-file line body, without the timestamp.
    fn plain(self, msg: &str) -> String {
        let tag = match self {
            Self::Error => "error: ",
            Self::Warn => "warning: ",
            Self::Stage => ":: ",
            Self::Preview => "(dry run) ",
            Self::Info => "",
            Self::Debug => "debug: ",
        };
        format!("{tag}{msg}")
    }
}

/// The `message` field of an event.
fn message(event: &tracing::Event<'_>) -> String {
    struct Visitor(String);

    impl tracing::field::Visit for Visitor {
        fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
            if field.name() == "message" {
                self.0.push_str(value);
            }
        }

        fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
            if field.name() == "message" {
                write!(self.0, "{value:?}").ok();
            }
        }
    }

    let mut visitor = Visitor(String::new());
    event.record(&mut visitor);
    visitor.0
}

/// Appends every event to `$XDG_CACHE_HOME/dot/<command>.log`, one
/// timestamped line each, with ANSI codes stripped.
#[derive(Debug)]
pub(super) struct FileLayer {
    file: Mutex<fs::File>,
}

impl FileLayer {
    /// Truncate the log file for `command` and start it with a one-line
    /// header. `None` when the cache directory or the file is unavailable.
    pub(super) fn new(command: &str) -> Option<Self> {
        use std::io::Write as _;

        let path = log_file_path(command)?;
        let version =
            option_env!("DOT_VERSION").unwrap_or(concat!("dev-", env!("CARGO_PKG_VERSION")));
        let mut file = fs::File::create(&path).ok()?;
        writeln!(file, "# dot {command} {version} {}", format_utc_datetime()).ok()?;
        Some(Self {
            file: Mutex::new(file),
        })
    }
}

impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for FileLayer {
    fn on_event(
        &self,
        event: &tracing::Event<'_>,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        use std::io::Write as _;

        let line = Label::of(event.metadata()).plain(&strip_ansi(&message(event)));
        if let Ok(mut file) = self.file.lock() {
            writeln!(file, "[{}] {line}", format_utc_time()).ok();
        }
    }
}

/// Console [`FormatEvent`](tracing_subscriber::fmt::FormatEvent): no
/// timestamps or targets, just a colored label and the message.
struct ConsoleFormatter;

impl<S, N> tracing_subscriber::fmt::FormatEvent<S, N> for ConsoleFormatter
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
    N: for<'a> tracing_subscriber::fmt::FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &tracing_subscriber::fmt::FmtContext<'_, S, N>,
        mut writer: tracing_subscriber::fmt::format::Writer<'_>,
        event: &tracing::Event<'_>,
    ) -> std::fmt::Result {
        writeln!(writer, "{}", Label::of(event.metadata()).console(&message(event)))
    }
}

/// Pick the console level from the command line and environment.
///
/// Conflicts are always shown. `-v` adds what was done, `-vv` adds skipped
/// entries and applied actions. A dry run shows at least what would be done;
/// `debug` (from `DOT_DEBUG`) forces everything.
///
/// ```
/// use dot_cli::logging::console_level;
/// use tracing_subscriber::filter::LevelFilter;
///
/// assert_eq!(console_level(0, false, false), LevelFilter::WARN);
/// assert_eq!(console_level(0, true, false), LevelFilter::INFO);
/// assert_eq!(console_level(0, false, true), LevelFilter::DEBUG);
/// ```
#[must_use]
pub fn console_level(verbose: u8, dry_run: bool, debug: bool) -> LevelFilter {
    if debug || verbose >= 2 {
        LevelFilter::DEBUG
    } else if dry_run || verbose == 1 {
        LevelFilter::INFO
    } else {
        LevelFilter::WARN
    }
}

/// Initialise the global [`tracing`] subscriber.
///
/// The console layer writes warnings and errors to stderr and everything
/// else to stdout, filtered at `console_level`. The file layer records every
/// event to `$XDG_CACHE_HOME/dot/<command>.log`. Must be called once, before
/// any logging.
pub fn init_subscriber(console_level: LevelFilter, command: &str) {
    use tracing_subscriber::fmt::writer::MakeWriterExt as _;
    use tracing_subscriber::{
        Layer as _, fmt, layer::SubscriberExt as _, util::SubscriberInitExt as _,
    };

    let make_writer = std::io::stderr
        .with_max_level(tracing::Level::WARN)
        .and(std::io::stdout.with_min_level(tracing::Level::INFO));

    let console_layer = fmt::layer()
        .event_format(ConsoleFormatter)
        .with_writer(make_writer)
        .with_filter(console_level);

    let file_layer = FileLayer::new(command).map(|l| l.with_filter(LevelFilter::DEBUG));

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::logging::isolated_logger;

    #[test]
    fn verbosity_ladder() {
        assert_eq!(console_level(0, false, false), LevelFilter::WARN);
        assert_eq!(console_level(1, false, false), LevelFilter::INFO);
        assert_eq!(console_level(2, false, false), LevelFilter::DEBUG);
        assert_eq!(console_level(5, false, false), LevelFilter::DEBUG);
    }

    #[test]
    fn dry_run_never_lowers_verbosity() {
        assert_eq!(console_level(0, true, false), LevelFilter::INFO);
        assert_eq!(console_level(2, true, false), LevelFilter::DEBUG);
    }

    #[test]
    fn file_layer_writes_header() {
        let (log, _tmp, _guard) = isolated_logger();
        let contents = fs::read_to_string(log.log_path().unwrap()).unwrap();
        assert!(contents.starts_with("# dot test "), "{contents}");
        assert_eq!(contents.lines().count(), 1);
    }

    #[test]
    fn file_lines_are_labelled_by_target() {
        let (log, _tmp, _guard) = isolated_logger();
        log.stage("Link");
        log.dry_run("would link");
        log.warn("clash");
        log.debug("detail");

        let contents = fs::read_to_string(log.log_path().unwrap()).unwrap();
        let bodies: Vec<&str> = contents
            .lines()
            .skip(1)
            .map(|line| line.split_once("] ").unwrap().1)
            .collect();
        assert_eq!(
            bodies,
            [":: Link", "(dry run) would link", "warning: clash", "debug: detail"]
        );
    }

    #[test]
    fn console_and_file_share_labels() {
        assert_eq!(Label::Warn.plain("x"), "warning: x");
        assert_eq!(strip_ansi(&Label::Warn.console("x")), "warning: x");
        assert_eq!(strip_ansi(&Label::Stage.console("Link")), ":: Link");
        assert_eq!(Label::Info.plain("x"), "x");
    }
}
