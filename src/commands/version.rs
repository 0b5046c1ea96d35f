//! Command: print version information.

/// The version string, preferring the one stamped at build time.
#[must_use]
pub fn version() -> &'static str {
    option_env!("DOT_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"))
}

/// Print the version to stdout.
#[allow(clippy::print_stdout)]
pub fn run() {
    println!("dot {}", version());
}
