//! Styled terminal output for the CLI and resolver diagnostics.

use console::style;

pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

/// Resolver diagnostics, printed only in verbose mode. Goes to stderr so the
/// resolved version on stdout stays machine-readable.
pub fn note(message: &str) {
    eprintln!("{}", style(message).dim());
}
