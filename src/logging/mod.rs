//! # Logging Module
//!
//! User-facing output helpers for the `licguess` binary:
//! - Verbose messages that only appear with `-v`
//! - Info messages that `-q` silences, coloured when enabled
//! - Installation of the `tracing` subscriber that renders the library's
//!   diagnostics
//!
//! Verbose logs go to stderr and info logs go to stdout, so the guesses
//! themselves can be piped while diagnostics stay on the terminal.
//!
//! ## Example
//!
//! ```rust
//! use licguess::logging::{ColorMode, set_verbose};
//! use licguess::{info_log, verbose_log};
//!
//! set_verbose();
//! ColorMode::Auto.apply();
//!
//! verbose_log!("Reading metadata from {}", "META.json");
//! info_log!("No license guess for {}", "lib/Foo.pm");
//! ```

mod modes;

pub use modes::{ColorMode, default_filter, init_tracing, is_quiet, is_verbose, set_quiet, set_verbose};
use owo_colors::{OwoColorize, Stream};

/// Logs a message to stderr if verbose mode is enabled.
///
/// Same format string syntax as [`eprintln!`].
#[macro_export]
macro_rules! verbose_log {
    ($($arg:tt)*) => {
        if $crate::logging::is_verbose() {
            eprintln!($($arg)*);
        }
    };
}

/// Logs a message to stdout unless quiet mode is enabled.
///
/// Same format string syntax as [`println!`].
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {
        if !$crate::logging::is_quiet() {
            $crate::logging::print_info_log(&format!($($arg)*));
        }
    };
}

/// Prints an info message, yellow when colours are enabled.
pub fn print_info_log(message: &str) {
  println!("{}", message.if_supports_color(Stream::Stdout, |m| m.yellow()));
}
