//! # licguess
//!
//! Guess the license of a distribution from its documentation or metadata.

mod cli;
mod output;

use std::process::ExitCode;

use crate::cli::Cli;

/// Exit status for unusable input, matching clap's usage errors.
const ERROR_EXIT_CODE: u8 = 2;

fn main() -> ExitCode {
  match cli::run(Cli::parse_args()) {
    Ok(code) => code,
    Err(e) => {
      eprintln!("Error: {e:?}");
      ExitCode::from(ERROR_EXIT_CODE)
    }
  }
}
