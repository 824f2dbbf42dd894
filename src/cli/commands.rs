//! # Commands
//!
//! Runs the parsed subcommand against the engine and reports the outcome.

use std::io::Read;
use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use licguess::config::{Config, load_config};
use licguess::logging::{init_tracing, set_quiet, set_verbose};
use licguess::{Engine, Guess, LicenseParams, verbose_log};
use tracing::debug;

use super::{Cli, Command, NoticeArgs};
use crate::output::{print_catalog, print_guess, print_key_lookup, print_license};

impl NoticeArgs {
  fn to_params(&self) -> LicenseParams {
    let mut params = LicenseParams::new(&self.holder).or_later(self.or_later);
    if let Some(ref year) = self.year {
      params = params.year(year);
    }
    if let Some(ref program) = self.program {
      params = params.program(program);
    }
    params
  }
}

/// Run the command line.
///
/// # Returns
///
/// Exit status 1 when a classification or lookup produced no guess; errors
/// are reserved for unusable input and exit with status 2 from `main`.
pub fn run(cli: Cli) -> Result<ExitCode> {
  let Cli { command, global } = cli;

  init_tracing(global.quiet, global.verbose);
  if global.verbose > 0 {
    set_verbose();
  } else if global.quiet {
    set_quiet();
  }
  global.colors.apply();

  let working_dir = std::env::current_dir().context("Failed to determine the current directory")?;
  let config = load_config(global.config.as_deref(), &working_dir, global.no_config)?;
  let configured = config.as_ref().map(Config::engine);
  let engine = match configured.as_ref() {
    Some(engine) => engine,
    None => Engine::global(),
  };
  debug!("Using an engine with {} licenses", engine.catalog().len());

  match command {
    Command::Text { file } => {
      let (text, source) = read_input(file.as_deref())?;
      let guess = engine.classify_from_text(&text);
      print_guess(&guess, &source, global.json)?;
      Ok(exit_code(&guess))
    }
    Command::Meta { file } => {
      let (text, source) = read_input(file.as_deref())?;
      let guess = engine.classify_from_metadata(&text);
      print_guess(&guess, &source, global.json)?;
      Ok(exit_code(&guess))
    }
    Command::Key { key, meta_version } => {
      let guess = engine.lookup_by_key(&key, meta_version.as_deref())?;
      print_key_lookup(&guess, &key, global.json)?;
      Ok(exit_code(&guess))
    }
    Command::Short { name, notice } => {
      let license = engine.resolve_short_name(&name, notice.to_params())?;
      print_license(&license, global.json)?;
      Ok(ExitCode::SUCCESS)
    }
    Command::Spdx { expression, notice } => {
      let license = engine.resolve_spdx_expression(&expression, notice.to_params())?;
      print_license(&license, global.json)?;
      Ok(ExitCode::SUCCESS)
    }
    Command::List => {
      for skipped in engine.catalog().skipped() {
        verbose_log!("Skipped: {}", skipped);
      }
      print_catalog(engine.catalog(), global.json)?;
      Ok(ExitCode::SUCCESS)
    }
  }
}

fn exit_code(guess: &Guess) -> ExitCode {
  if guess.is_empty() {
    ExitCode::FAILURE
  } else {
    ExitCode::SUCCESS
  }
}

/// Read `file`, or stdin when it is absent or `-`.
///
/// Returns the content and a name for it.
fn read_input(file: Option<&Path>) -> Result<(String, String)> {
  match file {
    Some(path) if path != Path::new("-") => {
      verbose_log!("Reading {}", path.display());
      let content =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read input file {}", path.display()))?;
      Ok((content, path.display().to_string()))
    }
    _ => {
      verbose_log!("Reading stdin");
      let mut content = String::new();
      std::io::stdin()
        .read_to_string(&mut content)
        .context("Failed to read from stdin")?;
      Ok((content, "-".to_string()))
    }
  }
}
