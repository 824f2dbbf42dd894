//! # Output Module
//!
//! This module centralizes all user-facing output for the licguess tool.
//!
//! Guesses go to stdout one identifier per line so they can be piped; with
//! `--json` every command prints a single JSON document instead. Decoration
//! (symbols, colours, summaries) is dropped in quiet mode.

use anyhow::{Context, Result};
use licguess::catalog::Catalog;
use licguess::license::LicenseDefinition;
use licguess::logging::{is_quiet, is_verbose};
use licguess::{Guess, License, info_log};
use owo_colors::{OwoColorize, Stream};
use serde::Serialize;

/// Symbols used in output
pub mod symbols {
  /// A single license was identified
  pub const SUCCESS: &str = "\u{2713}"; // ✓
  /// Nothing was identified
  pub const FAILURE: &str = "\u{2717}"; // ✗
  /// Several candidates remain
  pub const AMBIGUOUS: &str = "?";
}

#[derive(Serialize)]
struct GuessReport<'a> {
  source: &'a str,
  licenses: &'a Guess,
}

#[derive(Serialize)]
struct LicenseReport<'a> {
  #[serde(flatten)]
  license: &'a License,
  spdx_expression: Option<String>,
  notice: String,
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
  let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
  println!("{json}");
  Ok(())
}

/// Print the outcome of a classification.
///
/// `source` names the input (a path, or `-` for stdin).
pub fn print_guess(guess: &Guess, source: &str, json: bool) -> Result<()> {
  if json {
    return print_json(&GuessReport { source, licenses: guess });
  }

  if is_quiet() {
    for id in guess {
      println!("{id}");
    }
    return Ok(());
  }

  match guess.len() {
    0 => println!(
      "{} No license guess for {}",
      symbols::FAILURE.if_supports_color(Stream::Stdout, |s| s.red()),
      source
    ),
    1 => println!(
      "{} {}",
      symbols::SUCCESS.if_supports_color(Stream::Stdout, |s| s.green()),
      guess
    ),
    n => {
      println!(
        "{} {} candidate licenses for {}:",
        symbols::AMBIGUOUS.if_supports_color(Stream::Stdout, |s| s.yellow()),
        n,
        source
      );
      for id in guess {
        println!("  {id}");
      }
    }
  }
  Ok(())
}

/// Print a key lookup result.
pub fn print_key_lookup(guess: &Guess, key: &str, json: bool) -> Result<()> {
  print_guess(guess, key, json)
}

/// Print a constructed license and its notice.
pub fn print_license(license: &License, json: bool) -> Result<()> {
  if json {
    return print_json(&LicenseReport {
      license,
      spdx_expression: license.spdx_expression(),
      notice: license.notice(),
    });
  }

  if !is_quiet() {
    println!(
      "{} {} ({})",
      symbols::SUCCESS.if_supports_color(Stream::Stdout, |s| s.green()),
      license.id.if_supports_color(Stream::Stdout, |s| s.bold()),
      license.name
    );
    if let Some(spdx) = license.spdx_expression() {
      println!("  SPDX: {spdx}");
    }
    if is_verbose() {
      println!("  Metadata keys: {} (v1), {} (v2)", license.meta_name, license.meta2_name);
      if let Some(ref url) = license.url {
        println!("  URL: {url}");
      }
    }
    println!();
  }

  print!("{}", license.notice());
  Ok(())
}

/// Print every license the catalog knows.
pub fn print_catalog(catalog: &Catalog, json: bool) -> Result<()> {
  if json {
    let definitions: Vec<&LicenseDefinition> = catalog.definitions().collect();
    return print_json(&definitions);
  }

  if is_quiet() {
    for definition in catalog.definitions() {
      println!("{}", definition.identifier);
    }
    return Ok(());
  }

  let width = catalog
    .definitions()
    .map(|definition| definition.identifier.len())
    .max()
    .unwrap_or(0);

  for definition in catalog.definitions() {
    println!(
      "{:<width$}  {}",
      definition.identifier.if_supports_color(Stream::Stdout, |s| s.bold()),
      definition.name,
    );
    if is_verbose() {
      println!(
        "{:<width$}  keys: {} / {}{}",
        "",
        definition.meta_name,
        definition.meta2_name,
        definition.spdx.as_deref().map(|s| format!(", SPDX: {s}")).unwrap_or_default(),
      );
    }
  }

  println!();
  println!("{} licenses", catalog.len());
  if !catalog.skipped().is_empty() {
    info_log!(
      "{} license definitions could not be loaded (use -v for details)",
      catalog.skipped().len()
    );
  }
  Ok(())
}
