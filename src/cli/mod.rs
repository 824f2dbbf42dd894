//! # CLI Module
//!
//! This module contains the command-line interface implementation.
//! It uses clap for argument parsing, with one subcommand per engine
//! operation.

mod commands;

use std::path::PathBuf;

use clap::builder::styling::{AnsiColor, Color, Style, Styles};
use clap::{Args, Parser, Subcommand};
pub use commands::run;
use licguess::logging::ColorMode;

const CUSTOM_STYLES: Styles = Styles::styled()
  .header(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))).bold())
  .usage(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))).bold())
  .literal(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Blue))).bold())
  .placeholder(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Cyan))))
  .error(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Red))).bold())
  .valid(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))))
  .invalid(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Yellow))));

/// Top-level CLI arguments
#[derive(Parser, Debug)]
#[command(
  author,
  version,
  about,
  styles = CUSTOM_STYLES,
  after_help = "Examples:
  # Guess from the license section of a module's documentation
  licguess text lib/Foo/Bar.pm

  # Guess from distribution metadata read on stdin
  cat META.json | licguess meta

  # Licenses registered under a v1 metadata key
  licguess key gpl --meta-version 1

  # Print the notice for a short license name
  licguess short GPL-2+ --holder \"Jane Doe\" --year 2024

  # Same, from an SPDX identifier, as JSON
  licguess --json spdx Apache-2.0 --holder \"Acme Corp\"

Exit status is 0 on success, 1 when nothing was guessed, 2 on errors.
",
  help_template = "{before-help}{name} v{version}
{about-section}
{usage-heading} {usage}

{all-args}{after-help}
"
)]
pub struct Cli {
  #[command(subcommand)]
  pub command: Command,

  #[command(flatten)]
  pub global: GlobalArgs,
}

/// Options shared by every subcommand
#[derive(Args, Debug, Default)]
pub struct GlobalArgs {
  /// Path to config file (default: .licguess.toml in the current directory)
  #[arg(long, value_name = "FILE", global = true)]
  pub config: Option<PathBuf>,

  /// Ignore config file even if present
  #[arg(long, global = true)]
  pub no_config: bool,

  /// Print results as JSON
  #[arg(long, global = true)]
  pub json: bool,

  /// Increase verbosity (-v info, -vv debug, -vvv trace)
  #[arg(short, long, action = clap::ArgAction::Count, global = true)]
  pub verbose: u8,

  /// Suppress all output except results and errors
  #[arg(short, long, conflicts_with = "verbose", global = true)]
  pub quiet: bool,

  /// Control when to use colored output (auto, never, always)
  #[arg(
    long,
    value_name = "WHEN",
    num_args = 0..=1,
    default_value_t = ColorMode::Auto,
    default_missing_value = "always",
    value_enum,
    global = true
  )]
  pub colors: ColorMode,
}

/// Parameters of a license notice
#[derive(Args, Debug)]
pub struct NoticeArgs {
  /// Copyright holder named in the notice
  #[arg(long)]
  pub holder: String,

  /// Copyright year(s) (default: current year)
  #[arg(long)]
  pub year: Option<String>,

  /// Name of the licensed program
  #[arg(long)]
  pub program: Option<String>,

  /// Grant "this version or any later version"
  #[arg(long)]
  pub or_later: bool,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
  /// Guess from the license section of embedded documentation
  Text {
    /// File to read; stdin when absent or "-"
    file: Option<PathBuf>,
  },

  /// Guess from the license field of distribution metadata
  Meta {
    /// File to read; stdin when absent or "-"
    file: Option<PathBuf>,
  },

  /// List the licenses registered under a metadata key
  Key {
    /// Metadata key, e.g. "gpl" or "perl_5"
    key: String,

    /// Only search keys of this metadata version (1 or 2)
    #[arg(long, value_name = "N")]
    meta_version: Option<String>,
  },

  /// Print the notice for a short license name such as GPL-2 or Artistic
  Short {
    /// Short license name; a trailing "+" grants later versions
    name: String,

    #[command(flatten)]
    notice: NoticeArgs,
  },

  /// Print the notice for an SPDX license identifier
  Spdx {
    /// SPDX identifier, e.g. "GPL-2.0-or-later"
    expression: String,

    #[command(flatten)]
    notice: NoticeArgs,
  },

  /// List every known license
  List,
}

impl Cli {
  /// Parse CLI arguments and return the Cli struct
  pub fn parse_args() -> Self {
    Self::parse()
  }
}
