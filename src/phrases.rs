//! # Phrase Table
//!
//! Ordered `(pattern, resolver)` rules that turn a license section into
//! candidate identifiers. The first matching rule decides the outcome, so
//! order is precedence: exact license names discovered in the catalog come
//! first, then the authored heuristics below in the order they are written.
//!
//! Authored phrases are regular-expression fragments. Every run of whitespace
//! in a phrase matches one or more whitespace characters, `{v}` stands for an
//! optional version marker ("v", "ver.", "version", with separators), and the
//! whole phrase is matched case-insensitively between word boundaries.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::{Regex, RegexBuilder};
use tracing::{debug, trace};

use crate::guess::Guess;
use crate::license::LicenseId;

/// What `{v}` expands to in authored phrases.
const VERSION_MARKER: &str = r",?[\s-]*(?:v(?:er(?:sion)?)?\.?\s*)?";

/// Maps the captured version to identifiers; empty means "family recognized,
/// version not".
pub type VersionMapper = fn(&str) -> &'static [&'static str];

/// How a matched pattern turns into identifiers.
#[derive(Debug, Clone)]
pub enum Resolver {
  /// Exactly this license.
  Single(LicenseId),
  /// Any of these; the pattern only narrows the family down.
  Candidates(Vec<LicenseId>),
  /// Decided by the pattern's first capture group.
  Versioned(VersionMapper),
}

impl Resolver {
  /// `Single` for one identifier, `Candidates` for several.
  pub fn from_ids(ids: BTreeSet<LicenseId>) -> Self {
    let mut ids: Vec<LicenseId> = ids.into_iter().collect();
    if ids.len() == 1 {
      if let Some(id) = ids.pop() {
        return Self::Single(id);
      }
    }
    Self::Candidates(ids)
  }
}

/// Where a phrase entry came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternKind {
  /// A canonical license name from the catalog, matched verbatim.
  ExactName,
  /// An authored heuristic.
  Authored,
}

/// One compiled rule of the phrase table.
#[derive(Debug, Clone)]
pub struct PhraseEntry {
  kind: PatternKind,
  source: String,
  regex: Regex,
  resolver: Resolver,
}

impl PhraseEntry {
  /// Compile an authored phrase.
  pub fn authored(phrase: &str, resolver: Resolver) -> Result<Self, regex::Error> {
    let spaced = phrase.split_whitespace().collect::<Vec<_>>().join(r"\s+");
    let pattern = format!(r"\b(?:{})\b", spaced.replace("{v}", VERSION_MARKER));
    let regex = RegexBuilder::new(&pattern).case_insensitive(true).build()?;

    Ok(Self {
      kind: PatternKind::Authored,
      source: phrase.to_string(),
      regex,
      resolver,
    })
  }

  /// Compile a canonical license name into a verbatim, case-insensitive
  /// pattern. Word boundaries are only required at edges that are word
  /// characters, so names ending in ")" still match.
  pub fn exact_name(name: &str, resolver: Resolver) -> Result<Self, regex::Error> {
    let is_word = |c: char| c.is_alphanumeric() || c == '_';
    let lead = if name.chars().next().is_some_and(is_word) { r"\b" } else { "" };
    let trail = if name.chars().last().is_some_and(is_word) { r"\b" } else { "" };
    let pattern = format!("{lead}{}{trail}", regex::escape(name));
    let regex = RegexBuilder::new(&pattern).case_insensitive(true).build()?;

    Ok(Self {
      kind: PatternKind::ExactName,
      source: name.to_string(),
      regex,
      resolver,
    })
  }

  pub const fn kind(&self) -> PatternKind {
    self.kind
  }

  /// The phrase or name the entry was compiled from.
  pub fn source(&self) -> &str {
    &self.source
  }

  pub const fn resolver(&self) -> &Resolver {
    &self.resolver
  }

  /// Test the entry against `text`.
  ///
  /// `None` when the pattern does not match. `Some` with the resolved guess
  /// when it does; that guess is empty when a versioned resolver does not
  /// recognize the captured version.
  pub fn resolve(&self, text: &str) -> Option<Guess> {
    match &self.resolver {
      Resolver::Single(id) => self.regex.is_match(text).then(|| std::iter::once(id).collect()),
      Resolver::Candidates(ids) => self.regex.is_match(text).then(|| ids.iter().collect()),
      Resolver::Versioned(mapper) => {
        let captures = self.regex.captures(text)?;
        let version = captures.get(1).map_or("", |m| m.as_str());
        trace!("'{}' captured version '{}'", self.source, version);
        Some(mapper(version).iter().map(|id| LicenseId::from(*id)).collect())
      }
    }
  }
}

/// An authored rule before compilation.
enum Authored {
  One(&'static str),
  Any(&'static [&'static str]),
  Versioned(VersionMapper),
}

impl Authored {
  fn resolver(&self) -> Resolver {
    match self {
      Self::One(id) => Resolver::Single(LicenseId::from(*id)),
      Self::Any(ids) => Resolver::Candidates(ids.iter().map(|id| LicenseId::from(*id)).collect()),
      Self::Versioned(mapper) => Resolver::Versioned(*mapper),
    }
  }
}

const GPL_FAMILY: &[&str] = &["GPL_1", "GPL_2", "GPL_3"];
const LGPL_FAMILY: &[&str] = &["LGPL_2", "LGPL_2_1", "LGPL_3_0"];
const GFDL_FAMILY: &[&str] = &["GFDL_1_2", "GFDL_1_3"];
const ARTISTIC_FAMILY: &[&str] = &["Artistic_1_0", "Artistic_2_0"];

fn perl_version(version: &str) -> &'static [&'static str] {
  match version {
    "5" => &["Perl_5"],
    _ => &[],
  }
}

fn gpl_version(version: &str) -> &'static [&'static str] {
  match version {
    "1" => &["GPL_1"],
    "2" => &["GPL_2"],
    "3" => &["GPL_3"],
    _ => &[],
  }
}

fn lgpl_version(version: &str) -> &'static [&'static str] {
  match version {
    "2" | "2.0" => &["LGPL_2"],
    "2.1" => &["LGPL_2_1"],
    "3" | "3.0" => &["LGPL_3_0"],
    _ => &[],
  }
}

fn gfdl_version(version: &str) -> &'static [&'static str] {
  match version {
    "1.2" => &["GFDL_1_2"],
    "1.3" => &["GFDL_1_3"],
    _ => &[],
  }
}

fn artistic_version(version: &str) -> &'static [&'static str] {
  match version {
    "1" => &["Artistic_1_0"],
    "2" => &["Artistic_2_0"],
    _ => &[],
  }
}

fn apache_version(version: &str) -> &'static [&'static str] {
  match version {
    "1.1" => &["Apache_1_1"],
    "2" | "2.0" => &["Apache_2_0"],
    _ => &[],
  }
}

fn mozilla_version(version: &str) -> &'static [&'static str] {
  match version {
    "1.0" => &["Mozilla_1_0"],
    "1.1" => &["Mozilla_1_1"],
    "2.0" => &["Mozilla_2_0"],
    _ => &[],
  }
}

fn eupl_version(version: &str) -> &'static [&'static str] {
  match version {
    "1.1" => &["EUPL_1_1"],
    "1.2" => &["EUPL_1_2"],
    _ => &[],
  }
}

/// The authored heuristics, most specific first.
///
/// Versioned rules precede the unversioned rule for the same family. Once a
/// versioned rule matches, an unknown version ends classification instead of
/// falling through to the family-wide candidates.
const AUTHORED: &[(&str, Authored)] = &[
  (
    r"under the same (?:terms|license) as (?:the )?perl{v}(\d)",
    Authored::Versioned(perl_version),
  ),
  (r"under the same (?:terms|license) as (?:the )?perl", Authored::One("Perl_5")),
  (
    r"affero (?:general public licen[cs]e|GPL)",
    Authored::One("AGPL_3"),
  ),
  (r"AGPL(?:{v}3(?:\.0)?)?", Authored::One("AGPL_3")),
  (
    r"GNU free documentation licen[cs]e{v}(\d\.\d)",
    Authored::Versioned(gfdl_version),
  ),
  (r"GNU free documentation licen[cs]e", Authored::Any(GFDL_FAMILY)),
  (r"GFDL{v}(\d\.\d)", Authored::Versioned(gfdl_version)),
  (
    r"GNU (?:lesser|library) (?:general )?public licen[cs]e{v}(\d(?:\.\d)?)",
    Authored::Versioned(lgpl_version),
  ),
  (
    r"GNU (?:lesser|library) (?:general )?public licen[cs]e",
    Authored::Any(LGPL_FAMILY),
  ),
  (
    r"GNU (?:general )?public licen[cs]e{v}(\d)(?:\.\d)?",
    Authored::Versioned(gpl_version),
  ),
  (r"GNU (?:general )?public licen[cs]e", Authored::Any(GPL_FAMILY)),
  (r"GNU LGPL{v}(\d(?:\.\d)?)", Authored::Versioned(lgpl_version)),
  (r"GNU LGPL", Authored::Any(LGPL_FAMILY)),
  (r"GNU GPL{v}(\d)(?:\.\d)?", Authored::Versioned(gpl_version)),
  (r"GNU GPL", Authored::Any(GPL_FAMILY)),
  (r"LGPL{v}(\d(?:\.\d)?)", Authored::Versioned(lgpl_version)),
  (r"LGPL", Authored::Any(LGPL_FAMILY)),
  (r"GPL{v}(\d)(?:\.\d)?", Authored::Versioned(gpl_version)),
  (r"GPL", Authored::Any(GPL_FAMILY)),
  (r"FreeBSD", Authored::One("FreeBSD")),
  (r"BSD", Authored::One("BSD")),
  (
    r"artistic licen[cs]e{v}(\d)(?:\.\d)?",
    Authored::Versioned(artistic_version),
  ),
  (r"Artistic", Authored::Any(ARTISTIC_FAMILY)),
  (r"MIT", Authored::One("MIT")),
  (r"ISC licen[cs]e", Authored::One("ISC")),
  (
    r"apache (?:software )?licen[cs]e{v}(\d(?:\.\d)?)",
    Authored::Versioned(apache_version),
  ),
  (
    r"mozilla public licen[cs]e{v}(\d\.\d)",
    Authored::Versioned(mozilla_version),
  ),
  (r"MPL{v}(\d\.\d)", Authored::Versioned(mozilla_version)),
  (
    r"european union public licen[cs]e{v}(\d\.\d)",
    Authored::Versioned(eupl_version),
  ),
  (r"EUPL{v}(\d\.\d)", Authored::Versioned(eupl_version)),
  (r"has dedicated the work to the Commons", Authored::One("CC0_1_0")),
  (
    r"waiving all of his or her rights to the work worldwide under copyright law",
    Authored::One("CC0_1_0"),
  ),
  (
    r"has waived all copyright and related or neighboring rights to",
    Authored::One("CC0_1_0"),
  ),
  (r"unlicense\.org", Authored::One("Unlicense")),
  (r"zlib licen[cs]e", Authored::One("Zlib")),
  (r"PostgreSQL licen[cs]e", Authored::One("PostgreSQL")),
  (r"Q public licen[cs]e", Authored::One("QPL_1_0")),
];

static AUTHORED_ENTRIES: LazyLock<Vec<PhraseEntry>> = LazyLock::new(|| {
  AUTHORED
    .iter()
    .map(|(phrase, authored)| {
      PhraseEntry::authored(phrase, authored.resolver()).expect("authored phrases are valid patterns")
    })
    .collect()
});

/// The complete, ordered rule set used by the text classifier.
#[derive(Debug, Clone, Default)]
pub struct PhraseTable {
  entries: Vec<PhraseEntry>,
}

impl PhraseTable {
  /// Only the authored heuristics.
  pub fn authored() -> Self {
    Self {
      entries: AUTHORED_ENTRIES.clone(),
    }
  }

  /// Discovered entries first, in the order given, then the authored
  /// heuristics.
  pub fn assemble(discovered: Vec<PhraseEntry>) -> Self {
    let mut entries = discovered;
    let discovered_count = entries.len();
    entries.extend(AUTHORED_ENTRIES.iter().cloned());
    debug!(
      "Assembled phrase table: {} name patterns, {} authored patterns",
      discovered_count,
      AUTHORED_ENTRIES.len()
    );
    Self { entries }
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  pub fn iter(&self) -> std::slice::Iter<'_, PhraseEntry> {
    self.entries.iter()
  }

  /// Evaluate the rules in order and stop at the first match.
  pub fn classify(&self, text: &str) -> Guess {
    for entry in &self.entries {
      if let Some(guess) = entry.resolve(text) {
        debug!("Matched {:?} pattern '{}': [{}]", entry.kind, entry.source, guess);
        return guess;
      }
    }
    Guess::none()
  }
}
