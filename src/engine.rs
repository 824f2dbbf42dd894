//! # Engine Module
//!
//! The license classification engine: one catalog, the phrase table derived
//! from it, and the short-name aliases, bundled behind the public operations.
//!
//! The process-wide engine returned by [`Engine::global`] is built from the
//! compiled-in licenses the first time it is needed and never rebuilt. To pick
//! up other plugins, build a separate engine with [`Engine::from_catalog`].

use std::sync::OnceLock;

use tracing::debug;

use crate::builtin::BuiltinCatalog;
use crate::catalog::Catalog;
use crate::classifier::{LicenseClassifier, MetadataClassifier, TextClassifier};
use crate::error::GuessError;
use crate::guess::Guess;
use crate::license::{License, LicenseFactory, LicenseParams};
use crate::phrases::PhraseTable;
use crate::plugin::PluginCatalog;
use crate::short_name::ShortNameTable;

static GLOBAL: OnceLock<Engine> = OnceLock::new();

/// An immutable, thread-safe classification engine.
#[derive(Debug)]
pub struct Engine {
  catalog: Catalog,
  phrases: PhraseTable,
  short_names: ShortNameTable,
}

impl Engine {
  /// The process-wide engine over the compiled-in licenses.
  pub fn global() -> &'static Self {
    GLOBAL.get_or_init(|| {
      debug!("Initializing the global license engine");
      Self::from_catalog(&BuiltinCatalog)
    })
  }

  /// Build an engine from every plugin `plugins` enumerates.
  pub fn from_catalog(plugins: &dyn PluginCatalog) -> Self {
    let catalog = Catalog::build(plugins);
    let phrases = PhraseTable::assemble(catalog.name_phrases());
    debug!(
      "Engine ready: {} licenses, {} phrase entries",
      catalog.len(),
      phrases.len()
    );

    Self {
      catalog,
      phrases,
      short_names: ShortNameTable::builtin(),
    }
  }

  /// Replace the short-name aliases.
  pub fn with_short_names(mut self, short_names: ShortNameTable) -> Self {
    self.short_names = short_names;
    self
  }

  pub const fn catalog(&self) -> &Catalog {
    &self.catalog
  }

  pub const fn phrases(&self) -> &PhraseTable {
    &self.phrases
  }

  pub const fn short_names(&self) -> &ShortNameTable {
    &self.short_names
  }

  pub const fn text_classifier(&self) -> TextClassifier<'_> {
    TextClassifier::new(&self.phrases)
  }

  pub const fn metadata_classifier(&self) -> MetadataClassifier<'_> {
    MetadataClassifier::new(&self.catalog)
  }

  /// Guess the licenses named in the license section of documentation text.
  pub fn classify_from_text(&self, text: &str) -> Guess {
    self.text_classifier().classify(text)
  }

  /// Guess the licenses declared by the `license` field of metadata text.
  pub fn classify_from_metadata(&self, text: &str) -> Guess {
    self.metadata_classifier().classify(text)
  }

  /// Licenses registered under a metadata key.
  ///
  /// `version` is `None` for both conventions, or `"1"` / `"2"`.
  ///
  /// # Errors
  ///
  /// [`GuessError::InvalidArgument`] for any other version.
  pub fn lookup_by_key(&self, key: &str, version: Option<&str>) -> Result<Guess, GuessError> {
    self.catalog.lookup_by_key(key, version)
  }

  /// Build the license a short name such as `GPL-2` or `Artistic` stands for.
  ///
  /// # Errors
  ///
  /// See [`ShortNameTable::resolve`].
  pub fn resolve_short_name(&self, short_name: &str, params: LicenseParams) -> Result<License, GuessError> {
    self.short_names.resolve(short_name, params, &self.catalog)
  }

  /// Build the license an SPDX identifier stands for.
  ///
  /// A definition's SPDX expression matches verbatim (ignoring case), so
  /// `Artistic-1.0-Perl OR GPL-1.0-or-later` yields `Perl_5`. Otherwise the
  /// expression must be a single identifier, optionally suffixed with
  /// `-only`, `-or-later` or `+`; the latter two set `or_later`.
  ///
  /// # Errors
  ///
  /// * [`GuessError::InvalidArgument`] for an empty or compound expression,
  ///   or parameters the license cannot take
  /// * [`GuessError::UnknownSpdx`] when no definition has the identifier
  pub fn resolve_spdx_expression(&self, expression: &str, params: LicenseParams) -> Result<License, GuessError> {
    let expression = expression.trim();
    if expression.is_empty() {
      return Err(GuessError::InvalidArgument("no SPDX expression specified".to_string()));
    }

    if let Some(definition) = self.catalog.find_by_spdx(expression) {
      return self.catalog.create(&definition.id(), params);
    }

    if expression.contains(|c: char| c.is_whitespace() || c == '(' || c == ')') {
      return Err(GuessError::InvalidArgument(format!(
        "compound SPDX expressions are not supported: {expression}"
      )));
    }

    let (base, or_later) = split_spdx_suffix(expression);
    let definition = self
      .catalog
      .find_by_spdx(base)
      .ok_or_else(|| GuessError::UnknownSpdx(expression.to_string()))?;
    debug!("SPDX expression '{}' resolves to {}", expression, definition.identifier);

    let params = if or_later { params.or_later(true) } else { params };
    self.catalog.create(&definition.id(), params)
  }
}

/// Split an SPDX identifier into its base and whether it grants later versions.
fn split_spdx_suffix(expression: &str) -> (&str, bool) {
  let lower = expression.to_ascii_lowercase();
  if lower.ends_with("-or-later") {
    (&expression[..expression.len() - "-or-later".len()], true)
  } else if let Some(base) = expression.strip_suffix('+') {
    (base, true)
  } else if lower.ends_with("-only") {
    (&expression[..expression.len() - "-only".len()], false)
  } else {
    (expression, false)
  }
}
