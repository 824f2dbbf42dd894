//! # Plugin Module
//!
//! This module contains the interfaces through which license definitions
//! reach the engine. The engine never looks for licenses on its own: it asks a
//! [`PluginCatalog`] to enumerate [`LicensePlugin`]s and builds its catalog
//! from whatever comes back.
//!
//! Implementations shipped with the crate:
//! - [`BuiltinCatalog`](crate::builtin::BuiltinCatalog) - the compiled-in
//!   definitions
//! - [`DefinitionCatalog`] - `[[licenses]]` entries from a configuration file
//! - [`CompositeCatalog`] - several catalogs chained together

use crate::error::PluginLoadError;
use crate::license::LicenseDefinition;

/// A license-definition provider.
///
/// The first four methods identify the license and are all the engine needs.
/// The remaining ones describe it further for the license objects the engine
/// constructs.
pub trait LicensePlugin: Send + Sync {
  /// Identifier the license registers under, e.g. `GPL_2`.
  fn identifier(&self) -> &str;

  /// Key used by v1-style distribution metadata, e.g. `gpl`.
  fn v1_key(&self) -> &str;

  /// Key used by v2-style distribution metadata, e.g. `gpl_2`.
  fn v2_key(&self) -> &str;

  /// Canonical display name of the license.
  fn canonical_name(&self) -> &str;

  fn spdx_expression(&self) -> Option<&str> {
    None
  }

  fn url(&self) -> Option<&str> {
    None
  }

  fn allows_or_later(&self) -> bool {
    false
  }
}

/// One enumerated plugin: loaded, or the reason it could not be.
pub type PluginSlot = Result<Box<dyn LicensePlugin>, PluginLoadError>;

/// An enumerable collection of license plugins.
///
/// Enumeration order carries no meaning; the engine produces the same results
/// for any order.
pub trait PluginCatalog: Send + Sync {
  /// Enumerate every plugin this catalog knows about.
  fn discover(&self) -> Vec<PluginSlot>;
}

/// Several catalogs enumerated one after the other.
#[derive(Default)]
pub struct CompositeCatalog {
  catalogs: Vec<Box<dyn PluginCatalog>>,
}

impl CompositeCatalog {
  pub fn new() -> Self {
    Self::default()
  }

  /// Append a catalog.
  pub fn with(mut self, catalog: impl PluginCatalog + 'static) -> Self {
    self.catalogs.push(Box::new(catalog));
    self
  }

  pub fn len(&self) -> usize {
    self.catalogs.len()
  }

  pub fn is_empty(&self) -> bool {
    self.catalogs.is_empty()
  }
}

impl PluginCatalog for CompositeCatalog {
  fn discover(&self) -> Vec<PluginSlot> {
    self.catalogs.iter().flat_map(|catalog| catalog.discover()).collect()
  }
}

/// License definitions supplied as raw TOML tables.
///
/// Each entry is a plugin of its own: an entry that does not deserialize into
/// a [`LicenseDefinition`] or fails validation becomes a [`PluginLoadError`]
/// and does not affect its neighbours.
#[derive(Debug, Clone, Default)]
pub struct DefinitionCatalog {
  /// Where the entries came from, used in load errors.
  origin: String,
  entries: Vec<toml::Value>,
}

impl DefinitionCatalog {
  pub fn new(origin: impl Into<String>, entries: Vec<toml::Value>) -> Self {
    Self {
      origin: origin.into(),
      entries,
    }
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  fn load_entry(&self, index: usize, entry: &toml::Value) -> PluginSlot {
    let label = entry
      .get("identifier")
      .and_then(toml::Value::as_str)
      .map(str::to_string)
      .unwrap_or_else(|| format!("{}: licenses[{index}]", self.origin));

    let definition: LicenseDefinition = entry
      .clone()
      .try_into()
      .map_err(|e: toml::de::Error| PluginLoadError::new(&label, e.to_string()))?;

    validate_definition(&definition).map_err(|reason| PluginLoadError::new(&label, reason))?;

    Ok(Box::new(definition))
  }
}

impl PluginCatalog for DefinitionCatalog {
  fn discover(&self) -> Vec<PluginSlot> {
    self
      .entries
      .iter()
      .enumerate()
      .map(|(index, entry)| self.load_entry(index, entry))
      .collect()
  }
}

/// Check that a definition can be registered.
///
/// Identifiers are restricted to ASCII letters, digits and underscores so they
/// stay valid short-name fallbacks; keys follow the metadata token syntax.
pub fn validate_definition(definition: &LicenseDefinition) -> Result<(), String> {
  if definition.identifier.is_empty() {
    return Err("identifier cannot be empty".to_string());
  }
  if !definition
    .identifier
    .chars()
    .all(|c| c.is_ascii_alphanumeric() || c == '_')
  {
    return Err(format!(
      "identifier '{}' may only contain ASCII letters, digits and underscores",
      definition.identifier
    ));
  }
  if definition.name.trim().is_empty() {
    return Err("name cannot be empty".to_string());
  }
  for (field, key) in [("meta-name", &definition.meta_name), ("meta2-name", &definition.meta2_name)] {
    if key.is_empty() {
      return Err(format!("{field} cannot be empty"));
    }
    if !key.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_') {
      return Err(format!(
        "{field} '{key}' may only contain lowercase letters, digits and underscores"
      ));
    }
  }
  Ok(())
}
