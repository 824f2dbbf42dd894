//! # Catalog Module
//!
//! The registry of known licenses, built once from a [`PluginCatalog`].
//!
//! The catalog indexes every loaded definition by its v1 and v2 metadata keys
//! and by both together, keeps the definitions for the license factory, and
//! turns canonical license names into exact-match phrase entries for the text
//! classifier.

use std::cmp::Reverse;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, trace, warn};

use crate::error::{GuessError, PluginLoadError};
use crate::guess::Guess;
use crate::license::{License, LicenseDefinition, LicenseFactory, LicenseId, LicenseParams};
use crate::phrases::{PhraseEntry, Resolver};
use crate::plugin::{PluginCatalog, validate_definition};

/// First parenthetical in a canonical name, e.g. " (GPL Compatible)".
static PARENTHETICAL: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"\s+\(.+?\)").expect("parenthetical pattern is valid"));

/// Which metadata key convention a lookup uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetaVersion {
  V1,
  V2,
}

impl FromStr for MetaVersion {
  type Err = GuessError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "1" => Ok(Self::V1),
      "2" => Ok(Self::V2),
      other => Err(GuessError::InvalidArgument(format!("illegal metadata version: {other}"))),
    }
  }
}

impl fmt::Display for MetaVersion {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::V1 => f.write_str("1"),
      Self::V2 => f.write_str("2"),
    }
  }
}

type KeyIndex = BTreeMap<String, BTreeSet<LicenseId>>;

/// Metadata-key indexes and definitions of every loaded license.
///
/// Immutable once built. `keys_all[k]` is always the union of `keys_v1[k]`
/// and `keys_v2[k]`.
#[derive(Debug, Default)]
pub struct Catalog {
  keys_v1: KeyIndex,
  keys_v2: KeyIndex,
  keys_all: KeyIndex,
  definitions: BTreeMap<LicenseId, LicenseDefinition>,
  skipped: Vec<PluginLoadError>,
}

impl Catalog {
  /// Build the catalog from every plugin `plugins` enumerates.
  ///
  /// Plugins that fail to load, fail validation, or reuse an identifier that
  /// is already registered are logged and skipped.
  pub fn build(plugins: &dyn PluginCatalog) -> Self {
    let mut catalog = Self::default();

    for slot in plugins.discover() {
      let plugin = match slot {
        Ok(plugin) => plugin,
        Err(e) => {
          warn!("{e}");
          catalog.skipped.push(e);
          continue;
        }
      };

      let definition = LicenseDefinition::from_plugin(plugin.as_ref());
      if let Err(reason) = validate_definition(&definition) {
        let e = PluginLoadError::new(&definition.identifier, reason);
        warn!("{e}");
        catalog.skipped.push(e);
        continue;
      }

      if let Err(e) = catalog.register(definition) {
        warn!("{e}");
        catalog.skipped.push(e);
      }
    }

    debug!(
      "Built license catalog: {} licenses, {} v1 keys, {} v2 keys, {} plugins skipped",
      catalog.definitions.len(),
      catalog.keys_v1.len(),
      catalog.keys_v2.len(),
      catalog.skipped.len()
    );

    catalog
  }

  fn register(&mut self, definition: LicenseDefinition) -> Result<(), PluginLoadError> {
    let id = definition.id();
    if self.definitions.contains_key(&id) {
      return Err(PluginLoadError::new(
        &definition.identifier,
        "a license with this identifier is already registered",
      ));
    }

    trace!(
      "Registering {} under '{}' (v1) and '{}' (v2)",
      id, definition.meta_name, definition.meta2_name
    );

    for (index, key) in [
      (&mut self.keys_v1, &definition.meta_name),
      (&mut self.keys_v2, &definition.meta2_name),
    ] {
      index.entry(key.clone()).or_default().insert(id.clone());
      self.keys_all.entry(key.clone()).or_default().insert(id.clone());
    }

    self.definitions.insert(id, definition);
    Ok(())
  }

  /// Identifiers registered under `key`.
  ///
  /// `None` searches both conventions. Unknown keys give an empty guess.
  pub fn lookup(&self, key: &str, version: Option<MetaVersion>) -> Guess {
    let index = match version {
      None => &self.keys_all,
      Some(MetaVersion::V1) => &self.keys_v1,
      Some(MetaVersion::V2) => &self.keys_v2,
    };
    index.get(key).map(|ids| ids.iter().collect()).unwrap_or_default()
  }

  /// Like [`lookup`](Self::lookup), with the version given as text.
  ///
  /// # Errors
  ///
  /// [`GuessError::InvalidArgument`] for any version other than `"1"` or `"2"`.
  pub fn lookup_by_key(&self, key: &str, version: Option<&str>) -> Result<Guess, GuessError> {
    let version = version.map(str::parse::<MetaVersion>).transpose()?;
    Ok(self.lookup(key, version))
  }

  pub fn definition(&self, id: &LicenseId) -> Option<&LicenseDefinition> {
    self.definitions.get(id)
  }

  /// All loaded definitions, ordered by identifier.
  pub fn definitions(&self) -> impl Iterator<Item = &LicenseDefinition> {
    self.definitions.values()
  }

  /// The definition whose SPDX expression equals `spdx`, ignoring case.
  pub fn find_by_spdx(&self, spdx: &str) -> Option<&LicenseDefinition> {
    self
      .definitions
      .values()
      .find(|definition| definition.spdx.as_deref().is_some_and(|s| s.eq_ignore_ascii_case(spdx)))
  }

  /// Keys of the selected convention, with the identifiers under each.
  pub fn keys(&self, version: Option<MetaVersion>) -> impl Iterator<Item = (&str, &BTreeSet<LicenseId>)> {
    let index = match version {
      None => &self.keys_all,
      Some(MetaVersion::V1) => &self.keys_v1,
      Some(MetaVersion::V2) => &self.keys_v2,
    };
    index.iter().map(|(key, ids)| (key.as_str(), ids))
  }

  /// Plugins that were enumerated but not registered.
  pub fn skipped(&self) -> &[PluginLoadError] {
    &self.skipped
  }

  pub fn len(&self) -> usize {
    self.definitions.len()
  }

  pub fn is_empty(&self) -> bool {
    self.definitions.is_empty()
  }

  /// Exact-match phrase entries for every canonical license name.
  ///
  /// Each definition contributes its name and, when the name contains a
  /// parenthetical, the name with that parenthetical removed. Names shared by
  /// several licenses (compared without case) become one entry resolving to
  /// all of them. Entries are ordered longest name first so the result does
  /// not depend on plugin enumeration order.
  pub fn name_phrases(&self) -> Vec<PhraseEntry> {
    let mut names: BTreeMap<String, (String, BTreeSet<LicenseId>)> = BTreeMap::new();

    for (id, definition) in &self.definitions {
      let full = definition.name.trim().to_string();
      let stripped = PARENTHETICAL.replacen(&full, 1, "").trim().to_string();

      for name in [full, stripped] {
        if name.is_empty() {
          continue;
        }
        names
          .entry(name.to_lowercase())
          .or_insert_with(|| (name.clone(), BTreeSet::new()))
          .1
          .insert(id.clone());
      }
    }

    let mut ordered: Vec<_> = names.into_values().collect();
    ordered.sort_by_key(|(name, _)| (Reverse(name.len()), name.to_lowercase()));

    ordered
      .into_iter()
      .filter_map(|(name, ids)| {
        if ids.len() > 1 {
          debug!(
            "License name '{}' is shared by {} licenses, keeping all as candidates",
            name,
            ids.len()
          );
        }
        let resolver = Resolver::from_ids(ids);
        match PhraseEntry::exact_name(&name, resolver) {
          Ok(entry) => Some(entry),
          Err(e) => {
            warn!("Skipping name pattern for '{}': {}", name, e);
            None
          }
        }
      })
      .collect()
  }
}

impl LicenseFactory for Catalog {
  fn create(&self, id: &LicenseId, params: LicenseParams) -> Result<License, GuessError> {
    let definition = self
      .definitions
      .get(id)
      .ok_or_else(|| GuessError::UnknownIdentifier(id.clone()))?;
    License::new(definition, params)
  }
}
