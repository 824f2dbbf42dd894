//! # Short Name Module
//!
//! Resolution of short license names such as `GPL-2`, `LGPL-2.1` or
//! `Artistic` to license objects.
//!
//! Most short names map onto an identifier by replacing `-` and `.` with `_`.
//! The table here covers the abbreviations where that is ambiguous or wrong.
//! A trailing `+` asks for the "or later" variant.

use std::collections::BTreeMap;

use tracing::debug;

use crate::error::GuessError;
use crate::license::{License, LicenseFactory, LicenseId, LicenseParams};

const SHORT_NAMES: &[(&str, &str)] = &[
  ("GPL-1", "GPL_1"),
  ("GPL-2", "GPL_2"),
  ("GPL-3", "GPL_3"),
  ("LGPL-2", "LGPL_2"),
  ("LGPL-2.1", "LGPL_2_1"),
  ("LGPL-3", "LGPL_3_0"),
  ("LGPL-3.0", "LGPL_3_0"),
  ("AGPL-3", "AGPL_3"),
  ("Artistic", "Artistic_1_0"),
  ("Artistic-1", "Artistic_1_0"),
  ("Artistic-1.0", "Artistic_1_0"),
  ("Artistic-2", "Artistic_2_0"),
  ("Artistic-2.0", "Artistic_2_0"),
  ("Perl", "Perl_5"),
  ("Perl-5", "Perl_5"),
  ("Apache-1.1", "Apache_1_1"),
  ("Apache-2", "Apache_2_0"),
  ("Apache-2.0", "Apache_2_0"),
  ("MPL-1.0", "Mozilla_1_0"),
  ("MPL-1.1", "Mozilla_1_1"),
  ("MPL-2.0", "Mozilla_2_0"),
  ("CC0", "CC0_1_0"),
  ("CC0-1.0", "CC0_1_0"),
  ("EUPL-1.1", "EUPL_1_1"),
  ("EUPL-1.2", "EUPL_1_2"),
  ("GFDL-1.2", "GFDL_1_2"),
  ("GFDL-1.3", "GFDL_1_3"),
  ("QPL-1.0", "QPL_1_0"),
];

/// The identifier a short name maps to when no table entry covers it.
pub fn fallback_identifier(short_name: &str) -> LicenseId {
  LicenseId::new(short_name.replace(['-', '.'], "_"))
}

/// Short name to identifier aliases.
#[derive(Debug, Clone)]
pub struct ShortNameTable {
  aliases: BTreeMap<String, LicenseId>,
}

impl Default for ShortNameTable {
  fn default() -> Self {
    Self::builtin()
  }
}

impl ShortNameTable {
  /// The compiled-in aliases.
  pub fn builtin() -> Self {
    Self {
      aliases: SHORT_NAMES
        .iter()
        .map(|(name, id)| ((*name).to_string(), LicenseId::from(*id)))
        .collect(),
    }
  }

  /// Adds `aliases`, replacing compiled-in entries with the same short name.
  pub fn with_aliases<I, K, V>(mut self, aliases: I) -> Self
  where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<LicenseId>,
  {
    self
      .aliases
      .extend(aliases.into_iter().map(|(name, id)| (name.into(), id.into())));
    self
  }

  /// The identifier `short_name` stands for, without any `+` suffix handling.
  pub fn resolve_id(&self, short_name: &str) -> LicenseId {
    self
      .aliases
      .get(short_name)
      .cloned()
      .unwrap_or_else(|| fallback_identifier(short_name))
  }

  pub fn iter(&self) -> impl Iterator<Item = (&str, &LicenseId)> {
    self.aliases.iter().map(|(name, id)| (name.as_str(), id))
  }

  pub fn len(&self) -> usize {
    self.aliases.len()
  }

  pub fn is_empty(&self) -> bool {
    self.aliases.is_empty()
  }

  /// Build the license `short_name` stands for through `factory`.
  ///
  /// A trailing `+` (`GPL-2+`) sets `or_later` on top of `params`.
  ///
  /// # Errors
  ///
  /// * [`GuessError::InvalidArgument`] when `short_name` is empty or the
  ///   parameters are unusable for the license
  /// * [`GuessError::UnknownLicense`] when the factory does not know the
  ///   identifier the short name maps to
  pub fn resolve(
    &self,
    short_name: &str,
    params: LicenseParams,
    factory: &dyn LicenseFactory,
  ) -> Result<License, GuessError> {
    let short_name = short_name.trim();
    let (base, params) = match short_name.strip_suffix('+') {
      Some(base) => (base.trim_end(), params.or_later(true)),
      None => (short_name, params),
    };
    if base.is_empty() {
      return Err(GuessError::InvalidArgument("no license short name specified".to_string()));
    }

    let id = self.resolve_id(base);
    debug!("Short name '{}' resolves to {}", short_name, id);

    factory.create(&id, params).map_err(|e| match e {
      GuessError::UnknownIdentifier(_) => GuessError::UnknownLicense {
        short_name: short_name.to_string(),
        source: Box::new(e),
      },
      other => other,
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::builtin::BuiltinCatalog;
  use crate::catalog::Catalog;

  #[test]
  fn test_fallback_identifier() {
    assert_eq!(fallback_identifier("LGPL-2.1"), "LGPL_2_1");
    assert_eq!(fallback_identifier("MIT"), "MIT");
    assert_eq!(fallback_identifier("Foo-Bar"), "Foo_Bar");
  }

  #[test]
  fn test_table_takes_precedence_over_fallback() {
    let table = ShortNameTable::builtin();

    assert_eq!(table.resolve_id("LGPL-3"), "LGPL_3_0");
    assert_eq!(table.resolve_id("Artistic"), "Artistic_1_0");
    assert_eq!(table.resolve_id("MPL-2.0"), "Mozilla_2_0");
    assert_eq!(table.resolve_id("BSD"), "BSD");
  }

  #[test]
  fn test_aliases_extend_and_override() {
    let table = ShortNameTable::builtin().with_aliases([("Acme", "Acme_1_0"), ("Artistic", "Artistic_2_0")]);

    assert_eq!(table.resolve_id("Acme"), "Acme_1_0");
    assert_eq!(table.resolve_id("Artistic"), "Artistic_2_0");
    assert_eq!(table.len(), ShortNameTable::builtin().len() + 1);
  }

  #[test]
  fn test_resolve_builds_license() {
    let catalog = Catalog::build(&BuiltinCatalog);
    let table = ShortNameTable::builtin();

    let license = table
      .resolve("LGPL-2.1", LicenseParams::new("Jane Doe").year("2020"), &catalog)
      .expect("LGPL-2.1 is known");
    assert_eq!(license.id, "LGPL_2_1");
    assert!(!license.or_later);

    let license = table
      .resolve("GPL-2+", LicenseParams::new("Jane Doe"), &catalog)
      .expect("GPL-2+ is known");
    assert_eq!(license.id, "GPL_2");
    assert!(license.or_later);
  }

  #[test]
  fn test_resolve_errors() {
    let catalog = Catalog::build(&BuiltinCatalog);
    let table = ShortNameTable::builtin();

    let err = table
      .resolve("", LicenseParams::new("Jane Doe"), &catalog)
      .expect_err("empty short name");
    assert_eq!(err.to_string(), "no license short name specified");

    for bare_suffix in ["+", " + "] {
      let err = table
        .resolve(bare_suffix, LicenseParams::new("Jane Doe"), &catalog)
        .expect_err("suffix without a name");
      assert!(matches!(err, GuessError::InvalidArgument(ref m) if m == "no license short name specified"));
    }

    let err = table
      .resolve("Foo-Bar", LicenseParams::new("Jane Doe"), &catalog)
      .expect_err("unknown short name");
    match err {
      GuessError::UnknownLicense { short_name, source } => {
        assert_eq!(short_name, "Foo-Bar");
        assert!(matches!(*source, GuessError::UnknownIdentifier(ref id) if id == "Foo_Bar"));
      }
      other => panic!("expected UnknownLicense, got {other:?}"),
    }

    let err = table
      .resolve("MIT+", LicenseParams::new("Jane Doe"), &catalog)
      .expect_err("MIT has no or-later variant");
    assert!(matches!(err, GuessError::InvalidArgument(_)));
  }
}
