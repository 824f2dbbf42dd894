//! Guessing from distribution metadata.
//!
//! The metadata is not parsed as a document. The first `license` field
//! assignment is found textually, which works the same for YAML and JSON
//! metadata, and its value is looked up as a key in the catalog. There are no
//! heuristics here: ambiguity can only come from several licenses sharing a
//! key.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use super::LicenseClassifier;
use crate::catalog::Catalog;
use crate::guess::Guess;

static LICENSE_FIELD: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r#"(?m)\b["']?license["']?\s*:\s*\[?\s*["']?([a-z_0-9]+)["']?"#).expect("license field pattern is valid")
});

/// The value of the first `license` field in `text`, if any.
///
/// Values are metadata keys: lowercase letters, digits and underscores. A
/// JSON list value yields its first element.
pub fn license_token(text: &str) -> Option<&str> {
  LICENSE_FIELD
    .captures(text)
    .and_then(|captures| captures.get(1))
    .map(|m| m.as_str())
}

/// Classifies metadata text by looking its license key up in a catalog.
#[derive(Debug, Clone, Copy)]
pub struct MetadataClassifier<'a> {
  catalog: &'a Catalog,
}

impl<'a> MetadataClassifier<'a> {
  pub const fn new(catalog: &'a Catalog) -> Self {
    Self { catalog }
  }
}

impl LicenseClassifier for MetadataClassifier<'_> {
  fn classify(&self, input: &str) -> Guess {
    let Some(token) = license_token(input) else {
      debug!("No license field found in metadata");
      return Guess::none();
    };
    debug!("Metadata declares license key '{}'", token);
    self.catalog.lookup(token, None)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_yaml_field() {
    assert_eq!(license_token("---\nname: Foo\nlicense: perl\nversion: 1.0\n"), Some("perl"));
    assert_eq!(license_token("license: 'gpl_3'\n"), Some("gpl_3"));
  }

  #[test]
  fn test_json_field() {
    assert_eq!(license_token(r#"{ "name": "Foo", "license": "mit" }"#), Some("mit"));
    assert_eq!(
      license_token("{\n   \"license\" : [\n      \"perl_5\"\n   ],\n}"),
      Some("perl_5")
    );
  }

  #[test]
  fn test_first_field_wins() {
    assert_eq!(license_token("license: bsd\nlicense: mit\n"), Some("bsd"));
  }

  #[test]
  fn test_no_field() {
    assert_eq!(license_token("name: Foo\nversion: 1.0\n"), None);
    assert_eq!(license_token("sublicense: mit\n"), None);
    assert_eq!(license_token("License: MIT\n"), None);
  }

  #[test]
  fn test_classify_looks_up_all_keys() {
    let catalog = Catalog::build(&crate::builtin::BuiltinCatalog);
    let classifier = MetadataClassifier::new(&catalog);

    assert_eq!(classifier.classify("license: gpl\n").to_string(), "GPL_1, GPL_2, GPL_3");
    assert_eq!(classifier.classify("license: gpl_2\n").to_string(), "GPL_2");
    assert!(classifier.classify("license: not_a_real_license\n").is_empty());
  }
}
