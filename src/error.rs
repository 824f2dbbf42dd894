//! # Error Module
//!
//! Failures surfaced by the classification engine.
//!
//! Not finding a license is never an error: classifiers return an empty
//! [`Guess`](crate::guess::Guess) for that. Everything here is a hard failure
//! the caller has to deal with, except [`PluginLoadError`], which the catalog
//! logs and skips.

use crate::license::LicenseId;

/// Error type for engine operations.
#[derive(Debug, thiserror::Error)]
pub enum GuessError {
  /// A single license was requested from a guess with several candidates.
  #[error("expected a single license but the guess has {} candidates: {}", .candidates.len(), join_ids(.candidates))]
  InvalidUsage { candidates: Vec<LicenseId> },

  /// An argument was outside the values the operation accepts.
  #[error("{0}")]
  InvalidArgument(String),

  /// The license factory has no definition for the identifier.
  #[error("unknown license identifier: {0}")]
  UnknownIdentifier(LicenseId),

  /// A short name did not resolve to a loadable license definition.
  #[error("unknown license with short name {short_name} ({source})")]
  UnknownLicense {
    short_name: String,
    #[source]
    source: Box<GuessError>,
  },

  /// No definition carries the SPDX identifier.
  #[error("unknown license with SPDX identifier {0}")]
  UnknownSpdx(String),
}

/// A license plugin that could not be loaded.
///
/// Catalog construction logs these and carries on with the remaining plugins.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("failed to load license plugin '{plugin}': {reason}")]
pub struct PluginLoadError {
  /// Identifier or position of the plugin, whatever the catalog could tell.
  pub plugin: String,
  pub reason: String,
}

impl PluginLoadError {
  pub fn new(plugin: impl Into<String>, reason: impl Into<String>) -> Self {
    Self {
      plugin: plugin.into(),
      reason: reason.into(),
    }
  }
}

fn join_ids(ids: &[LicenseId]) -> String {
  ids.iter().map(LicenseId::as_str).collect::<Vec<_>>().join(", ")
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_invalid_usage_lists_candidates() {
    let err = GuessError::InvalidUsage {
      candidates: vec![LicenseId::from("GPL_1"), LicenseId::from("GPL_2")],
    };
    assert_eq!(
      err.to_string(),
      "expected a single license but the guess has 2 candidates: GPL_1, GPL_2"
    );
  }

  #[test]
  fn test_unknown_license_names_short_name_and_cause() {
    let err = GuessError::UnknownLicense {
      short_name: "Foo-Bar".to_string(),
      source: Box::new(GuessError::UnknownIdentifier(LicenseId::from("Foo_Bar"))),
    };
    assert_eq!(
      err.to_string(),
      "unknown license with short name Foo-Bar (unknown license identifier: Foo_Bar)"
    );
  }
}
