//! # License Module
//!
//! Identifiers, definitions and constructed license objects.
//!
//! - [`LicenseId`] names one license variant (`GPL_2`, `Perl_5`, ...)
//! - [`LicenseDefinition`] is the snapshot the catalog keeps for every plugin
//!   it loaded
//! - [`License`] is a definition bound to a copyright holder and year, built
//!   through a [`LicenseFactory`]

use std::fmt;

use chrono::Datelike;
use serde::{Deserialize, Serialize};

use crate::error::GuessError;
use crate::plugin::LicensePlugin;

/// Opaque token identifying one license variant.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LicenseId(String);

impl LicenseId {
  pub fn new(id: impl Into<String>) -> Self {
    Self(id.into())
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl fmt::Display for LicenseId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

impl AsRef<str> for LicenseId {
  fn as_ref(&self) -> &str {
    &self.0
  }
}

impl From<&str> for LicenseId {
  fn from(id: &str) -> Self {
    Self(id.to_string())
  }
}

impl From<String> for LicenseId {
  fn from(id: String) -> Self {
    Self(id)
  }
}

impl PartialEq<str> for LicenseId {
  fn eq(&self, other: &str) -> bool {
    self.0 == other
  }
}

impl PartialEq<&str> for LicenseId {
  fn eq(&self, other: &&str) -> bool {
    self.0 == *other
  }
}

/// Everything the catalog knows about one license definition.
///
/// Built-in definitions are converted into this form when the catalog is
/// built; definitions from a configuration file deserialize straight into it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct LicenseDefinition {
  /// Identifier the definition registers under.
  pub identifier: String,
  /// Canonical display name, e.g. "The GNU General Public License, Version 2, June 1991".
  pub name: String,
  /// Key used by v1-style distribution metadata.
  pub meta_name: String,
  /// Key used by v2-style distribution metadata.
  pub meta2_name: String,
  /// SPDX expression for the license, when one exists.
  #[serde(default)]
  pub spdx: Option<String>,
  /// Canonical URL of the license text.
  #[serde(default)]
  pub url: Option<String>,
  /// Whether an "or any later version" grant is meaningful for this license.
  #[serde(default)]
  pub or_later: bool,
}

impl LicenseDefinition {
  /// Snapshot a plugin into an owned definition.
  pub fn from_plugin(plugin: &dyn LicensePlugin) -> Self {
    Self {
      identifier: plugin.identifier().to_string(),
      name: plugin.canonical_name().to_string(),
      meta_name: plugin.v1_key().to_string(),
      meta2_name: plugin.v2_key().to_string(),
      spdx: plugin.spdx_expression().map(str::to_string),
      url: plugin.url().map(str::to_string),
      or_later: plugin.allows_or_later(),
    }
  }

  pub fn id(&self) -> LicenseId {
    LicenseId::new(self.identifier.clone())
  }
}

impl LicensePlugin for LicenseDefinition {
  fn identifier(&self) -> &str {
    &self.identifier
  }

  fn v1_key(&self) -> &str {
    &self.meta_name
  }

  fn v2_key(&self) -> &str {
    &self.meta2_name
  }

  fn canonical_name(&self) -> &str {
    &self.name
  }

  fn spdx_expression(&self) -> Option<&str> {
    self.spdx.as_deref()
  }

  fn url(&self) -> Option<&str> {
    self.url.as_deref()
  }

  fn allows_or_later(&self) -> bool {
    self.or_later
  }
}

/// Construction parameters for a [`License`].
///
/// # Fields
///
/// * `holder` - The copyright holder named in the notice
/// * `year` - Copyright year(s); the current year when `None`
/// * `program` - Name of the licensed program, if the notice should mention it
/// * `or_later` - Grant "this version or any later version"
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LicenseParams {
  pub holder: String,
  pub year: Option<String>,
  pub program: Option<String>,
  pub or_later: bool,
}

impl LicenseParams {
  pub fn new(holder: impl Into<String>) -> Self {
    Self {
      holder: holder.into(),
      ..Self::default()
    }
  }

  pub fn year(mut self, year: impl Into<String>) -> Self {
    self.year = Some(year.into());
    self
  }

  pub fn program(mut self, program: impl Into<String>) -> Self {
    self.program = Some(program.into());
    self
  }

  pub fn or_later(mut self, or_later: bool) -> Self {
    self.or_later = or_later;
    self
  }
}

/// A license definition bound to a holder and year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct License {
  pub id: LicenseId,
  pub name: String,
  pub meta_name: String,
  pub meta2_name: String,
  pub spdx: Option<String>,
  pub url: Option<String>,
  pub holder: String,
  pub year: String,
  pub program: Option<String>,
  pub or_later: bool,
}

impl License {
  /// Bind `definition` to the construction parameters.
  ///
  /// Fails when the holder is empty, or when `or_later` is requested for a
  /// license that has no "or later" variant.
  pub fn new(definition: &LicenseDefinition, params: LicenseParams) -> Result<Self, GuessError> {
    let holder = params.holder.trim();
    if holder.is_empty() {
      return Err(GuessError::InvalidArgument(format!(
        "no copyright holder specified for license {}",
        definition.identifier
      )));
    }

    if params.or_later && !definition.or_later {
      return Err(GuessError::InvalidArgument(format!(
        "license {} does not support an or-later grant",
        definition.identifier
      )));
    }

    let year = params
      .year
      .filter(|y| !y.trim().is_empty())
      .unwrap_or_else(|| chrono::Local::now().year().to_string());

    Ok(Self {
      id: definition.id(),
      name: definition.name.clone(),
      meta_name: definition.meta_name.clone(),
      meta2_name: definition.meta2_name.clone(),
      spdx: definition.spdx.clone(),
      url: definition.url.clone(),
      holder: holder.to_string(),
      year,
      program: params.program.filter(|p| !p.trim().is_empty()),
      or_later: params.or_later,
    })
  }

  /// The SPDX expression for this particular grant.
  ///
  /// An or-later grant turns `GPL-2.0` into `GPL-2.0-or-later`. Compound
  /// expressions are returned as they are.
  pub fn spdx_expression(&self) -> Option<String> {
    let spdx = self.spdx.as_deref()?;
    if spdx.contains(' ') {
      return Some(spdx.to_string());
    }
    if self.or_later {
      Some(format!("{spdx}-or-later"))
    } else {
      Some(spdx.to_string())
    }
  }

  /// Render the short copyright notice for this license.
  pub fn notice(&self) -> String {
    let subject = match self.program {
      Some(ref program) => format!("{program} is Copyright (c) {} by {}.", self.year, self.holder),
      None => format!("This software is Copyright (c) {} by {}.", self.year, self.holder),
    };
    let later = if self.or_later {
      "\n\nYou may also redistribute it under any later version of this license."
    } else {
      ""
    };
    format!(
      "{subject}\n\nThis is free software, licensed under:\n\n  {}{later}\n",
      self.name
    )
  }
}

/// Builds license objects from identifiers.
///
/// The catalog is the crate's only implementation, but callers that hold
/// license definitions elsewhere can plug in their own.
pub trait LicenseFactory: Send + Sync {
  /// Construct the license registered under `id`.
  ///
  /// # Errors
  ///
  /// [`GuessError::UnknownIdentifier`] when no definition is registered under
  /// `id`; [`GuessError::InvalidArgument`] when the parameters are unusable.
  fn create(&self, id: &LicenseId, params: LicenseParams) -> Result<License, GuessError>;
}

#[cfg(test)]
mod tests {
  use super::*;

  fn gpl2() -> LicenseDefinition {
    LicenseDefinition {
      identifier: "GPL_2".to_string(),
      name: "The GNU General Public License, Version 2, June 1991".to_string(),
      meta_name: "gpl".to_string(),
      meta2_name: "gpl_2".to_string(),
      spdx: Some("GPL-2.0".to_string()),
      url: Some("https://www.gnu.org/licenses/old-licenses/gpl-2.0.txt".to_string()),
      or_later: true,
    }
  }

  #[test]
  fn test_notice_with_holder_and_year() {
    let license = License::new(&gpl2(), LicenseParams::new("Jane Doe").year("2019")).expect("valid params");

    assert_eq!(license.id, "GPL_2");
    assert_eq!(
      license.notice(),
      "This software is Copyright (c) 2019 by Jane Doe.\n\nThis is free software, licensed under:\n\n  The GNU General Public License, Version 2, June 1991\n"
    );
  }

  #[test]
  fn test_notice_names_program() {
    let license =
      License::new(&gpl2(), LicenseParams::new("Jane Doe").year("2020").program("Frobnicator")).expect("valid params");

    assert!(license.notice().starts_with("Frobnicator is Copyright (c) 2020 by Jane Doe."));
  }

  #[test]
  fn test_year_defaults_to_current() {
    let license = License::new(&gpl2(), LicenseParams::new("Jane Doe")).expect("valid params");
    assert_eq!(license.year, chrono::Local::now().year().to_string());
  }

  #[test]
  fn test_empty_holder_is_rejected() {
    let err = License::new(&gpl2(), LicenseParams::new("  ")).expect_err("empty holder");
    assert!(matches!(err, GuessError::InvalidArgument(_)));
  }

  #[test]
  fn test_or_later_grant() {
    let license = License::new(&gpl2(), LicenseParams::new("Jane Doe").or_later(true)).expect("valid params");

    assert_eq!(license.spdx_expression().as_deref(), Some("GPL-2.0-or-later"));
    assert!(license.notice().contains("any later version"));

    let mit = LicenseDefinition {
      identifier: "MIT".to_string(),
      name: "The MIT (X11) License".to_string(),
      meta_name: "mit".to_string(),
      meta2_name: "mit".to_string(),
      spdx: Some("MIT".to_string()),
      url: None,
      or_later: false,
    };
    let err = License::new(&mit, LicenseParams::new("Jane Doe").or_later(true)).expect_err("mit has no later versions");
    assert!(err.to_string().contains("MIT"));
  }

  #[test]
  fn test_license_id_compares_with_str() {
    let id = LicenseId::from("Perl_5");
    assert_eq!(id, "Perl_5");
    assert_eq!(id.to_string(), "Perl_5");
  }
}
