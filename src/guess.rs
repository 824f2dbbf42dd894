//! # Guess Module
//!
//! [`Guess`] is the result of every classification: a sorted, deduplicated
//! list of candidate identifiers. Empty means "no guess".

use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;

use crate::error::GuessError;
use crate::license::LicenseId;

/// Candidate licenses, sorted and without duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Guess(Vec<LicenseId>);

impl Guess {
  /// The "no guess" outcome.
  pub const fn none() -> Self {
    Self(Vec::new())
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  pub fn len(&self) -> usize {
    self.0.len()
  }

  pub fn iter(&self) -> std::slice::Iter<'_, LicenseId> {
    self.0.iter()
  }

  pub fn as_slice(&self) -> &[LicenseId] {
    &self.0
  }

  pub fn into_vec(self) -> Vec<LicenseId> {
    self.0
  }

  pub fn contains(&self, id: &str) -> bool {
    self.0.iter().any(|candidate| candidate == id)
  }

  /// Collapse the guess to a single license.
  ///
  /// Returns `Ok(None)` for no guess and `Ok(Some(id))` for exactly one
  /// candidate.
  ///
  /// # Errors
  ///
  /// [`GuessError::InvalidUsage`] when there is more than one candidate. The
  /// first candidate is never picked silently.
  pub fn single(&self) -> Result<Option<&LicenseId>, GuessError> {
    match self.0.as_slice() {
      [] => Ok(None),
      [only] => Ok(Some(only)),
      candidates => Err(GuessError::InvalidUsage {
        candidates: candidates.to_vec(),
      }),
    }
  }
}

impl FromIterator<LicenseId> for Guess {
  fn from_iter<I: IntoIterator<Item = LicenseId>>(iter: I) -> Self {
    let unique: BTreeSet<LicenseId> = iter.into_iter().collect();
    Self(unique.into_iter().collect())
  }
}

impl<'a> FromIterator<&'a LicenseId> for Guess {
  fn from_iter<I: IntoIterator<Item = &'a LicenseId>>(iter: I) -> Self {
    iter.into_iter().cloned().collect()
  }
}

impl IntoIterator for Guess {
  type Item = LicenseId;
  type IntoIter = std::vec::IntoIter<LicenseId>;

  fn into_iter(self) -> Self::IntoIter {
    self.0.into_iter()
  }
}

impl<'a> IntoIterator for &'a Guess {
  type Item = &'a LicenseId;
  type IntoIter = std::slice::Iter<'a, LicenseId>;

  fn into_iter(self) -> Self::IntoIter {
    self.0.iter()
  }
}

impl fmt::Display for Guess {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let mut first = true;
    for id in &self.0 {
      if !first {
        f.write_str(", ")?;
      }
      f.write_str(id.as_str())?;
      first = false;
    }
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn guess(ids: &[&str]) -> Guess {
    ids.iter().map(|id| LicenseId::from(*id)).collect()
  }

  #[test]
  fn test_collect_sorts_and_dedups() {
    let g = guess(&["GPL_3", "GPL_1", "GPL_3", "GPL_2"]);
    assert_eq!(g.to_string(), "GPL_1, GPL_2, GPL_3");
    assert_eq!(g.len(), 3);
  }

  #[test]
  fn test_single() {
    assert!(matches!(Guess::none().single(), Ok(None)));

    let one = guess(&["MIT"]);
    assert_eq!(one.single().expect("one candidate").map(LicenseId::as_str), Some("MIT"));

    let many = guess(&["Artistic_1_0", "Artistic_2_0"]);
    let err = many.single().expect_err("two candidates");
    assert!(matches!(err, GuessError::InvalidUsage { ref candidates } if candidates.len() == 2));
  }

  #[test]
  fn test_serializes_as_list() {
    let g = guess(&["Perl_5"]);
    assert_eq!(serde_json::to_string(&g).expect("serialize"), r#"["Perl_5"]"#);
  }
}
