//! # Classifier Module
//!
//! This module contains the two ways the engine guesses a license:
//! - [`text`] - heuristic phrase matching over the license section of
//!   embedded documentation
//! - [`metadata`] - direct key lookup of the `license` field of a
//!   distribution metadata file
//!
//! Both implement [`LicenseClassifier`], so callers can pick one at runtime
//! without caring which it is.

pub mod metadata;
pub mod text;

pub use metadata::{MetadataClassifier, license_token};
pub use text::{TextClassifier, license_section};

use crate::guess::Guess;

/// Trait for license classifiers.
///
/// Implementations borrow the engine's immutable tables and are therefore
/// cheap to create and safe to share between threads.
pub trait LicenseClassifier: Send + Sync {
  /// Guesses the licenses that apply to `input`.
  ///
  /// # Returns
  ///
  /// The sorted, deduplicated candidates; empty when there is no guess.
  fn classify(&self, input: &str) -> Guess;
}
