//! # licguess
//!
//! Guess which open-source license applies to a piece of software, from the
//! license section of its embedded documentation or from the `license` field
//! of its distribution metadata.
//!
//! Guessing is best effort: ambiguous input yields several candidates rather
//! than a confident wrong answer, and input that names no license yields an
//! empty [`Guess`].
//!
//! ## Usage as a Library
//!
//! ```rust
//! use licguess::LicenseParams;
//!
//! let pod = "=head1 LICENSE\n\nThis library is free software; you can redistribute it\n\
//!            and/or modify it under the same terms as Perl itself.\n";
//! assert_eq!(licguess::classify_from_text(pod).to_string(), "Perl_5");
//!
//! let gpl = licguess::lookup_by_key("gpl", Some("1"))?;
//! assert_eq!(gpl.to_string(), "GPL_1, GPL_2, GPL_3");
//!
//! let license = licguess::resolve_short_name("LGPL-2.1", LicenseParams::new("Jane Doe").year("2024"))?;
//! assert!(license.notice().starts_with("This software is Copyright (c) 2024 by Jane Doe."));
//! # Ok::<(), licguess::GuessError>(())
//! ```
//!
//! The free functions use a process-wide [`Engine`] over the compiled-in
//! licenses. Build your own with [`Engine::from_catalog`] to add licenses.
//!
//! ## Modules
//!
//! * [`catalog`] - Metadata-key indexes over the loaded license plugins
//! * [`phrases`] - The ordered phrase table behind text classification
//! * [`classifier`] - Text and metadata classifiers
//! * [`short_name`] - Short license names such as `GPL-2`
//! * [`engine`] - The engine bundling all of the above
//! * [`config`] - Configuration file support
//! * [`logging`] - Output helpers for the command-line tool

pub mod builtin;
pub mod catalog;
pub mod classifier;
pub mod config;
pub mod engine;
pub mod error;
pub mod guess;
pub mod license;
pub mod logging;
pub mod phrases;
pub mod plugin;
pub mod short_name;

pub use catalog::MetaVersion;
pub use engine::Engine;
pub use error::{GuessError, PluginLoadError};
pub use guess::Guess;
pub use license::{License, LicenseId, LicenseParams};

/// Guess the licenses named in the license section of documentation text.
pub fn classify_from_text(text: &str) -> Guess {
  Engine::global().classify_from_text(text)
}

/// Guess the licenses declared by the `license` field of metadata text.
pub fn classify_from_metadata(text: &str) -> Guess {
  Engine::global().classify_from_metadata(text)
}

/// Licenses registered under a metadata key; see [`Engine::lookup_by_key`].
pub fn lookup_by_key(key: &str, version: Option<&str>) -> Result<Guess, GuessError> {
  Engine::global().lookup_by_key(key, version)
}

/// Build the license a short name stands for; see
/// [`Engine::resolve_short_name`].
pub fn resolve_short_name(short_name: &str, params: LicenseParams) -> Result<License, GuessError> {
  Engine::global().resolve_short_name(short_name, params)
}

/// Build the license an SPDX identifier stands for; see
/// [`Engine::resolve_spdx_expression`].
pub fn resolve_spdx_expression(expression: &str, params: LicenseParams) -> Result<License, GuessError> {
  Engine::global().resolve_spdx_expression(expression, params)
}
