//! # Configuration Module
//!
//! Optional configuration for licguess: extra license definitions, which are
//! loaded as plugins next to the compiled-in ones, and extra short-name
//! aliases.
//!
//! Configuration can be specified in a `.licguess.toml` file or via the
//! `LICGUESS_CONFIG` environment variable.
//!
//! ```toml
//! [[licenses]]
//! identifier = "Acme_1_0"
//! name = "The Acme Public License 1.0"
//! meta-name = "open_source"
//! meta2-name = "acme_1"
//!
//! [short-names]
//! "Acme" = "Acme_1_0"
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::builtin::BuiltinCatalog;
use crate::engine::Engine;
use crate::plugin::{CompositeCatalog, DefinitionCatalog};
use crate::short_name::ShortNameTable;
use crate::verbose_log;

/// The default config file name.
pub const DEFAULT_CONFIG_FILENAME: &str = ".licguess.toml";

/// Environment variable for specifying config file path.
pub const CONFIG_ENV_VAR: &str = "LICGUESS_CONFIG";

/// Main configuration struct for licguess.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Config {
  /// Extra license definitions.
  ///
  /// Kept as raw TOML so that one broken entry only skips that license
  /// instead of rejecting the whole file.
  #[serde(default)]
  pub licenses: Vec<toml::Value>,

  /// Extra short-name aliases, short name to license identifier.
  #[serde(default)]
  pub short_names: BTreeMap<String, String>,

  /// Where the configuration was loaded from, for diagnostics.
  #[serde(skip)]
  pub origin: Option<PathBuf>,
}

/// Error type for configuration operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
  /// The config file could not be read.
  #[error("Failed to read config file '{path}': {source}")]
  ReadError { path: PathBuf, source: std::io::Error },

  /// The config file contains invalid TOML.
  #[error("Failed to parse config file '{path}': {source}")]
  ParseError { path: PathBuf, source: toml::de::Error },

  /// A short-name alias is unusable.
  #[error("Invalid short name alias '{short_name}': {message}")]
  InvalidShortName { short_name: String, message: String },
}

impl Config {
  /// Load configuration from a file.
  ///
  /// # Errors
  ///
  /// Fails when the file cannot be read, is not valid TOML, or declares an
  /// unusable short-name alias. Broken `[[licenses]]` entries are not errors
  /// here; they are reported when the engine loads them.
  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    verbose_log!("Loading config from: {}", path.display());

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
      path: path.to_path_buf(),
      source: e,
    })?;

    let mut config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
      path: path.to_path_buf(),
      source: e,
    })?;

    config.validate()?;
    config.origin = Some(path.to_path_buf());

    verbose_log!(
      "Loaded {} license definitions and {} short name aliases",
      config.licenses.len(),
      config.short_names.len()
    );

    Ok(config)
  }

  fn validate(&self) -> Result<(), ConfigError> {
    for (short_name, identifier) in &self.short_names {
      if short_name.trim().is_empty() {
        return Err(ConfigError::InvalidShortName {
          short_name: short_name.clone(),
          message: "short name cannot be empty".to_string(),
        });
      }

      if identifier.is_empty() || !identifier.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(ConfigError::InvalidShortName {
          short_name: short_name.clone(),
          message: format!("'{identifier}' is not a license identifier"),
        });
      }
    }

    Ok(())
  }

  /// The compiled-in licenses followed by the configured ones.
  ///
  /// Compiled-in definitions win when an identifier appears in both.
  pub fn plugin_catalog(&self) -> CompositeCatalog {
    let origin = self
      .origin
      .as_ref()
      .map_or_else(|| "config".to_string(), |path| path.display().to_string());

    CompositeCatalog::new()
      .with(BuiltinCatalog)
      .with(DefinitionCatalog::new(origin, self.licenses.clone()))
  }

  /// The compiled-in short names extended with the configured aliases.
  pub fn short_name_table(&self) -> ShortNameTable {
    ShortNameTable::builtin().with_aliases(self.short_names.clone())
  }

  /// An engine over everything this configuration adds.
  pub fn engine(&self) -> Engine {
    Engine::from_catalog(&self.plugin_catalog()).with_short_names(self.short_name_table())
  }
}

/// Discover the configuration file path.
///
/// The configuration file is discovered in the following order:
/// 1. Path specified via `--config` flag (passed as `explicit_path`)
/// 2. Path specified via `LICGUESS_CONFIG` environment variable
/// 3. `.licguess.toml` in the working directory
///
/// An explicit path is returned even when it does not exist, so that loading
/// it reports the problem instead of silently running without it.
pub fn discover_config_path(explicit_path: Option<&Path>, working_dir: &Path) -> Option<PathBuf> {
  if let Some(path) = explicit_path {
    verbose_log!("Using explicit config path: {}", path.display());
    return Some(path.to_path_buf());
  }

  if let Ok(env_path) = std::env::var(CONFIG_ENV_VAR) {
    let path = PathBuf::from(&env_path);
    if path.exists() {
      verbose_log!("Using config from {}: {}", CONFIG_ENV_VAR, path.display());
      return Some(path);
    }
    verbose_log!("{} path does not exist: {}", CONFIG_ENV_VAR, env_path);
  }

  let local_config = working_dir.join(DEFAULT_CONFIG_FILENAME);
  if local_config.exists() {
    verbose_log!("Using config: {}", local_config.display());
    return Some(local_config);
  }

  verbose_log!("No config file found");
  None
}

/// Load configuration from the discovered path.
///
/// # Returns
///
/// `None` when discovery is disabled or finds nothing.
pub fn load_config(explicit_path: Option<&Path>, working_dir: &Path, no_config: bool) -> Result<Option<Config>> {
  if no_config {
    verbose_log!("Config file discovery disabled (--no-config)");
    return Ok(None);
  }

  match discover_config_path(explicit_path, working_dir) {
    Some(path) => {
      let config = Config::load(&path).with_context(|| format!("Failed to load config from {}", path.display()))?;
      Ok(Some(config))
    }
    None => Ok(None),
  }
}

#[cfg(test)]
mod tests {
  use tempfile::TempDir;

  use super::*;
  use crate::license::LicenseParams;

  const ACME_CONFIG: &str = concat!(
    "[[licenses]]\n",
    "identifier = \"Acme_1_0\"\n",
    "name = \"The Acme Public License 1.0\"\n",
    "meta-name = \"open_source\"\n",
    "meta2-name = \"acme_1\"\n",
    "spdx = \"Acme-1.0\"\n",
    "\n",
    "[short-names]\n",
    "\"Acme\" = \"Acme_1_0\"\n",
  );

  #[test]
  fn test_parse_valid_config() {
    let config: Config = toml::from_str(ACME_CONFIG).expect("valid config should parse");

    assert_eq!(config.licenses.len(), 1);
    assert_eq!(config.short_names.get("Acme").map(String::as_str), Some("Acme_1_0"));
    assert!(config.origin.is_none());
  }

  #[test]
  fn test_parse_empty_config() {
    let config: Config = toml::from_str("").expect("empty config should parse");

    assert!(config.licenses.is_empty());
    assert!(config.short_names.is_empty());
  }

  #[test]
  fn test_unknown_section_is_rejected() {
    let result: Result<Config, _> = toml::from_str("[comment-styles]\nrs = 1\n");
    assert!(result.is_err());
  }

  #[test]
  fn test_validate_short_name_target() {
    let config = Config {
      short_names: BTreeMap::from([("Acme".to_string(), "Acme-1.0".to_string())]),
      ..Config::default()
    };

    let err = config.validate().expect_err("should fail");
    assert!(matches!(err, ConfigError::InvalidShortName { .. }));
  }

  #[test]
  fn test_load_config_from_file() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let config_path = temp_dir.path().join(DEFAULT_CONFIG_FILENAME);
    std::fs::write(&config_path, ACME_CONFIG).expect("write config");

    let config = Config::load(&config_path).expect("load should succeed");
    assert_eq!(config.origin.as_deref(), Some(config_path.as_path()));
  }

  #[test]
  fn test_load_config_file_not_found() {
    let result = Config::load(Path::new("/nonexistent/path/.licguess.toml"));
    assert!(matches!(
      result.expect_err("should fail"),
      ConfigError::ReadError { .. }
    ));
  }

  #[test]
  fn test_load_config_invalid_toml() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let config_path = temp_dir.path().join(DEFAULT_CONFIG_FILENAME);
    std::fs::write(&config_path, "[[licenses]\n").expect("write config");

    let result = Config::load(&config_path);
    assert!(matches!(
      result.expect_err("should fail"),
      ConfigError::ParseError { .. }
    ));
  }

  #[test]
  fn test_discover_config_explicit_path() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let config_path = temp_dir.path().join("custom-config.toml");

    let result = discover_config_path(Some(&config_path), temp_dir.path());
    assert_eq!(result, Some(config_path));
  }

  #[test]
  fn test_discover_config_working_dir() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let config_path = temp_dir.path().join(DEFAULT_CONFIG_FILENAME);
    std::fs::write(&config_path, "").expect("write config");

    let result = discover_config_path(None, temp_dir.path());
    assert_eq!(result, Some(config_path));
  }

  #[test]
  fn test_load_config_disabled() {
    let temp_dir = TempDir::new().expect("create temp dir");
    std::fs::write(temp_dir.path().join(DEFAULT_CONFIG_FILENAME), ACME_CONFIG).expect("write config");

    let config = load_config(None, temp_dir.path(), true).expect("disabled discovery never fails");
    assert!(config.is_none());
  }

  #[test]
  fn test_engine_includes_configured_licenses() {
    let config: Config = toml::from_str(ACME_CONFIG).expect("valid config should parse");
    let engine = config.engine();

    assert!(engine.lookup_by_key("acme_1", Some("2")).expect("valid version").contains("Acme_1_0"));
    assert!(engine.lookup_by_key("mit", None).expect("no version").contains("MIT"));

    let license = engine
      .resolve_short_name("Acme", LicenseParams::new("Acme Corp"))
      .expect("configured alias");
    assert_eq!(license.id, "Acme_1_0");

    let guess = engine.classify_from_text("=head1 LICENSE\n\nThe Acme Public License 1.0 applies.\n");
    assert_eq!(guess.to_string(), "Acme_1_0");
  }

  #[test]
  fn test_broken_license_entry_is_skipped() {
    let config: Config = toml::from_str(concat!(
      "[[licenses]]\n",
      "identifier = \"Half\"\n",
      "name = \"Half a definition\"\n",
    ))
    .expect("valid toml");
    let engine = config.engine();

    assert_eq!(engine.catalog().skipped().len(), 1);
    assert!(engine.catalog().definition(&"Half".into()).is_none());
  }
}
