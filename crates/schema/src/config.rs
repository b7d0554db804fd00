//! Schema service configuration.
//!
//! ```toml
//! repository-path = "/srv/annotations/repository"
//!
//! [registry]
//! resolution-policy = "first-registered"
//! ```

use std::path::{Path, PathBuf};

use codebook_feature_registry::RegistryConfig;
use serde::Deserialize;

/// Top-level configuration for the schema service and its registry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct SchemaConfig {
	/// Root directory of the annotation repository, if the host keeps one.
	pub repository_path: Option<PathBuf>,
	pub registry: RegistryConfig,
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
	#[error("failed to read {}: {source}", path.display())]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("TOML parse error: {0}")]
	Parse(#[from] toml::de::Error),
}

/// Parses configuration from a TOML string.
pub fn parse_config(input: &str) -> Result<SchemaConfig, ConfigError> {
	Ok(toml::from_str(input)?)
}

/// Reads and parses a configuration file.
pub fn load_config(path: &Path) -> Result<SchemaConfig, ConfigError> {
	let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
		path: path.to_path_buf(),
		source,
	})?;
	parse_config(&content)
}
