use crate::error::Result;
use crate::transform::Separator;
use serde::Deserialize;
use std::path::PathBuf;

/// Top-level configuration from a `.urifs.toml` file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
	/// If true, stop the directory cascade here and only add ~/.urifs.toml.
	#[serde(default)]
	pub root: bool,

	/// Environment variable name that, if truthy, skips ~/.urifs.toml lookup.
	#[serde(default)]
	pub user_config_disable_env_var: Option<String>,

	/// Single-character separator used to join path segments.
	pub separator: Option<String>,

	/// Run the validation layer around every mapping.
	pub strict: Option<bool>,

	/// Default store root for `urifs list`. Relative to this file.
	pub store: Option<PathBuf>,
}

impl Config {
	/// Validate field values that serde cannot check on its own.
	pub fn validate(&self) -> Result<()> {
		if let Some(ref separator) = self.separator {
			Separator::parse(separator)?;
		}
		Ok(())
	}
}

/// A loaded configuration with its source path for debugging/display.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
	/// The parsed configuration.
	pub config: Config,

	/// The path this config was loaded from.
	pub path: PathBuf,
}

/// Effective settings after merging the cascade.
#[derive(Debug, Clone, Default)]
pub struct MergedConfig {
	pub separator: Separator,

	pub strict: bool,

	/// Store root, already resolved against the config that set it.
	pub store: Option<PathBuf>,

	/// Config files that contributed, most specific first.
	pub sources: Vec<PathBuf>,
}
