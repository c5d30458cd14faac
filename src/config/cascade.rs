use crate::config::parser::parse_config_file;
use crate::config::types::{LoadedConfig, MergedConfig};
use crate::error::{Result, UrifsError};
use crate::transform::Separator;
use std::path::{Path, PathBuf};

/// Name of the per-directory config file.
pub const CONFIG_FILE_NAME: &str = ".urifs.toml";

/// Discover and load all config files in the cascade.
///
/// The cascade order is:
/// 1. Start from `start_dir` and look for `.urifs.toml`
/// 2. Continue up the directory tree, stopping after a config with `root = true`
/// 3. Finally, check ~/.urifs.toml (unless disabled by env var)
///
/// Returns configs in cascade order (most specific first).
pub fn discover_configs(start_dir: &Path) -> Result<Vec<LoadedConfig>> {
	let mut configs = discover_local_configs(start_dir)?;

	if user_config_disabled(&configs) {
		tracing::debug!("user config lookup disabled by environment");
		return Ok(configs);
	}

	let user_path = user_config_path()?;
	let already_loaded = configs.iter().any(|loaded| loaded.path == user_path);
	if !already_loaded && user_path.exists() {
		tracing::debug!(path = %user_path.display(), "loading user config");
		configs.push(LoadedConfig {
			config: parse_config_file(&user_path)?,
			path: user_path,
		});
	}

	Ok(configs)
}

/// Walk from `start_dir` upwards collecting `.urifs.toml` files.
fn discover_local_configs(start_dir: &Path) -> Result<Vec<LoadedConfig>> {
	let mut configs = Vec::new();
	let mut current_dir = Some(start_dir);

	while let Some(dir) = current_dir {
		let config_path = dir.join(CONFIG_FILE_NAME);

		if config_path.exists() {
			tracing::debug!(path = %config_path.display(), "found config");
			let config = parse_config_file(&config_path)?;
			let stop = config.root;

			configs.push(LoadedConfig {
				config,
				path: config_path,
			});

			if stop {
				break;
			}
		}

		current_dir = dir.parent();
	}

	Ok(configs)
}

/// Whether any loaded config names an env var that is currently truthy.
fn user_config_disabled(configs: &[LoadedConfig]) -> bool {
	configs.iter().any(|loaded| {
		loaded
			.config
			.user_config_disable_env_var
			.as_deref()
			.is_some_and(is_env_truthy)
	})
}

/// Check if an environment variable is set to a truthy value.
fn is_env_truthy(var_name: &str) -> bool {
	match std::env::var(var_name) {
		Ok(value) => {
			let lower = value.to_lowercase();
			!value.is_empty() && lower != "0" && lower != "false" && lower != "no"
		}
		Err(_) => false,
	}
}

/// Merge configs into effective settings.
///
/// For every key the most specific config that sets it wins. A relative
/// `store` is resolved against the directory holding its config file.
pub fn merge_configs(configs: &[LoadedConfig]) -> Result<MergedConfig> {
	let mut separator = None;
	let mut strict = None;
	let mut store = None;
	let mut sources = Vec::with_capacity(configs.len());

	for loaded in configs {
		sources.push(loaded.path.clone());

		if separator.is_none()
			&& let Some(ref value) = loaded.config.separator
		{
			separator = Some(Separator::parse(value)?);
		}

		if strict.is_none() {
			strict = loaded.config.strict;
		}

		if store.is_none()
			&& let Some(ref dir) = loaded.config.store
		{
			store = Some(resolve_store(&loaded.path, dir));
		}
	}

	Ok(MergedConfig {
		separator: separator.unwrap_or_default(),
		strict: strict.unwrap_or(false),
		store,
		sources,
	})
}

fn resolve_store(config_path: &Path, dir: &Path) -> PathBuf {
	if dir.is_absolute() {
		return dir.to_path_buf();
	}
	match config_path.parent() {
		Some(parent) => parent.join(dir),
		None => dir.to_path_buf(),
	}
}

/// Convenience function to discover, load, and merge configs from a directory.
pub fn load_merged_config(start_dir: &Path) -> Result<MergedConfig> {
	let configs = discover_configs(start_dir)?;
	merge_configs(&configs)
}

/// Get the path to the user's config file.
pub fn user_config_path() -> Result<PathBuf> {
	let home_dir = dirs::home_dir().ok_or(UrifsError::HomeDirectoryNotFound)?;
	Ok(home_dir.join(CONFIG_FILE_NAME))
}
