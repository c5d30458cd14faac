use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use urifs::config::{
	CONFIG_FILE_NAME, MergedConfig, discover_configs, generate_init_template, load_merged_config,
	user_config_path,
};
use urifs::transform::{Separator, forward_with, render_tree_for, reverse_with};
use urifs::Store;
use urifs::validate::{forward_checked, reverse_checked};

#[derive(Parser)]
#[command(name = "urifs")]
#[command(
	author,
	version,
	about = "Map URIs to readable file system paths and back"
)]
#[command(arg_required_else_help = true, args_conflicts_with_subcommands = true)]
#[command(
	after_help = "A URI spelled like a subcommand (list, config) is mapped with `urifs -- <URI>`."
)]
struct Cli {
	#[command(subcommand)]
	command: Option<Commands>,

	/// URI to map, or a path when --from-path is given
	input: Option<String>,

	/// Treat INPUT as a path and recover the original URI
	#[arg(short = 'f', long)]
	from_path: bool,

	/// Single character joining path segments (defaults to the platform separator)
	#[arg(short, long, value_name = "SEP")]
	separator: Option<String>,

	/// Print the mapped path as an indented tree
	#[arg(long, conflicts_with = "from_path")]
	tree: bool,

	/// Reject input the mapping cannot reproduce exactly
	#[arg(long)]
	strict: bool,

	/// Create a template .urifs.toml in the current directory
	#[arg(long)]
	init: bool,

	/// Overwrite existing .urifs.toml when using --init
	#[arg(long, requires = "init")]
	force: bool,

	/// Increase log verbosity (repeatable)
	#[arg(short, long, action = ArgAction::Count, global = true)]
	verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
	/// List the URIs of every object stored under a directory
	List {
		/// Store root (defaults to `store` from configuration)
		dir: Option<PathBuf>,
	},
	/// Configuration management commands
	Config {
		#[command(subcommand)]
		action: ConfigAction,
	},
}

#[derive(Subcommand)]
enum ConfigAction {
	/// Display discovered config files and the merged settings
	Show,
	/// Check all config files for errors without mapping anything
	Validate,
}

fn main() -> ExitCode {
	let cli = Cli::parse();
	init_logging(cli.verbose);

	match run(cli) {
		Ok(code) => code,
		Err(e) => {
			eprintln!("error: {e:?}");
			ExitCode::FAILURE
		}
	}
}

fn init_logging(verbose: u8) {
	let default_level = match verbose {
		0 => "warn",
		1 => "info",
		2 => "debug",
		_ => "trace",
	};
	let filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_target(false)
		.init();
}

fn run(mut cli: Cli) -> Result<ExitCode> {
	// Handle --init
	if cli.init {
		return handle_init(cli.force);
	}

	// Handle subcommands
	if let Some(command) = cli.command.take() {
		return match command {
			Commands::List { dir } => handle_list(dir),
			Commands::Config { action } => match action {
				ConfigAction::Show => handle_config_show(),
				ConfigAction::Validate => handle_config_validate(),
			},
		};
	}

	match cli.input {
		Some(ref input) => handle_map(&cli, input),
		// only flags were given
		None => anyhow::bail!("missing INPUT"),
	}
}

fn load_config() -> Result<MergedConfig> {
	let cwd = std::env::current_dir().context("Failed to get current directory")?;
	load_merged_config(&cwd).context("Failed to load configuration")
}

fn handle_map(cli: &Cli, input: &str) -> Result<ExitCode> {
	let config = load_config()?;

	let separator = match cli.separator {
		Some(ref value) => Separator::parse(value).context("Invalid --separator")?,
		None => config.separator,
	};
	let strict = cli.strict || config.strict;
	tracing::info!(%separator, strict, from_path = cli.from_path, "mapping input");

	if cli.from_path {
		let uri = if strict {
			reverse_checked(input, separator)?
		} else {
			reverse_with(input, separator)
		};
		println!("{}", uri);
		return Ok(ExitCode::SUCCESS);
	}

	let path = if strict {
		forward_checked(input, separator)?
	} else {
		forward_with(input, separator)
	};

	if cli.tree {
		println!("{}", render_tree_for(input, separator));
	} else {
		println!("{}", path);
	}

	Ok(ExitCode::SUCCESS)
}

fn handle_list(dir: Option<PathBuf>) -> Result<ExitCode> {
	let root = match dir {
		Some(dir) => dir,
		None => load_config()?.store.ok_or_else(|| {
			anyhow::anyhow!("No store directory given and none configured in {CONFIG_FILE_NAME}")
		})?,
	};

	let store = Store::new(root);
	let uris = store
		.uris()
		.with_context(|| format!("Failed to list store {}", store.root().display()))?;

	for uri in uris {
		println!("{}", uri);
	}

	Ok(ExitCode::SUCCESS)
}

fn handle_init(force: bool) -> Result<ExitCode> {
	let config_path = PathBuf::from(CONFIG_FILE_NAME);

	if config_path.exists() && !force {
		anyhow::bail!("{CONFIG_FILE_NAME} already exists. Use --force to overwrite.");
	}

	std::fs::write(&config_path, generate_init_template())
		.with_context(|| format!("Failed to write {}", config_path.display()))?;

	println!("Created {CONFIG_FILE_NAME}");
	Ok(ExitCode::SUCCESS)
}

fn handle_config_show() -> Result<ExitCode> {
	let cwd = std::env::current_dir().context("Failed to get current directory")?;
	let configs = discover_configs(&cwd).context("Failed to discover config files")?;

	if configs.is_empty() {
		println!("No configuration files found.");
	} else {
		println!("Configuration files (in cascade order):\n");

		for loaded in &configs {
			println!("# Source: {}", loaded.path.display());
			println!("# root: {}", loaded.config.root);
			if let Some(ref env_var) = loaded.config.user_config_disable_env_var {
				println!("# user-config-disable-env-var: {}", env_var);
			}
			if let Some(ref separator) = loaded.config.separator {
				println!("  separator: {}", separator);
			}
			if let Some(strict) = loaded.config.strict {
				println!("  strict: {}", strict);
			}
			if let Some(ref store) = loaded.config.store {
				println!("  store: {}", store.display());
			}
			println!();
		}
	}

	let merged = urifs::config::merge_configs(&configs).context("Failed to merge configuration")?;
	println!("Effective settings:");
	println!("  separator: {}", merged.separator);
	println!("  strict: {}", merged.strict);
	match merged.store {
		Some(ref store) => println!("  store: {}", store.display()),
		None => println!("  store: (none)"),
	}

	// Show user config path
	if let Ok(user_path) = user_config_path() {
		println!("\nUser config path: {}", user_path.display());
		if user_path.exists() {
			println!("  (exists)");
		} else {
			println!("  (not found)");
		}
	}

	Ok(ExitCode::SUCCESS)
}

fn handle_config_validate() -> Result<ExitCode> {
	let cwd = std::env::current_dir().context("Failed to get current directory")?;

	match discover_configs(&cwd) {
		Ok(configs) => {
			if configs.is_empty() {
				println!("No configuration files found.");
			} else {
				println!("All configuration files are valid:");
				for loaded in &configs {
					println!("  {}", loaded.path.display());
				}
			}
			Ok(ExitCode::SUCCESS)
		}
		Err(e) => {
			eprintln!("Configuration error: {}", e);
			Ok(ExitCode::FAILURE)
		}
	}
}
