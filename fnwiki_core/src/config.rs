use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;

use crate::FnWikiError;
use crate::FnWikiResult;

/// Default maximum size of a single function file in bytes (1 MiB).
pub const DEFAULT_MAX_FILE_SIZE: u64 = 1024 * 1024;

/// Default directory holding the function files, relative to the project root.
pub const DEFAULT_FUNCTIONS_PATH: &str = "functions";

/// Default glob pattern selecting function files inside the functions
/// directory.
pub const DEFAULT_FUNCTION_PATTERN: &str = "**/*.yaml";

/// Supported config file locations in discovery order (highest precedence
/// first).
pub const CONFIG_FILE_CANDIDATES: [&str; 3] =
	["fnwiki.toml", ".fnwiki.toml", ".config/fnwiki.toml"];

/// Configuration loaded from an `fnwiki.toml` file.
///
/// ```toml
/// max_file_size = 1048576
///
/// [functions]
/// path = "functions"
/// patterns = ["**/*.yaml"]
///
/// [exclude]
/// patterns = ["drafts/", "*.wip.yaml"]
/// ```
#[derive(Debug, Deserialize)]
pub struct FnWikiConfig {
	/// Where function files live and which of them to load.
	#[serde(default)]
	pub functions: FunctionsConfig,
	/// Exclusion configuration using gitignore-style patterns.
	#[serde(default)]
	pub exclude: ExcludeConfig,
	/// Maximum file size in bytes. Larger function files abort loading.
	#[serde(default = "default_max_file_size")]
	pub max_file_size: u64,
}

impl Default for FnWikiConfig {
	fn default() -> Self {
		Self {
			functions: FunctionsConfig::default(),
			exclude: ExcludeConfig::default(),
			max_file_size: DEFAULT_MAX_FILE_SIZE,
		}
	}
}

/// The `[functions]` section.
#[derive(Debug, Deserialize)]
pub struct FunctionsConfig {
	/// Directory containing the function files, relative to the project root.
	#[serde(default = "default_functions_path")]
	pub path: PathBuf,
	/// Glob patterns, relative to `path`, selecting the files to load.
	#[serde(default = "default_function_patterns")]
	pub patterns: Vec<String>,
}

impl Default for FunctionsConfig {
	fn default() -> Self {
		Self {
			path: default_functions_path(),
			patterns: default_function_patterns(),
		}
	}
}

/// Configuration for excluding files and directories from loading.
///
/// Patterns follow gitignore syntax, including negation (`!pattern`) and
/// directory markers (trailing `/`).
#[derive(Debug, Default, Deserialize)]
pub struct ExcludeConfig {
	#[serde(default)]
	pub patterns: Vec<String>,
}

fn default_max_file_size() -> u64 {
	DEFAULT_MAX_FILE_SIZE
}

fn default_functions_path() -> PathBuf {
	PathBuf::from(DEFAULT_FUNCTIONS_PATH)
}

fn default_function_patterns() -> Vec<String> {
	vec![DEFAULT_FUNCTION_PATTERN.to_string()]
}

impl FnWikiConfig {
	/// Resolve the config path from known discovery candidates.
	#[must_use]
	pub fn resolve_path(root: &Path) -> Option<PathBuf> {
		CONFIG_FILE_CANDIDATES
			.iter()
			.map(|candidate| root.join(candidate))
			.find(|path| path.is_file())
	}

	/// Load the config from the first discovered config file at `root`.
	/// Returns `None` if no config file exists.
	pub fn load(root: &Path) -> FnWikiResult<Option<FnWikiConfig>> {
		let Some(config_path) = Self::resolve_path(root) else {
			return Ok(None);
		};

		let content = std::fs::read_to_string(&config_path)?;
		let config: FnWikiConfig =
			toml::from_str(&content).map_err(|e| FnWikiError::ConfigParse(e.to_string()))?;

		tracing::debug!(path = %config_path.display(), "loaded config");

		Ok(Some(config))
	}
}
