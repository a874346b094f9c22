use std::collections::HashMap;
use std::collections::HashSet;
use std::path::Path;
use std::path::PathBuf;

use globset::Glob;
use globset::GlobSet;
use globset::GlobSetBuilder;
use ignore::gitignore::Gitignore;
use ignore::gitignore::GitignoreBuilder;

use crate::FnWikiError;
use crate::FnWikiResult;
use crate::config::DEFAULT_FUNCTION_PATTERN;
use crate::config::DEFAULT_FUNCTIONS_PATH;
use crate::config::DEFAULT_MAX_FILE_SIZE;
use crate::config::FnWikiConfig;
use crate::record::FunctionData;
use crate::record::FunctionRecord;

/// Options for controlling how function files are discovered and loaded.
///
/// Use [`LoadOptions::default()`] for the conventional `functions/**/*.yaml`
/// layout or [`LoadOptions::from_config`] to construct from an
/// [`FnWikiConfig`].
#[derive(Debug, Clone)]
pub struct LoadOptions {
	/// Directory holding the function files, relative to the project root.
	pub functions_path: PathBuf,
	/// Glob patterns, relative to `functions_path`, selecting files to load.
	pub patterns: Vec<String>,
	/// Gitignore-style patterns, relative to `functions_path`, to skip.
	pub exclude_patterns: Vec<String>,
	/// Maximum size of a single function file in bytes.
	pub max_file_size: u64,
}

impl Default for LoadOptions {
	fn default() -> Self {
		Self {
			functions_path: PathBuf::from(DEFAULT_FUNCTIONS_PATH),
			patterns: vec![DEFAULT_FUNCTION_PATTERN.to_string()],
			exclude_patterns: Vec::new(),
			max_file_size: DEFAULT_MAX_FILE_SIZE,
		}
	}
}

impl LoadOptions {
	/// Construct [`LoadOptions`] from an optional [`FnWikiConfig`]. Missing
	/// config means defaults.
	pub fn from_config(config: Option<&FnWikiConfig>) -> Self {
		let Some(config) = config else {
			return Self::default();
		};

		Self {
			functions_path: config.functions.path.clone(),
			patterns: config.functions.patterns.clone(),
			exclude_patterns: config.exclude.patterns.clone(),
			max_file_size: config.max_file_size,
		}
	}
}

/// Load every function file under `root` as described by `options`.
///
/// Files are visited in sorted path order, which fixes the order of records
/// inside each index bucket.
pub fn load_functions(root: &Path, options: &LoadOptions) -> FnWikiResult<Vec<FunctionRecord>> {
	let functions_dir = root.join(&options.functions_path);
	if !functions_dir.is_dir() {
		return Err(FnWikiError::MissingFunctionsDir {
			path: functions_dir.display().to_string(),
		});
	}

	let include_set = build_glob_set(&options.patterns)?;
	let exclude = build_exclude_matcher(&functions_dir, &options.exclude_patterns)?;
	let files = collect_files(&functions_dir, &include_set, &exclude)?;

	let mut records = Vec::with_capacity(files.len());
	let mut seen: HashMap<String, String> = HashMap::new();

	for file in files {
		let file_path = relative_file_path(root, &file);
		let size = std::fs::metadata(&file)?.len();
		if size > options.max_file_size {
			return Err(FnWikiError::FileTooLarge {
				path: file_path,
				size,
				limit: options.max_file_size,
			});
		}

		let content = std::fs::read_to_string(&file)?;
		let Some(data) = parse_function_data(&content, &file_path)? else {
			tracing::warn!(path = %file_path, "skipping empty function file");
			continue;
		};

		let id = function_id(&file);
		if let Some(first_file) = seen.get(&id) {
			return Err(FnWikiError::DuplicateFunction {
				id,
				first_file: first_file.clone(),
				second_file: file_path,
			});
		}
		seen.insert(id.clone(), file_path.clone());

		let record = FunctionRecord::new(id, Some(file_path), data);
		tracing::debug!(
			id = %record.id,
			path = record.file_path.as_deref().unwrap_or_default(),
			context = %record.context,
			"loaded function"
		);
		records.push(record);
	}

	Ok(records)
}

/// Parse the YAML content of a function file. Returns `None` for an empty
/// document.
pub fn parse_function_data(
	content: &str,
	path_display: &str,
) -> FnWikiResult<Option<FunctionData>> {
	if is_blank_document(content) {
		return Ok(None);
	}

	let value: serde_yaml_ng::Value =
		serde_yaml_ng::from_str(content).map_err(|e| FnWikiError::FunctionParse {
			path: path_display.to_string(),
			reason: e.to_string(),
		})?;

	if value.is_null() {
		return Ok(None);
	}

	serde_yaml_ng::from_value(value)
		.map(Some)
		.map_err(|e| FnWikiError::FunctionParse {
			path: path_display.to_string(),
			reason: e.to_string(),
		})
}

/// Whitespace, comments and document markers only.
fn is_blank_document(content: &str) -> bool {
	content.lines().map(str::trim).all(|line| {
		line.is_empty() || line.starts_with('#') || line == "---" || line == "..."
	})
}

/// The function id is its file name without the folder or YAML extension.
pub fn function_id(path: &Path) -> String {
	let file_name = path
		.file_name()
		.map(|name| name.to_string_lossy())
		.unwrap_or_default();

	file_name
		.strip_suffix(".yaml")
		.or_else(|| file_name.strip_suffix(".yml"))
		.unwrap_or(file_name.as_ref())
		.to_string()
}

/// `/`-separated path of `file` relative to `root`, falling back to the full
/// path when `file` lives outside of it.
fn relative_file_path(root: &Path, file: &Path) -> String {
	let relative = file.strip_prefix(root).unwrap_or(file).to_string_lossy();

	// `\` is an ordinary file name character outside of Windows.
	if cfg!(windows) {
		relative.replace('\\', "/")
	} else {
		relative.into_owned()
	}
}

fn build_glob_set(patterns: &[String]) -> FnWikiResult<GlobSet> {
	let mut builder = GlobSetBuilder::new();
	for pattern in patterns {
		let glob = Glob::new(pattern).map_err(|e| FnWikiError::InvalidPattern {
			pattern: pattern.clone(),
			reason: e.to_string(),
		})?;
		builder.add(glob);
	}

	builder.build().map_err(|e| FnWikiError::InvalidPattern {
		pattern: patterns.join(", "),
		reason: e.to_string(),
	})
}

/// Build a `Gitignore` matcher from the `[exclude]` patterns, rooted at the
/// functions directory.
fn build_exclude_matcher(dir: &Path, patterns: &[String]) -> FnWikiResult<Gitignore> {
	let mut builder = GitignoreBuilder::new(dir);
	for pattern in patterns {
		builder.add_line(None, pattern).map_err(|e| {
			FnWikiError::ConfigParse(format!("invalid exclude pattern `{pattern}`: {e}"))
		})?;
	}
	builder
		.build()
		.map_err(|e| FnWikiError::ConfigParse(format!("failed to build exclude rules: {e}")))
}

fn collect_files(
	dir: &Path,
	include_set: &GlobSet,
	exclude: &Gitignore,
) -> FnWikiResult<Vec<PathBuf>> {
	let mut files = Vec::new();
	let mut visited_dirs = HashSet::new();

	walk_dir(dir, dir, include_set, exclude, &mut files, &mut visited_dirs)?;
	// Sort for deterministic ordering.
	files.sort();
	Ok(files)
}

fn walk_dir(
	base: &Path,
	dir: &Path,
	include_set: &GlobSet,
	exclude: &Gitignore,
	files: &mut Vec<PathBuf>,
	visited_dirs: &mut HashSet<PathBuf>,
) -> FnWikiResult<()> {
	// Detect symlink cycles by tracking canonical paths.
	let canonical = dir.canonicalize().unwrap_or_else(|_| dir.to_path_buf());
	if !visited_dirs.insert(canonical) {
		return Err(FnWikiError::SymlinkCycle {
			path: dir.display().to_string(),
		});
	}

	for entry in std::fs::read_dir(dir)? {
		let path = entry?.path();

		if path
			.file_name()
			.and_then(|name| name.to_str())
			.is_some_and(|name| name.starts_with('.'))
		{
			continue;
		}

		let is_dir = path.is_dir();
		if exclude.matched(&path, is_dir).is_ignore() {
			continue;
		}

		if is_dir {
			walk_dir(base, &path, include_set, exclude, files, visited_dirs)?;
		} else if path
			.strip_prefix(base)
			.is_ok_and(|rel_path| include_set.is_match(rel_path))
		{
			files.push(path);
		}
	}

	Ok(())
}
