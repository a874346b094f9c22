use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum FnWikiError {
	#[error(transparent)]
	#[diagnostic(code(fnwiki::io_error))]
	Io(#[from] std::io::Error),

	#[error("failed to parse config file: {0}")]
	#[diagnostic(
		code(fnwiki::config_parse),
		help("check that fnwiki.toml is valid TOML with [functions] and/or [exclude] sections")
	)]
	ConfigParse(String),

	#[error("invalid glob pattern `{pattern}`: {reason}")]
	#[diagnostic(code(fnwiki::invalid_pattern))]
	InvalidPattern { pattern: String, reason: String },

	#[error("functions directory not found: `{path}`")]
	#[diagnostic(
		code(fnwiki::missing_functions_dir),
		help("create the directory or set `[functions] path` in fnwiki.toml")
	)]
	MissingFunctionsDir { path: String },

	#[error("failed to parse function file `{path}`: {reason}")]
	#[diagnostic(
		code(fnwiki::function_parse),
		help("function files must be YAML mappings with `shared`, `client` and/or `server` keys")
	)]
	FunctionParse { path: String, reason: String },

	#[error("duplicate function `{id}`: defined in `{first_file}` and `{second_file}`")]
	#[diagnostic(
		code(fnwiki::duplicate_function),
		help("function ids come from the file name and must be unique across all folders")
	)]
	DuplicateFunction {
		id: String,
		first_file: String,
		second_file: String,
	},

	#[error("unknown function: `{0}`")]
	#[diagnostic(
		code(fnwiki::unknown_function),
		help("run `fnwiki list` to see every loaded function id")
	)]
	UnknownFunction(String),

	#[error("{count} function(s) have no context marker and default to server")]
	#[diagnostic(
		code(fnwiki::unmarked_functions),
		help("add a `shared`, `client` or `server` section to each listed file")
	)]
	UnmarkedFunctions { count: usize },

	#[error("file too large: `{path}` is {size} bytes (limit: {limit} bytes)")]
	#[diagnostic(
		code(fnwiki::file_too_large),
		help("increase `max_file_size` in fnwiki.toml or exclude this file")
	)]
	FileTooLarge { path: String, size: u64, limit: u64 },

	#[error("symlink cycle detected at: `{path}`")]
	#[diagnostic(
		code(fnwiki::symlink_cycle),
		help("remove the circular symlink or exclude this path")
	)]
	SymlinkCycle { path: String },
}

pub type FnWikiResult<T> = Result<T, FnWikiError>;
pub type AnyError = Box<dyn std::error::Error>;
pub type AnyEmptyResult = Result<(), AnyError>;
pub type AnyResult<T> = Result<T, AnyError>;
