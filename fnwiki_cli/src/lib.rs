use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use fnwiki_core::FunctionContext;

#[derive(Parser)]
#[command(
	author,
	version,
	about = "Browse the scripting API wiki's functions by category and execution context.",
	long_about = "fnwiki loads every function entry of the scripting API wiki (one YAML file per \
	              function) and groups them by the folder they live in and by where they run: \
	              shared, client-side or server-side.\n\nQuick start:\n  fnwiki list    List \
	              functions by category\n  fnwiki show    Show a single function\n  fnwiki info    \
	              Summarize the loaded functions\n  fnwiki check   Report functions without a \
	              context marker"
)]
pub struct FnWikiCli {
	#[command(subcommand)]
	pub command: Option<Commands>,

	/// Path to the project root directory.
	#[arg(long, short, global = true)]
	pub path: Option<PathBuf>,

	/// Enable verbose output.
	#[arg(long, short, global = true, default_value_t = false)]
	pub verbose: bool,

	/// Disable colored output.
	#[arg(long, global = true, default_value_t = false)]
	pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
	/// List functions grouped by category.
	///
	/// Without `--context` every function is listed under the folder it was
	/// loaded from. With `--context` only the functions of that execution
	/// context are listed, still grouped by folder.
	List {
		/// Only list functions available in this context.
		#[arg(long, value_enum)]
		context: Option<ContextArg>,

		/// Output format. `json` prints a map of category to function ids.
		#[arg(long, value_enum, default_value_t = OutputFormat::Text)]
		format: OutputFormat,
	},
	/// Show the summary of a single function.
	///
	/// Prints the function's context, category, description, paired function
	/// and the file it was loaded from.
	Show {
		/// The function id (its file name without `.yaml`).
		id: String,

		/// Output format for the function summary.
		#[arg(long, value_enum, default_value_t = OutputFormat::Text)]
		format: OutputFormat,
	},
	/// Print a summary of the loaded functions.
	///
	/// Shows the resolved config, the number of functions and categories, the
	/// number of functions per execution context, and how many functions have
	/// no context marker.
	Info {
		/// Output format for info results.
		#[arg(long, value_enum, default_value_t = OutputFormat::Text)]
		format: OutputFormat,
	},
	/// Load every function file and report functions without a context
	/// marker.
	///
	/// Functions with no `shared`, `client` or `server` section are listed as
	/// server-side functions. This command lists them so the content can be
	/// fixed. Parse errors and duplicate ids always fail the command.
	Check {
		/// Fail when any function has no context marker.
		#[arg(long, default_value_t = false)]
		strict: bool,
	},
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ContextArg {
	/// Available on both the client and the server.
	Shared,
	/// Client-side functions.
	Client,
	/// Server-side functions.
	Server,
}

impl From<ContextArg> for FunctionContext {
	fn from(value: ContextArg) -> Self {
		match value {
			ContextArg::Shared => Self::Shared,
			ContextArg::Client => Self::Client,
			ContextArg::Server => Self::Server,
		}
	}
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
	/// Human-readable text output with colors and formatting.
	Text,
	/// JSON output for programmatic consumption.
	Json,
}
