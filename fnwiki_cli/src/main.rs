use std::collections::BTreeMap;
use std::path::PathBuf;
use std::process;
use std::sync::Arc;

use clap::Parser;
use fnwiki_cli::Commands;
use fnwiki_cli::ContextArg;
use fnwiki_cli::FnWikiCli;
use fnwiki_cli::OutputFormat;
use fnwiki_core::FnWikiError;
use fnwiki_core::FunctionCatalog;
use fnwiki_core::FunctionContext;
use fnwiki_core::FunctionInfo;
use fnwiki_core::FunctionRecord;
use fnwiki_core::FunctionsByCategory;
use fnwiki_core::config::FnWikiConfig;
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

static USE_COLOR: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(true);

/// Environment variable holding an `EnvFilter` directive for log output.
const LOG_ENV_VAR: &str = "FNWIKI_LOG";

/// Heading used for functions loaded from the root of the functions tree.
const UNCATEGORIZED: &str = "(uncategorized)";

fn color_enabled() -> bool {
	USE_COLOR.load(std::sync::atomic::Ordering::Relaxed)
}

/// Apply ANSI color codes only when color is enabled.
macro_rules! colored {
	($text:expr,red) => {
		if color_enabled() {
			format!("{}", $text.red())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,green) => {
		if color_enabled() {
			format!("{}", $text.green())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,yellow) => {
		if color_enabled() {
			format!("{}", $text.yellow())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,bold) => {
		if color_enabled() {
			format!("{}", $text.bold())
		} else {
			format!("{}", $text)
		}
	};
}

fn main() {
	let args = FnWikiCli::parse();

	// Respect NO_COLOR env var and --no-color flag.
	let use_color = !args.no_color && std::env::var_os("NO_COLOR").is_none();
	if !use_color {
		USE_COLOR.store(false, std::sync::atomic::Ordering::Relaxed);
	}

	init_tracing(args.verbose, use_color);

	// Install miette's fancy handler for rich error diagnostics.
	miette::set_hook(Box::new(move |_| {
		Box::new(
			miette::MietteHandlerOpts::new()
				.color(use_color)
				.unicode(use_color)
				.build(),
		)
	}))
	.ok();

	let result = match &args.command {
		Some(Commands::List { context, format }) => run_list(&args, *context, *format),
		Some(Commands::Show { id, format }) => run_show(&args, id, *format),
		Some(Commands::Info { format }) => run_info(&args, *format),
		Some(Commands::Check { strict }) => run_check(&args, *strict),
		None => {
			eprintln!("No subcommand specified. Run `fnwiki --help` for usage.");
			process::exit(1);
		}
	};

	if let Err(e) = result {
		// Try to render through miette for rich diagnostics with help text
		// and error codes.
		match e.downcast::<FnWikiError>() {
			Ok(fnwiki_err) => {
				let report: miette::Report = (*fnwiki_err).into();
				eprintln!("{report:?}");
			}
			Err(e) => {
				eprintln!("{} {e}", colored!("error:", red));
			}
		}
		process::exit(2);
	}
}

/// Log to stderr. `FNWIKI_LOG` overrides the level picked from `--verbose`.
fn init_tracing(verbose: bool, use_color: bool) {
	let default_directive = if verbose { "debug" } else { "warn" };
	let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
		.unwrap_or_else(|_| EnvFilter::new(default_directive));

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_ansi(use_color)
		.with_target(false)
		.init();
}

fn resolve_root(args: &FnWikiCli) -> PathBuf {
	args.path
		.clone()
		.unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
}

fn load_catalog(args: &FnWikiCli) -> Result<FunctionCatalog, Box<dyn std::error::Error>> {
	let root = resolve_root(args);
	let catalog = FunctionCatalog::load(&root)?;
	tracing::debug!(root = %root.display(), functions = catalog.len(), "loaded catalog");
	Ok(catalog)
}

fn print_section(title: &str) {
	println!();
	println!("{}", colored!(title, bold));
}

fn print_field(label: &str, value: impl std::fmt::Display) {
	println!("{label:<20} {value}");
}

fn category_heading(category: &str) -> &str {
	if category.is_empty() {
		UNCATEGORIZED
	} else {
		category
	}
}

fn context_label(context: FunctionContext) -> String {
	match context {
		FunctionContext::Shared => colored!(context.pretty(), yellow),
		FunctionContext::Client => colored!(context.pretty(), green),
		FunctionContext::Server => colored!(context.pretty(), red),
	}
}

fn run_list(
	args: &FnWikiCli,
	context: Option<ContextArg>,
	format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
	let catalog = load_catalog(args)?;
	let context = context.map(FunctionContext::from);
	let grouped: &FunctionsByCategory = match context {
		Some(context) => catalog.functions_by_type_by_category().get(context),
		None => catalog.functions_by_category(),
	};

	if let OutputFormat::Json = format {
		let ids: BTreeMap<&str, Vec<&str>> = grouped
			.iter()
			.map(|(category, records)| {
				let ids: Vec<&str> = records.iter().map(|record| record.id.as_str()).collect();
				(category.as_str(), ids)
			})
			.collect();
		println!("{}", serde_json::to_string_pretty(&ids)?);
		return Ok(());
	}

	if grouped.is_empty() {
		match context {
			Some(context) => println!("No {} functions found.", context.pretty().to_lowercase()),
			None => println!("No functions found."),
		}
		return Ok(());
	}

	let width = grouped
		.values()
		.flatten()
		.map(|record| record.id.len())
		.max()
		.unwrap_or_default();

	for (position, (category, records)) in grouped.iter().enumerate() {
		if position > 0 {
			println!();
		}
		println!("{}", colored!(category_heading(category), bold));
		for record in records {
			let marker = if record.data.is_disabled() {
				" (disabled)"
			} else {
				""
			};
			println!(
				"  {:<width$}  {}{marker}",
				record.id,
				context_label(record.context)
			);
		}
	}

	println!(
		"\n{} function(s) in {} categor{}",
		grouped.record_count(),
		grouped.len(),
		if grouped.len() == 1 { "y" } else { "ies" }
	);

	Ok(())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ShowOutput<'a> {
	id: &'a str,
	name: Option<&'a str>,
	category: String,
	file_path: Option<&'a str>,
	disabled: bool,
	#[serde(flatten)]
	info: FunctionInfo,
}

impl<'a> ShowOutput<'a> {
	fn new(record: &'a FunctionRecord) -> Self {
		Self {
			id: &record.id,
			name: record.data.name(),
			category: record.category(),
			file_path: record.file_path.as_deref(),
			disabled: record.data.is_disabled(),
			info: record.info(),
		}
	}
}

fn run_show(
	args: &FnWikiCli,
	id: &str,
	format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
	let catalog = load_catalog(args)?;
	let record: &Arc<FunctionRecord> = catalog
		.get(id)
		.ok_or_else(|| FnWikiError::UnknownFunction(id.to_string()))?;
	let output = ShowOutput::new(record);

	if let OutputFormat::Json = format {
		println!("{}", serde_json::to_string_pretty(&output)?);
		return Ok(());
	}

	println!("{}", colored!(output.id, bold));
	print_field("Type", context_label(output.info.r#type));
	print_field("Category", category_heading(&output.category));
	if let Some(name) = output.name.filter(|name| *name != output.id) {
		print_field("Name", name);
	}
	print_field(
		"Description",
		if output.info.description.is_empty() {
			"none"
		} else {
			output.info.description.as_str()
		},
	);
	print_field("Pair", output.info.pair.as_deref().unwrap_or("none"));
	if output.disabled {
		print_field("Disabled", "yes");
	}
	print_field("File", output.file_path.unwrap_or("unknown"));

	Ok(())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct InfoOutput {
	root: String,
	config: Option<String>,
	functions: usize,
	categories: usize,
	contexts: BTreeMap<FunctionContext, ContextSummary>,
	unmarked: usize,
}

#[derive(Serialize)]
struct ContextSummary {
	functions: usize,
	categories: usize,
}

fn run_info(args: &FnWikiCli, format: OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
	let root = resolve_root(args);
	let config_path = FnWikiConfig::resolve_path(&root);
	let catalog = load_catalog(args)?;
	let by_context = catalog.functions_by_type_by_category();

	let output = InfoOutput {
		root: root.display().to_string(),
		config: config_path.map(|path| path.display().to_string()),
		functions: catalog.len(),
		categories: catalog.functions_by_category().len(),
		contexts: FunctionContext::ALL
			.iter()
			.map(|context| {
				let grouped = by_context.get(*context);
				(
					*context,
					ContextSummary {
						functions: grouped.record_count(),
						categories: grouped.len(),
					},
				)
			})
			.collect(),
		unmarked: catalog.unmarked().count(),
	};

	if let OutputFormat::Json = format {
		println!("{}", serde_json::to_string_pretty(&output)?);
		return Ok(());
	}

	println!("{}", colored!("fnwiki info", bold));

	print_section("Project");
	print_field("Project root", &output.root);
	print_field("Resolved config", output.config.as_deref().unwrap_or("none"));

	print_section("Functions");
	print_field("Total", output.functions);
	print_field("Categories", output.categories);
	print_field("Without marker", output.unmarked);

	print_section("Contexts");
	for (context, summary) in &output.contexts {
		print_field(
			context.pretty(),
			format!(
				"{} function(s) in {} categor{}",
				summary.functions,
				summary.categories,
				if summary.categories == 1 { "y" } else { "ies" }
			),
		);
	}

	Ok(())
}

fn run_check(args: &FnWikiCli, strict: bool) -> Result<(), Box<dyn std::error::Error>> {
	let catalog = load_catalog(args)?;
	let unmarked: Vec<&Arc<FunctionRecord>> = catalog.unmarked().collect();

	if unmarked.is_empty() {
		println!(
			"{} {} function(s) loaded, all with a context marker.",
			colored!("ok:", green),
			catalog.len()
		);
		return Ok(());
	}

	for record in &unmarked {
		eprintln!("{:?}", unmarked_report(record, strict));
	}

	let error = FnWikiError::UnmarkedFunctions {
		count: unmarked.len(),
	};
	if strict {
		eprintln!("{:?}", miette::Report::new(error));
		process::exit(1);
	}

	println!(
		"{} {} function(s) loaded; {error}.",
		colored!("warning:", yellow),
		catalog.len()
	);

	Ok(())
}

/// A diagnostic for a function that fell back to server-side.
fn unmarked_report(record: &FunctionRecord, is_error: bool) -> miette::Report {
	let severity = if is_error {
		miette::Severity::Error
	} else {
		miette::Severity::Warning
	};
	let location = record.file_path.as_deref().unwrap_or(record.id.as_str());
	let message = format!(
		"[{location}] function `{}` has no context marker and is listed as server-side",
		record.id
	);

	let diagnostic = miette::MietteDiagnostic::new(message)
		.with_code("fnwiki::unmarked_function")
		.with_help("add a `shared`, `client` or `server` section")
		.with_severity(severity);
	miette::Report::new(diagnostic)
}
