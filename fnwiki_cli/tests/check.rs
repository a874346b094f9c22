mod common;

use fnwiki_cli::Commands;
use fnwiki_cli::FnWikiCli;
use fnwiki_core::AnyEmptyResult;

#[test]
fn check_passes_when_every_function_is_marked() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write_sample_project(tmp.path())?;

	common::fnwiki_cmd()
		.arg("check")
		.arg("--strict")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains(
			"4 function(s) loaded, all with a context marker.",
		));

	Ok(())
}

#[test]
fn check_warns_about_unmarked_functions() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write_sample_project(tmp.path())?;
	common::write_file(tmp.path(), "functions/Misc/mystery.yaml", "notes: todo\n")?;

	common::fnwiki_cmd()
		.arg("check")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains(
			"1 function(s) have no context marker and default to server",
		))
		.stderr(predicates::str::contains("functions/Misc/mystery.yaml"));

	Ok(())
}

#[test]
fn check_strict_fails_on_unmarked_functions() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write_file(tmp.path(), "functions/Misc/mystery.yaml", "shared: false\n")?;

	common::fnwiki_cmd()
		.arg("check")
		.arg("--strict")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.code(1)
		.stderr(predicates::str::contains("function `mystery`"));

	Ok(())
}

#[test]
fn check_fails_on_invalid_yaml() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write_file(tmp.path(), "functions/Misc/broken.yaml", "shared: [unclosed\n")?;

	common::fnwiki_cmd()
		.arg("check")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.code(2)
		.stderr(predicates::str::contains("failed to parse function file"));

	Ok(())
}

#[test]
fn check_args_parse() {
	let cli = <FnWikiCli as clap::Parser>::parse_from(["fnwiki", "check", "--strict"]);
	assert!(matches!(cli.command, Some(Commands::Check { strict: true })));
}

#[test]
fn missing_subcommand_fails() {
	common::fnwiki_cmd()
		.assert()
		.code(1)
		.stderr(predicates::str::contains("No subcommand specified"));
}
