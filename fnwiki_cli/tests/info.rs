mod common;

use fnwiki_core::AnyEmptyResult;
use serde_json::Value;
use similar_asserts::assert_eq;

#[test]
fn info_summarizes_contexts() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write_sample_project(tmp.path())?;

	common::fnwiki_cmd()
		.arg("info")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains("fnwiki info"))
		.stdout(predicates::str::contains("Resolved config      none"))
		.stdout(predicates::str::contains(
			"Shared               2 function(s) in 2 categories",
		))
		.stdout(predicates::str::contains(
			"Client-side          1 function(s) in 1 category",
		));

	Ok(())
}

#[test]
fn info_json_output() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write_sample_project(tmp.path())?;
	common::write_file(tmp.path(), "functions/Misc/mystery.yaml", "notes: todo\n")?;
	common::write_file(tmp.path(), "fnwiki.toml", "[functions]\npath = \"functions\"\n")?;

	let output = common::fnwiki_cmd()
		.arg("info")
		.arg("--format")
		.arg("json")
		.arg("--path")
		.arg(tmp.path())
		.output()?;
	assert!(output.status.success());

	let value: Value = serde_json::from_slice(&output.stdout)?;
	assert_eq!(value["functions"], 5);
	assert_eq!(value["categories"], 4);
	assert_eq!(value["unmarked"], 1);
	assert_eq!(value["contexts"]["shared"]["functions"], 2);
	assert_eq!(value["contexts"]["client"]["functions"], 1);
	assert_eq!(value["contexts"]["server"]["functions"], 2);
	assert_eq!(value["contexts"]["server"]["categories"], 2);
	assert!(
		value["config"]
			.as_str()
			.is_some_and(|path| path.ends_with("fnwiki.toml"))
	);

	Ok(())
}
