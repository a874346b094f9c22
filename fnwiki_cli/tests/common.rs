#![allow(dead_code)]

use std::path::Path;

use assert_cmd::Command;
use insta_cmd::get_cargo_bin;

pub fn fnwiki_cmd() -> Command {
	let mut cmd = Command::new(get_cargo_bin("fnwiki"));
	cmd.env("NO_COLOR", "1");
	cmd.env_remove("FNWIKI_LOG");
	cmd
}

pub fn write_file(root: &Path, relative: &str, content: &str) -> std::io::Result<()> {
	let path = root.join(relative);
	if let Some(parent) = path.parent() {
		std::fs::create_dir_all(parent)?;
	}
	std::fs::write(path, content)
}

/// A small wiki with one function per context spread over two categories
/// plus one function at the root of the functions tree.
pub fn write_sample_project(root: &Path) -> std::io::Result<()> {
	write_file(
		root,
		"functions/Element/getElementType.yaml",
		"shared:\n  name: getElementType\n  description: Returns the type of the given \
		 element.\n  pair: setElementType\n",
	)?;
	write_file(
		root,
		"functions/Element/setElementType.yaml",
		"server:\n  name: setElementType\n  description: Changes the type of the given \
		 element.\n  pair: getElementType\n",
	)?;
	write_file(
		root,
		"functions/Camera/getCamera.yaml",
		"client:\n  name: getCamera\n  description: Returns the local player's camera.\n",
	)?;
	write_file(
		root,
		"functions/getTickCount.yaml",
		"shared:\n  name: getTickCount\n",
	)
}
