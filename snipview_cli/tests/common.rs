#![allow(dead_code)]

use std::path::Path;

use assert_cmd::Command;
use insta_cmd::get_cargo_bin;

pub fn snipview_cmd() -> Command {
	let mut cmd = Command::new(get_cargo_bin("snipview"));
	cmd.env("NO_COLOR", "1");
	cmd.env_remove("RUST_LOG");
	cmd
}

/// `count` lines of the form `line N`, with a trailing newline.
pub fn numbered_code(count: usize) -> String {
	let mut code = (1..=count)
		.map(|n| format!("line {n}"))
		.collect::<Vec<_>>()
		.join("\n");
	code.push('\n');
	code
}

/// Write a 12-line source file and a config with two blocks into `root`.
pub fn write_sample_project(root: &Path) -> std::io::Result<()> {
	std::fs::create_dir_all(root.join("snippets"))?;
	std::fs::write(root.join("snippets/app.ts"), numbered_code(12))?;
	std::fs::write(
		root.join("snipview.toml"),
		r#"[display]
collapsible = true

[[blocks]]
name = "app"
path = "snippets/app.ts"
show_lines_only = [1, 2, 3, 8, 9, 12]
title = "App setup"
language = "typescript"
description = "Bootstrapping the app"

[[blocks]]
name = "whole"
path = "snippets/app.ts"
"#,
	)
}
