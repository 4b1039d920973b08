mod common;

use serde_json::Value;
use snipview_core::AnyEmptyResult;

#[test]
fn list_configured_blocks() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write_sample_project(tmp.path())?;

	let mut cmd = common::snipview_cmd();
	cmd.arg("list")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains(
			"app snippets/app.ts (13 lines, 6 visible, 7 hidden, collapsible)",
		))
		.stdout(predicates::str::contains(
			"whole snippets/app.ts (13 lines, 13 visible, 0 hidden, static)",
		));

	Ok(())
}

#[test]
fn list_without_config() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;

	let mut cmd = common::snipview_cmd();
	cmd.arg("list")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout("No blocks configured.\n");

	Ok(())
}

#[test]
fn check_passes_for_valid_blocks() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write_sample_project(tmp.path())?;

	let mut cmd = common::snipview_cmd();
	cmd.arg("check")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains(
			"Check passed: all 2 block(s) are valid.",
		));

	Ok(())
}

#[test]
fn check_fails_when_lines_are_out_of_range() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("code.rs"), common::numbered_code(12))?;
	std::fs::write(
		tmp.path().join("snipview.toml"),
		"[[blocks]]\nname = \"stale\"\npath = \"code.rs\"\nshow_lines_only = [1, 2, 40, 41]\n",
	)?;

	let mut cmd = common::snipview_cmd();
	cmd.arg("check")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.code(1)
		.stdout(predicates::str::contains("1 problem(s) found."))
		.stderr(predicates::str::contains(
			"block `stale` (code.rs): requests line(s) 40, 41 but the file has 13 line(s)",
		));

	Ok(())
}

#[test]
fn check_reports_every_problem() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("code.rs"), "fn main() {}\n")?;
	std::fs::write(
		tmp.path().join("snipview.toml"),
		r#"[[blocks]]
name = "missing"
path = "snippets/missing.ts"

[[blocks]]
name = "bad_spec"
path = "code.rs"
show_lines_only = "3-1"

[[blocks]]
name = "fine"
path = "code.rs"
show_lines_only = "1"
"#,
	)?;

	let mut cmd = common::snipview_cmd();
	let output = cmd
		.arg("check")
		.arg("--format")
		.arg("json")
		.arg("--path")
		.arg(tmp.path())
		.output()?;
	assert_eq!(output.status.code(), Some(1));

	let json: Value = serde_json::from_slice(&output.stdout)?;
	assert_eq!(json["ok"], false);
	assert_eq!(json["blocks"], 3);

	let problems = json["problems"]
		.as_array()
		.ok_or("problems should be an array")?;
	assert_eq!(problems.len(), 2);
	assert_eq!(problems[0]["block"], "missing");
	assert_eq!(problems[0]["file"], "snippets/missing.ts");
	assert!(
		problems[0]["message"]
			.as_str()
			.is_some_and(|message| message.contains("failed to read source file"))
	);
	assert_eq!(problems[1]["block"], "bad_spec");
	assert!(
		problems[1]["message"]
			.as_str()
			.is_some_and(|message| message.contains("invalid line list `3-1`"))
	);

	Ok(())
}

#[test]
fn check_json_ok() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write_sample_project(tmp.path())?;

	let mut cmd = common::snipview_cmd();
	let output = cmd
		.arg("check")
		.arg("--format")
		.arg("json")
		.arg("--path")
		.arg(tmp.path())
		.output()?;
	assert!(output.status.success());

	let json: Value = serde_json::from_slice(&output.stdout)?;
	assert_eq!(json["ok"], true);
	assert_eq!(json["problems"].as_array().map(Vec::len), Some(0));

	Ok(())
}

#[test]
fn check_rejects_invalid_config() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("snipview.toml"), "[[blocks]]\nname = 3\n")?;

	let mut cmd = common::snipview_cmd();
	cmd.arg("check")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.code(2)
		.stderr(predicates::str::contains("failed to parse config file"));

	Ok(())
}

#[test]
fn check_rejects_unknown_block_keys() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("a.ts"), "a\nb\nc\n")?;
	std::fs::write(
		tmp.path().join("snipview.toml"),
		"[[blocks]]\nname = \"a\"\npath = \"a.ts\"\ncollapsible = true\nshow_lines = [1, 2]\n",
	)?;

	let mut cmd = common::snipview_cmd();
	cmd.arg("check")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.code(2)
		.stderr(predicates::str::contains("unknown field `show_lines` in block `a`"));

	Ok(())
}
