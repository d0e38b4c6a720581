mod common;

use schemadoc_core::AnyEmptyResult;

fn generate(dir: &std::path::Path) {
	common::schemadoc_cmd()
		.current_dir(dir)
		.arg("generate")
		.arg("schema.json")
		.arg("--output")
		.arg("schema.md")
		.assert()
		.success();
}

#[test]
fn check_passes_when_up_to_date() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write_person_schema(tmp.path())?;
	generate(tmp.path());

	common::schemadoc_cmd()
		.current_dir(tmp.path())
		.arg("check")
		.arg("schema.json")
		.arg("schema.md")
		.assert()
		.success()
		.stdout(predicates::str::contains("up to date"));

	Ok(())
}

#[test]
fn check_fails_when_outdated() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write_person_schema(tmp.path())?;
	std::fs::write(tmp.path().join("schema.md"), "## Properties\n\nstale\n")?;

	common::schemadoc_cmd()
		.current_dir(tmp.path())
		.arg("check")
		.arg("schema.json")
		.arg("schema.md")
		.assert()
		.code(1)
		.stderr(predicates::str::contains("out of date"));

	Ok(())
}

#[test]
fn check_diff_shows_changed_lines() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write_person_schema(tmp.path())?;
	std::fs::write(tmp.path().join("schema.md"), "## Properties\n\nstale\n")?;

	common::schemadoc_cmd()
		.current_dir(tmp.path())
		.arg("check")
		.arg("schema.json")
		.arg("schema.md")
		.arg("--diff")
		.assert()
		.code(1)
		.stderr(predicates::str::contains("-stale"))
		.stderr(predicates::str::contains("+  - **`name`** *(string, required)*"));

	Ok(())
}

#[test]
fn check_respects_render_flags() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write_person_schema(tmp.path())?;
	generate(tmp.path());

	// The file was generated with JSON examples.
	common::schemadoc_cmd()
		.current_dir(tmp.path())
		.arg("check")
		.arg("schema.json")
		.arg("schema.md")
		.arg("--examples-as-yaml")
		.assert()
		.code(1);

	Ok(())
}

#[test]
fn check_errors_when_output_is_missing() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write_person_schema(tmp.path())?;

	common::schemadoc_cmd()
		.current_dir(tmp.path())
		.arg("check")
		.arg("schema.json")
		.arg("missing.md")
		.assert()
		.code(2);

	Ok(())
}
