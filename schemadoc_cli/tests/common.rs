use std::path::Path;

use assert_cmd::Command;
use insta_cmd::get_cargo_bin;
use schemadoc_core::AnyEmptyResult;

pub fn schemadoc_cmd() -> Command {
	let mut cmd = Command::new(get_cargo_bin("schemadoc"));
	cmd.env("NO_COLOR", "1");
	cmd.env_remove("RUST_LOG");
	cmd
}

/// A small schema with one required property and one with an example.
#[allow(dead_code)]
pub fn write_person_schema(dir: &Path) -> AnyEmptyResult {
	let schema = serde_json::json!({
		"title": "Person",
		"type": "object",
		"required": ["name"],
		"properties": {
			"name": { "type": "string", "description": "Full name" },
			"age": { "type": "integer", "minimum": 0, "examples": [42] }
		}
	});
	std::fs::write(dir.join("schema.json"), serde_json::to_string_pretty(&schema)?)?;

	Ok(())
}
