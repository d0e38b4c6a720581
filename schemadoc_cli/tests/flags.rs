use clap::Parser;
use schemadoc_cli::Commands;
use schemadoc_cli::SchemaDocCli;
use schemadoc_core::AnyEmptyResult;
use schemadoc_core::ExampleFormat;
use schemadoc_core::SchemaDocConfig;
use schemadoc_core::ShowExamples;

#[test]
fn defaults_without_flags_or_config() -> AnyEmptyResult {
	let cli = SchemaDocCli::try_parse_from(["schemadoc", "generate", "schema.json"])?;
	let options = cli.render_options(None);

	assert!(matches!(cli.command, Some(Commands::Generate { output: None, .. })));
	assert_eq!(options.examples_format, ExampleFormat::Json);
	assert_eq!(options.show_examples, ShowExamples::All);
	assert_eq!(options.header_level, 0);
	assert!(options.fail_on_error_in_defs);
	assert!(options.ignore_patterns.is_empty());

	Ok(())
}

#[test]
fn flags_are_merged_over_config() -> AnyEmptyResult {
	let config = SchemaDocConfig::from_toml(
		"show_examples = \"object\"\nheader_level = 2\nignore_patterns = [\"properties/a\"]\n",
	)?;
	let cli = SchemaDocCli::try_parse_from([
		"schemadoc",
		"check",
		"schema.json",
		"schema.md",
		"--diff",
		"--show-examples",
		"properties",
		"--ignore",
		"properties/b",
		"--ignore-error-in-defs",
		"--collapse-children",
	])?;
	let options = cli.render_options(Some(config));

	assert!(matches!(cli.command, Some(Commands::Check { diff: true, .. })));
	assert_eq!(options.show_examples, ShowExamples::Properties);
	assert_eq!(options.header_level, 2);
	similar_asserts::assert_eq!(options.ignore_patterns, vec!["properties/a", "properties/b"]);
	assert!(!options.fail_on_error_in_defs);
	assert!(options.collapse_children);
	assert!(!options.show_deprecated);

	Ok(())
}

#[test]
fn show_examples_flag_rejects_unknown_values() {
	let result = SchemaDocCli::try_parse_from([
		"schemadoc",
		"generate",
		"schema.json",
		"--show-examples",
		"never",
	]);

	assert!(result.is_err());
}

#[test]
fn negated_flags_switch_config_values_off() -> AnyEmptyResult {
	let config = SchemaDocConfig::from_toml(
		"examples_as_yaml = true\nshow_deprecated = true\ncollapse_children = true\nfail_on_error_in_defs = false\n",
	)?;
	let cli = SchemaDocCli::try_parse_from([
		"schemadoc",
		"generate",
		"schema.json",
		"--no-examples-as-yaml",
		"--no-show-deprecated",
		"--no-collapse-children",
		"--no-ignore-error-in-defs",
	])?;
	let options = cli.render_options(Some(config));

	assert_eq!(options.examples_format, ExampleFormat::Json);
	assert!(!options.show_deprecated);
	assert!(!options.collapse_children);
	assert!(options.fail_on_error_in_defs);

	Ok(())
}

#[test]
fn config_values_survive_when_no_toggle_is_passed() -> AnyEmptyResult {
	let config = SchemaDocConfig::from_toml("examples_as_yaml = true\nshow_deprecated = true\n")?;
	let cli = SchemaDocCli::try_parse_from(["schemadoc", "generate", "schema.json"])?;
	let options = cli.render_options(Some(config));

	assert_eq!(options.examples_format, ExampleFormat::Yaml);
	assert!(options.show_deprecated);

	Ok(())
}

#[test]
fn last_of_a_flag_pair_wins() -> AnyEmptyResult {
	let cli = SchemaDocCli::try_parse_from([
		"schemadoc",
		"generate",
		"schema.json",
		"--show-deprecated",
		"--no-show-deprecated",
		"--no-collapse-children",
		"--collapse-children",
	])?;
	let options = cli.render_options(None);

	assert!(!options.show_deprecated);
	assert!(options.collapse_children);

	Ok(())
}
