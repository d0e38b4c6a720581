use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use schemadoc_core::ExampleFormat;
use schemadoc_core::RenderOptions;
use schemadoc_core::SchemaDocConfig;
use schemadoc_core::ShowExamples;

#[derive(Parser)]
#[command(
	author,
	version,
	about = "Generate markdown reference documentation from JSON Schema files.",
	long_about = "schemadoc renders a JSON Schema (JSON or YAML) into structured markdown: \
	              property lists with types and constraints, composition branches, \
	              definitions with anchors, and examples.\n\nQuick start:\n  schemadoc generate \
	              schema.json -o schema.md  Write the documentation\n  schemadoc check \
	              schema.json schema.md        Verify it is up to date\n\nOptions can also be \
	              set in a schemadoc.toml file; command line flags take precedence."
)]
#[allow(clippy::struct_excessive_bools)]
pub struct SchemaDocCli {
	#[command(subcommand)]
	pub command: Option<Commands>,

	/// Path to a config file. Defaults to the first of `schemadoc.toml`,
	/// `.schemadoc.toml` or `.config/schemadoc.toml` in the working
	/// directory.
	#[arg(long, global = true)]
	pub config: Option<PathBuf>,

	/// Render examples as YAML instead of JSON.
	#[arg(long, global = true, overrides_with = "no_examples_as_yaml")]
	pub examples_as_yaml: bool,

	/// Render examples as JSON, even when the config file selects YAML.
	#[arg(long, global = true, overrides_with = "examples_as_yaml")]
	pub no_examples_as_yaml: bool,

	/// Which scopes render their examples.
	#[arg(long, global = true, value_enum)]
	pub show_examples: Option<ShowExamplesArg>,

	/// Include properties marked `deprecated`.
	#[arg(long, global = true, overrides_with = "no_show_deprecated")]
	pub show_deprecated: bool,

	/// Leave out properties marked `deprecated`.
	#[arg(long, global = true, overrides_with = "show_deprecated")]
	pub no_show_deprecated: bool,

	/// Collapse objects with nested properties into `<details>` blocks.
	#[arg(long, global = true, overrides_with = "no_collapse_children")]
	pub collapse_children: bool,

	/// Render nested properties inline.
	#[arg(long, global = true, overrides_with = "collapse_children")]
	pub no_collapse_children: bool,

	/// Base heading level added to every generated heading.
	#[arg(long, global = true)]
	pub header_level: Option<usize>,

	/// Regular expression matched against node paths such as
	/// `properties/name`. Matching nodes hide their own line but keep their
	/// children. May be repeated.
	#[arg(long = "ignore", global = true, value_name = "REGEX")]
	pub ignore_patterns: Vec<String>,

	/// Skip definitions that fail to render instead of aborting.
	#[arg(long, global = true, overrides_with = "no_ignore_error_in_defs")]
	pub ignore_error_in_defs: bool,

	/// Abort on the first definition that fails to render.
	#[arg(long, global = true, overrides_with = "ignore_error_in_defs")]
	pub no_ignore_error_in_defs: bool,

	/// Display name for the root schema in the "Properties" section.
	#[arg(long, global = true)]
	pub root_name: Option<String>,

	/// Enable verbose output.
	#[arg(long, short, global = true, default_value_t = false)]
	pub verbose: bool,

	/// Disable colored output.
	#[arg(long, global = true, default_value_t = false)]
	pub no_color: bool,
}

impl SchemaDocCli {
	/// Merge command line flags over the values from `config`.
	pub fn render_options(&self, config: Option<SchemaDocConfig>) -> RenderOptions {
		let mut options = config.map(SchemaDocConfig::into_options).unwrap_or_default();

		if let Some(yaml) = toggle(self.examples_as_yaml, self.no_examples_as_yaml) {
			options.examples_format = if yaml {
				ExampleFormat::Yaml
			} else {
				ExampleFormat::Json
			};
		}
		if let Some(show_examples) = self.show_examples {
			options.show_examples = show_examples.into();
		}
		if let Some(show) = toggle(self.show_deprecated, self.no_show_deprecated) {
			options.show_deprecated = show;
		}
		if let Some(collapse) = toggle(self.collapse_children, self.no_collapse_children) {
			options.collapse_children = collapse;
		}
		if let Some(header_level) = self.header_level {
			options.header_level = header_level;
		}
		options
			.ignore_patterns
			.extend(self.ignore_patterns.iter().cloned());
		if let Some(ignore) = toggle(self.ignore_error_in_defs, self.no_ignore_error_in_defs) {
			options.fail_on_error_in_defs = !ignore;
		}
		if let Some(root_name) = &self.root_name {
			options.root_name = Some(root_name.clone());
		}

		options
	}
}

/// The value of an `--x` / `--no-x` pair, or `None` when neither was passed.
fn toggle(on: bool, off: bool) -> Option<bool> {
	if on {
		Some(true)
	} else if off {
		Some(false)
	} else {
		None
	}
}

#[derive(Subcommand)]
pub enum Commands {
	/// Render a schema to markdown.
	///
	/// Reads a JSON or YAML schema and writes the generated documentation to
	/// `--output`, or to stdout when no output file is given. Definitions that
	/// fail to render abort the command unless `--ignore-error-in-defs` is
	/// set.
	Generate {
		/// The schema file (`.json`, `.yaml` or `.yml`).
		input: PathBuf,

		/// Where to write the markdown. Prints to stdout when omitted.
		#[arg(long, short)]
		output: Option<PathBuf>,
	},
	/// Check that a generated markdown file is up to date.
	///
	/// Renders the schema and compares the result with the existing file.
	/// Exits with a non-zero status code when they differ, which makes it
	/// suitable for CI and pre-commit hooks.
	Check {
		/// The schema file (`.json`, `.yaml` or `.yml`).
		input: PathBuf,

		/// The previously generated markdown file.
		output: PathBuf,

		/// Show a line diff between the current file and the expected
		/// content.
		#[arg(long, default_value_t = false)]
		diff: bool,
	},
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ShowExamplesArg {
	/// Examples of the top-level schema and of every property.
	All,
	/// Only the top-level "Examples" section.
	Object,
	/// Only examples attached to properties.
	Properties,
}

impl From<ShowExamplesArg> for ShowExamples {
	fn from(value: ShowExamplesArg) -> Self {
		match value {
			ShowExamplesArg::All => Self::All,
			ShowExamplesArg::Object => Self::Object,
			ShowExamplesArg::Properties => Self::Properties,
		}
	}
}
