use std::fmt;
use std::path::Path;
use std::path::PathBuf;
use std::str::FromStr;

use regex::Regex;
use serde::Deserialize;

use crate::SchemaDocError;
use crate::SchemaDocResult;
use crate::SchemaPath;

/// Supported config file locations in discovery order (highest precedence
/// first).
pub const CONFIG_FILE_CANDIDATES: [&str; 3] = [
	"schemadoc.toml",
	".schemadoc.toml",
	".config/schemadoc.toml",
];

/// Name used for the root "Properties" section when neither the options nor
/// the schema `title` provide one.
pub const DEFAULT_ROOT_NAME: &str = "root";

/// Serialization format for rendered examples.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExampleFormat {
	#[default]
	Json,
	Yaml,
}

impl ExampleFormat {
	/// The info string used on the fenced code block.
	pub fn language(self) -> &'static str {
		match self {
			Self::Json => "json",
			Self::Yaml => "yaml",
		}
	}
}

/// Which scopes render their `examples`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum ShowExamples {
	/// Examples of the top-level schema and of every nested node.
	#[default]
	All,
	/// Only the top-level "Examples" section.
	Object,
	/// Only examples attached to nested nodes.
	Properties,
}

impl ShowExamples {
	/// Returns `true` when the top-level "Examples" section is rendered.
	pub fn includes_object(self) -> bool {
		matches!(self, Self::All | Self::Object)
	}

	/// Returns `true` when examples are rendered beneath each visited node.
	pub fn includes_properties(self) -> bool {
		matches!(self, Self::All | Self::Properties)
	}
}

impl FromStr for ShowExamples {
	type Err = SchemaDocError;

	fn from_str(value: &str) -> Result<Self, Self::Err> {
		match value.to_ascii_lowercase().as_str() {
			"all" => Ok(Self::All),
			"object" => Ok(Self::Object),
			"properties" => Ok(Self::Properties),
			_ => Err(SchemaDocError::InvalidShowExamples(value.to_string())),
		}
	}
}

impl TryFrom<String> for ShowExamples {
	type Error = SchemaDocError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		value.parse()
	}
}

impl fmt::Display for ShowExamples {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let name = match self {
			Self::All => "all",
			Self::Object => "object",
			Self::Properties => "properties",
		};
		f.write_str(name)
	}
}

/// Options controlling how a schema is rendered.
#[derive(Debug, Clone)]
pub struct RenderOptions {
	/// Serialization format for examples. Defaults to JSON.
	pub examples_format: ExampleFormat,
	/// Which scopes render their examples.
	pub show_examples: ShowExamples,
	/// Include nodes marked `deprecated`. When `false` the node and its whole
	/// subtree are left out.
	pub show_deprecated: bool,
	/// Wrap nodes with nested properties in `<details>` blocks.
	pub collapse_children: bool,
	/// Added to the level of every generated heading.
	pub header_level: usize,
	/// Regular expressions matched against the start of a node's
	/// `/`-joined path (e.g. `properties/name`). A matching node's own
	/// line is hidden but its children are still rendered.
	pub ignore_patterns: Vec<String>,
	/// Abort on the first definition that fails to render. When `false`
	/// the entry is skipped and reported as a warning.
	pub fail_on_error_in_defs: bool,
	/// Display name of the root node in the "Properties" section. Falls back
	/// to the schema `title`, then [`DEFAULT_ROOT_NAME`].
	pub root_name: Option<String>,
}

impl Default for RenderOptions {
	fn default() -> Self {
		Self {
			examples_format: ExampleFormat::Json,
			show_examples: ShowExamples::All,
			show_deprecated: false,
			collapse_children: false,
			header_level: 0,
			ignore_patterns: Vec::new(),
			fail_on_error_in_defs: true,
			root_name: None,
		}
	}
}

/// Compiled ignore patterns.
#[derive(Debug, Clone, Default)]
pub struct IgnorePatterns(Vec<Regex>);

impl IgnorePatterns {
	/// Compile every pattern, anchoring it to the start of the path.
	pub fn compile<S: AsRef<str>>(patterns: &[S]) -> SchemaDocResult<Self> {
		let compiled = patterns
			.iter()
			.map(|pattern| {
				let pattern = pattern.as_ref();
				Regex::new(&format!("^(?:{pattern})")).map_err(|e| {
					SchemaDocError::InvalidIgnorePattern {
						pattern: pattern.to_string(),
						reason: e.to_string(),
					}
				})
			})
			.collect::<SchemaDocResult<Vec<_>>>()?;

		Ok(Self(compiled))
	}

	/// Returns `true` if any pattern matches the start of `path`.
	pub fn is_ignored(&self, path: &SchemaPath) -> bool {
		if self.0.is_empty() {
			return false;
		}

		let joined = path.joined();
		self.0.iter().any(|regex| regex.is_match(&joined))
	}
}

/// Configuration loaded from a `schemadoc.toml` file. Every key is optional
/// and mirrors a [`RenderOptions`] field.
///
/// ```toml
/// examples_as_yaml = false
/// show_examples = "properties"
/// show_deprecated = false
/// collapse_children = true
/// header_level = 1
/// ignore_patterns = ["properties/internal"]
/// fail_on_error_in_defs = false
/// root_name = "ModProfile"
/// ```
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SchemaDocConfig {
	#[serde(default)]
	pub examples_as_yaml: Option<bool>,
	#[serde(default)]
	pub show_examples: Option<ShowExamples>,
	#[serde(default)]
	pub show_deprecated: Option<bool>,
	#[serde(default)]
	pub collapse_children: Option<bool>,
	#[serde(default)]
	pub header_level: Option<usize>,
	#[serde(default)]
	pub ignore_patterns: Vec<String>,
	#[serde(default)]
	pub fail_on_error_in_defs: Option<bool>,
	#[serde(default)]
	pub root_name: Option<String>,
}

impl SchemaDocConfig {
	/// Resolve the config path from known discovery candidates.
	#[must_use]
	pub fn resolve_path(root: &Path) -> Option<PathBuf> {
		CONFIG_FILE_CANDIDATES
			.iter()
			.map(|candidate| root.join(candidate))
			.find(|path| path.is_file())
	}

	/// Load the config from the first discovered config file at `root`.
	/// Returns `None` if no config file exists.
	pub fn load(root: &Path) -> SchemaDocResult<Option<Self>> {
		let Some(config_path) = Self::resolve_path(root) else {
			return Ok(None);
		};

		Self::load_file(&config_path).map(Some)
	}

	/// Load the config from an explicit file path.
	pub fn load_file(path: &Path) -> SchemaDocResult<Self> {
		let content = std::fs::read_to_string(path)?;
		Self::from_toml(&content)
	}

	pub fn from_toml(content: &str) -> SchemaDocResult<Self> {
		toml::from_str(content).map_err(|e| SchemaDocError::ConfigParse(e.to_string()))
	}

	/// Convert into [`RenderOptions`], using defaults for absent keys.
	pub fn into_options(self) -> RenderOptions {
		let defaults = RenderOptions::default();

		RenderOptions {
			examples_format: match self.examples_as_yaml {
				Some(true) => ExampleFormat::Yaml,
				Some(false) => ExampleFormat::Json,
				None => defaults.examples_format,
			},
			show_examples: self.show_examples.unwrap_or(defaults.show_examples),
			show_deprecated: self.show_deprecated.unwrap_or(defaults.show_deprecated),
			collapse_children: self.collapse_children.unwrap_or(defaults.collapse_children),
			header_level: self.header_level.unwrap_or(defaults.header_level),
			ignore_patterns: self.ignore_patterns,
			fail_on_error_in_defs: self
				.fail_on_error_in_defs
				.unwrap_or(defaults.fail_on_error_in_defs),
			root_name: self.root_name,
		}
	}
}
