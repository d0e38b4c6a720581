use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum SchemaDocError {
	#[error(transparent)]
	#[diagnostic(code(schemadoc::io_error))]
	Io(#[from] std::io::Error),

	#[error("non-object type found in properties list: `{name}: {value}`")]
	#[diagnostic(
		code(schemadoc::non_object_node),
		help("every subschema must be a JSON object (or a list of objects)")
	)]
	NonObjectNode { name: String, value: String },

	#[error("`{keyword}` must hold a list of subschemas, found `{value}`")]
	#[diagnostic(code(schemadoc::invalid_composition))]
	InvalidComposition { keyword: String, value: String },

	#[error("`{keyword}` must hold a mapping of name to subschema, found `{value}`")]
	#[diagnostic(code(schemadoc::invalid_mapping))]
	InvalidMapping { keyword: String, value: String },

	#[error("failed to render `{name}` from `{section}`")]
	#[diagnostic(
		code(schemadoc::definition),
		help(
			"this usually happens when the kind of definition is not supported; pass \
			 `--ignore-error-in-defs` to skip it with a warning"
		)
	)]
	Definition {
		section: String,
		name: String,
		#[source]
		source: Box<SchemaDocError>,
	},

	#[error("invalid `show_examples` value: `{0}`")]
	#[diagnostic(
		code(schemadoc::invalid_show_examples),
		help("valid options are `all`, `object` and `properties`")
	)]
	InvalidShowExamples(String),

	#[error("invalid ignore pattern `{pattern}`: {reason}")]
	#[diagnostic(
		code(schemadoc::invalid_ignore_pattern),
		help("ignore patterns are regular expressions matched against paths like `properties/name`")
	)]
	InvalidIgnorePattern { pattern: String, reason: String },

	#[error("failed to parse schema `{path}`: {reason}")]
	#[diagnostic(code(schemadoc::schema_parse))]
	SchemaParse { path: String, reason: String },

	#[error("unsupported schema file format: `{0}`")]
	#[diagnostic(
		code(schemadoc::unsupported_format),
		help("supported formats: json, yaml, yml")
	)]
	UnsupportedSchemaFormat(String),

	#[error("failed to parse config file: {0}")]
	#[diagnostic(
		code(schemadoc::config_parse),
		help("check that schemadoc.toml is valid TOML with known keys")
	)]
	ConfigParse(String),

	#[error("failure to render markdown summary: {0}")]
	#[diagnostic(code(schemadoc::markdown))]
	Markdown(String),

	#[error("failed to serialize example: {0}")]
	#[diagnostic(code(schemadoc::serialize))]
	Serialize(String),

	#[error("generated documentation in {path} is out of date")]
	#[diagnostic(
		code(schemadoc::outdated_output),
		help("run `schemadoc generate` to regenerate the file")
	)]
	OutdatedOutput { path: String },
}

impl SchemaDocError {
	/// Build a structural error for a value that is neither a mapping nor a
	/// list.
	pub(crate) fn non_object(name: Option<&str>, value: &serde_json::Value) -> Self {
		Self::NonObjectNode {
			name: name.unwrap_or("None").to_string(),
			value: value.to_string(),
		}
	}
}

pub type SchemaDocResult<T> = Result<T, SchemaDocError>;
pub type AnyError = Box<dyn std::error::Error>;
pub type AnyEmptyResult = Result<(), AnyError>;
pub type AnyResult<T> = Result<T, AnyError>;
