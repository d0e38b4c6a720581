use std::path::Path;

use serde_json::Value;

use crate::SchemaDocError;
use crate::SchemaDocResult;

/// Serialization format of a schema document on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaFormat {
	Json,
	Yaml,
}

impl SchemaFormat {
	/// Detect the format from a file extension (`json`, `yaml` or `yml`).
	pub fn from_extension(extension: &str) -> SchemaDocResult<Self> {
		match extension.to_ascii_lowercase().as_str() {
			"json" => Ok(Self::Json),
			"yaml" | "yml" => Ok(Self::Yaml),
			other => Err(SchemaDocError::UnsupportedSchemaFormat(other.to_string())),
		}
	}

	pub fn from_path(path: &Path) -> SchemaDocResult<Self> {
		let extension = path
			.extension()
			.and_then(|e| e.to_str())
			.unwrap_or_default();
		Self::from_extension(extension)
	}
}

/// Read and parse the schema document at `path`.
pub fn load_schema(path: &Path) -> SchemaDocResult<Value> {
	let format = SchemaFormat::from_path(path)?;
	let content = std::fs::read_to_string(path)?;
	parse_schema_str(&content, format, &path.display().to_string())
}

/// Parse a schema document held in memory. `path_display` only labels
/// errors.
pub fn parse_schema_str(
	content: &str,
	format: SchemaFormat,
	path_display: &str,
) -> SchemaDocResult<Value> {
	match format {
		SchemaFormat::Json => {
			serde_json::from_str(content).map_err(|e| SchemaDocError::SchemaParse {
				path: path_display.to_string(),
				reason: e.to_string(),
			})
		}
		SchemaFormat::Yaml => {
			serde_yaml_ng::from_str(content).map_err(|e| SchemaDocError::SchemaParse {
				path: path_display.to_string(),
				reason: e.to_string(),
			})
		}
	}
}
