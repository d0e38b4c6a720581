use serde_json::Map;
use serde_json::Value;

use crate::DEFAULT_ROOT_NAME;
use crate::IgnorePatterns;
use crate::MarkdownLines;
use crate::RenderOptions;
use crate::SchemaDocError;
use crate::SchemaDocResult;
use crate::SchemaPath;
use crate::clauses::display_scalar;
use crate::example::render_examples;
use crate::walker::Visit;
use crate::walker::dependent_requirers;

const EXTRA_PROPERTY_SECTIONS: [(&str, &str); 2] = [
	("additionalProperties", "Additional Properties"),
	("unevaluatedProperties", "Unevaluated Properties"),
];

const DEFINITION_KEYWORDS: [&str; 2] = ["definitions", "$defs"];

/// A definition entry that failed to render and was left out of the
/// document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefinitionWarning {
	/// `definitions` or `$defs`.
	pub section: String,
	/// Name of the skipped entry.
	pub name: String,
	/// The rendering error.
	pub message: String,
}

/// The output of rendering one schema.
#[derive(Debug, Clone, Default)]
pub struct RenderedDocument {
	/// Markdown fragments in document order.
	pub lines: MarkdownLines,
	/// Definitions skipped because they failed to render.
	pub warnings: Vec<DefinitionWarning>,
}

impl RenderedDocument {
	/// The complete markdown document.
	pub fn to_markdown(&self) -> String {
		self.lines.to_markdown()
	}

	pub fn fragments(&self) -> &[String] {
		self.lines.fragments()
	}

	/// Returns true if any definition was skipped.
	pub fn has_warnings(&self) -> bool {
		!self.warnings.is_empty()
	}
}

/// Renders JSON Schema documents as markdown.
///
/// Construction validates the options, so an invalid ignore pattern is
/// reported before any schema is visited.
///
/// ```rust
/// use schemadoc_core::RenderOptions;
/// use schemadoc_core::SchemaRenderer;
///
/// let renderer = SchemaRenderer::new(RenderOptions::default()).unwrap();
/// let schema = serde_json::json!({
/// 	"type": "object",
/// 	"properties": { "name": { "type": "string" } },
/// 	"required": ["name"],
/// });
/// let markdown = renderer.render(&schema).unwrap().to_markdown();
/// assert!(markdown.contains("- **`name`** *(string, required)*"));
/// ```
#[derive(Debug, Clone)]
pub struct SchemaRenderer {
	pub(crate) options: RenderOptions,
	pub(crate) ignore: IgnorePatterns,
}

impl SchemaRenderer {
	pub fn new(options: RenderOptions) -> SchemaDocResult<Self> {
		let ignore = IgnorePatterns::compile(&options.ignore_patterns)?;
		Ok(Self { options, ignore })
	}

	pub fn options(&self) -> &RenderOptions {
		&self.options
	}

	/// Render a complete schema document.
	///
	/// Sections are emitted in a fixed order: description, items,
	/// additional/unevaluated properties, pattern properties, properties,
	/// definitions, and examples.
	pub fn render(&self, schema: &Value) -> SchemaDocResult<RenderedDocument> {
		let Value::Object(root) = schema else {
			return Err(SchemaDocError::non_object(Some("schema"), schema));
		};

		let mut lines = MarkdownLines::new();
		let mut warnings = Vec::new();

		if let Some(description) = root.get("description") {
			lines.push(format!("*{}*\n\n", display_scalar(description)));
		}

		if let Some(items) = root.get("items") {
			tracing::debug!("rendering items section");
			lines.push(self.section_heading("Items"));
			self.walk(
				items,
				Visit::labelled("Items", SchemaPath::new(["items"]), 0),
				&mut lines,
			)?;
		}

		for (keyword, title) in EXTRA_PROPERTY_SECTIONS {
			if let Some(schema @ Value::Object(_)) = root.get(keyword) {
				tracing::debug!(keyword, "rendering extra properties section");
				lines.push(self.section_heading(title));
				self.walk(
					schema,
					Visit::labelled(title, SchemaPath::new([keyword]), 0),
					&mut lines,
				)?;
			}
		}

		if let Some(patterns) = root.get("patternProperties") {
			tracing::debug!("rendering pattern properties section");
			lines.push(self.section_heading("Pattern Properties"));
			for (pattern, schema) in entries("patternProperties", patterns)? {
				let path = SchemaPath::new(["patternProperties", pattern.as_str()]);
				self.walk(schema, Visit::named(pattern, path, 0), &mut lines)?;
			}
		}

		let root_name = self.root_name(root);
		lines.push(self.section_heading("Properties"));
		let visit = Visit::named(
			&root_name,
			SchemaPath::new(["properties", root_name.as_str()]),
			0,
		)
		.with_required(true, dependent_requirers(root, &root_name));
		self.walk(schema, visit, &mut lines)?;

		for section in DEFINITION_KEYWORDS {
			let Some(definitions) = root.get(section) else {
				continue;
			};

			tracing::debug!(section, "rendering definitions section");
			lines.push(self.section_heading("Definitions"));
			for (name, definition) in entries(section, definitions)? {
				let mut fragment = MarkdownLines::new();
				let path = SchemaPath::new([section, name.as_str()]);

				match self.walk(definition, Visit::named(name, path.clone(), 0), &mut fragment) {
					Ok(()) => lines.append(fragment),
					Err(error) if self.options.fail_on_error_in_defs => {
						return Err(SchemaDocError::Definition {
							section: section.to_string(),
							name: name.clone(),
							source: Box::new(error),
						});
					}
					Err(error) => {
						tracing::warn!(
							section,
							path = %path,
							%error,
							"skipping definition that failed to render"
						);
						warnings.push(DefinitionWarning {
							section: section.to_string(),
							name: name.clone(),
							message: error.to_string(),
						});
					}
				}
			}
		}

		if root.contains_key("examples") && self.options.show_examples.includes_object() {
			lines.push(self.section_heading("Examples"));
			lines.extend(render_examples(
				root,
				self.options.examples_format,
				0,
				false,
			)?);
		}

		Ok(RenderedDocument { lines, warnings })
	}

	fn section_heading(&self, title: &str) -> String {
		format!("{} {title}\n\n", "#".repeat(self.options.header_level + 2))
	}

	/// Configured root name, then the schema `title`, then the default.
	fn root_name(&self, root: &Map<String, Value>) -> String {
		self.options
			.root_name
			.clone()
			.or_else(|| root.get("title").and_then(Value::as_str).map(str::to_string))
			.unwrap_or_else(|| DEFAULT_ROOT_NAME.to_string())
	}
}

/// Render `schema` with `options` in one call.
pub fn render_schema(schema: &Value, options: RenderOptions) -> SchemaDocResult<RenderedDocument> {
	SchemaRenderer::new(options)?.render(schema)
}

fn entries<'a>(keyword: &str, value: &'a Value) -> SchemaDocResult<&'a Map<String, Value>> {
	value.as_object().ok_or_else(|| SchemaDocError::InvalidMapping {
		keyword: keyword.to_string(),
		value: value.to_string(),
	})
}
