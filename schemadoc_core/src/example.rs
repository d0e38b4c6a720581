use serde::Serialize;
use serde_json::Map;
use serde_json::Value;
use serde_json::ser::PrettyFormatter;

use crate::ExampleFormat;
use crate::SchemaDocError;
use crate::SchemaDocResult;

/// Number of spaces per nesting level.
pub const TAB_SIZE: usize = 2;

/// Render the `examples` of `node` as fenced code blocks indented to
/// `depth`. Returns no fragments when the node has no `examples`.
///
/// A value other than a sequence is treated as a single example.
pub fn render_examples(
	node: &Map<String, Value>,
	format: ExampleFormat,
	depth: usize,
	add_header: bool,
) -> SchemaDocResult<Vec<String>> {
	let Some(examples) = node.get("examples") else {
		return Ok(Vec::new());
	};

	let indentation = " ".repeat(TAB_SIZE * (depth + 1));
	let mut fragments = Vec::new();

	if add_header {
		fragments.push(format!("\n{indentation}Examples:\n"));
	}

	let examples = match examples {
		Value::Array(items) => items.as_slice(),
		single => std::slice::from_ref(single),
	};

	let language = format.language();
	for example in examples {
		let body = match format {
			ExampleFormat::Json => prefix_lines(&pretty_json(example)?, &indentation),
			ExampleFormat::Yaml => {
				prefix_lines(&yaml(example)?, &indentation)
					.trim_end()
					.to_string()
			}
		};
		fragments.push(format!(
			"{indentation}```{language}\n{body}\n{indentation}```\n\n"
		));
	}

	Ok(fragments)
}

fn pretty_json(value: &Value) -> SchemaDocResult<String> {
	let mut buffer = Vec::new();
	let formatter = PrettyFormatter::with_indent(b"    ");
	let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
	value
		.serialize(&mut serializer)
		.map_err(|e| SchemaDocError::Serialize(e.to_string()))?;

	String::from_utf8(buffer).map_err(|e| SchemaDocError::Serialize(e.to_string()))
}

fn yaml(value: &Value) -> SchemaDocResult<String> {
	serde_yaml_ng::to_string(value).map_err(|e| SchemaDocError::Serialize(e.to_string()))
}

fn prefix_lines(text: &str, prefix: &str) -> String {
	text.lines()
		.map(|line| format!("{prefix}{line}"))
		.collect::<Vec<_>>()
		.join("\n")
}
