use std::io;

use float_cmp::approx_eq;
use percent_encoding::AsciiSet;
use percent_encoding::NON_ALPHANUMERIC;
use percent_encoding::utf8_percent_encode;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;

use crate::SchemaDocError;
use crate::SchemaDocResult;
use crate::node::is_truthy;

/// Characters left untouched when escaping anchors and links: unreserved
/// characters plus `/`.
const URL_ESCAPE_SET: &AsciiSet = &NON_ALPHANUMERIC
	.remove(b'_')
	.remove(b'.')
	.remove(b'-')
	.remove(b'~')
	.remove(b'/');

/// Prefixes removed from same-document `$ref` targets.
const REF_PREFIXES: [&str; 2] = ["#/$defs/", "#/definitions/"];

const PATTERN_TEST_URL: &str = "https://regexr.com/?expression=";

/// Build the ordered constraint clauses for one schema object.
///
/// Every clause is a self-contained sentence. When at least one clause is
/// produced a lone `":"` is prepended so the caller can join the clauses
/// straight after a name or type header.
pub fn describe(node: &Map<String, Value>, include_type: bool) -> SchemaDocResult<Vec<String>> {
	let mut clauses = Vec::new();

	if let Some(description) = node.get("description") {
		let description = display_scalar(description);
		let ending = if description.ends_with(['.', '?', '!', ';']) {
			""
		} else {
			"."
		};
		clauses.push(format!("{description}{ending}"));
	}

	if include_type {
		if let Some(kind) = node.get("type") {
			clauses.push(format!("Must be of type *{}*.", type_label(kind)));
		}
	}

	if let Some(encoding) = node.get("contentEncoding") {
		clauses.push(format!("Content encoding: `{}`.", display_scalar(encoding)));
	}

	if let Some(media_type) = node.get("contentMediaType") {
		clauses.push(format!(
			"Content media type: `{}`.",
			display_scalar(media_type)
		));
	}

	push_numeric_bounds(node, &mut clauses);

	if let Some(bound) = CountBound::read(node, "minItems", "maxItems") {
		clauses.push(format!("Length must be {}.", bound.phrase()));
	}

	if let Some(multiple) = node.get("multipleOf") {
		if multiple.as_f64().is_some_and(|n| approx_eq!(f64, n, 1.0, ulps = 2)) {
			clauses.push("Must be an integer.".to_string());
		} else {
			clauses.push(format!("Must be a multiple of `{}`.", display_scalar(multiple)));
		}
	}

	if let Some(bound) = CountBound::read(node, "minLength", "maxLength") {
		clauses.push(format!("Length must be {}.", bound.phrase()));
	}

	if let Some(pattern) = node.get("pattern") {
		let pattern = display_scalar(pattern);
		let link = format!("{PATTERN_TEST_URL}{}", url_escape(&pattern));
		clauses.push(format!("Must match pattern: `{pattern}` ([Test]({link}))."));
	}

	if is_truthy(node.get("uniqueItems")) {
		clauses.push("Items must be unique.".to_string());
	}

	if let Some(bound) = CountBound::read(node, "minContains", "maxContains") {
		clauses.push(format!(
			"Contains schema must be matched {}.",
			bound.contains_phrase()
		));
	}

	if let Some(bound) = CountBound::read(node, "minProperties", "maxProperties") {
		clauses.push(format!("Number of properties must be {}.", bound.phrase()));
	}

	if let Some(values) = node.get("enum") {
		clauses.push(format!("Must be one of: `{}`.", inline_json(values)?));
	}

	if let Some(value) = node.get("const") {
		clauses.push(format!("Must be: `{}`.", inline_json(value)?));
	}

	for (keyword, label) in [
		("additionalProperties", "additional"),
		("unevaluatedProperties", "unevaluated"),
	] {
		if let Some(allowance) = node.get(keyword) {
			if matches!(allowance, Value::Bool(false)) {
				clauses.push(format!("Cannot contain {label} properties."));
			} else {
				clauses.push(format!("Can contain {label} properties."));
			}
		}
	}

	if let Some(reference) = node.get("$ref") {
		let target = ref_target(&display_scalar(reference));
		clauses.push(format!("Refer to *[{target}](#{})*.", url_escape(&target)));
	}

	if let Some(default) = node.get("default") {
		clauses.push(format!("Default: `{}`.", inline_json(default)?));
	}

	if !clauses.is_empty() {
		clauses.insert(0, ":".to_string());
	}

	Ok(clauses)
}

/// `minimum` and `maximum` collapse into one clause when they are equal.
fn push_numeric_bounds(node: &Map<String, Value>, clauses: &mut Vec<String>) {
	let minimum = node.get("minimum");
	let maximum = node.get("maximum");
	let pinned = match (minimum, maximum) {
		(Some(min), Some(max)) => same_number(min, max),
		_ => false,
	};

	if let Some(min) = minimum {
		if pinned {
			clauses.push(format!("Must be equal to `{}`.", display_scalar(min)));
		} else {
			clauses.push(format!("Minimum: `{}`.", display_scalar(min)));
		}
	}

	if let Some(value) = node.get("exclusiveMinimum") {
		clauses.push(format!("Exclusive minimum: `{}`.", display_scalar(value)));
	}

	if let Some(max) = maximum {
		if !pinned {
			clauses.push(format!("Maximum: `{}`.", display_scalar(max)));
		}
	}

	if let Some(value) = node.get("exclusiveMaximum") {
		clauses.push(format!("Exclusive maximum: `{}`.", display_scalar(value)));
	}
}

/// A lower and/or upper count limit read from a pair of keywords.
#[derive(Debug, Clone, Copy, PartialEq)]
enum CountBound<'a> {
	AtLeast(&'a Value),
	AtMost(&'a Value),
	Exactly(&'a Value),
	Between(&'a Value, &'a Value),
}

impl<'a> CountBound<'a> {
	fn read(node: &'a Map<String, Value>, min_key: &str, max_key: &str) -> Option<Self> {
		match (node.get(min_key), node.get(max_key)) {
			(None, None) => None,
			(Some(min), None) => Some(Self::AtLeast(min)),
			(None, Some(max)) => Some(Self::AtMost(max)),
			(Some(min), Some(max)) if same_number(min, max) => Some(Self::Exactly(min)),
			(Some(min), Some(max)) => Some(Self::Between(min, max)),
		}
	}

	fn phrase(self) -> String {
		match self {
			Self::AtLeast(min) => format!("at least {}", display_scalar(min)),
			Self::AtMost(max) => format!("at most {}", display_scalar(max)),
			Self::Exactly(value) => format!("equal to {}", display_scalar(value)),
			Self::Between(min, max) => {
				format!(
					"between {} and {} (inclusive)",
					display_scalar(min),
					display_scalar(max)
				)
			}
		}
	}

	fn contains_phrase(self) -> String {
		match self {
			Self::AtLeast(min) => format!("at least {} times", display_scalar(min)),
			Self::AtMost(max) => format!("at most {} times", display_scalar(max)),
			Self::Exactly(value) => format!("exactly {} times", display_scalar(value)),
			Self::Between(min, max) => {
				format!(
					"between {} and {} times (inclusive)",
					display_scalar(min),
					display_scalar(max)
				)
			}
		}
	}
}

/// Exact equality. Two integers compare without going through `f64`, so
/// bounds above 2^53 stay distinct.
#[allow(clippy::float_cmp)]
fn same_number(a: &Value, b: &Value) -> bool {
	match (a, b) {
		(Value::Number(a), Value::Number(b)) if a.is_f64() || b.is_f64() => {
			matches!((a.as_f64(), b.as_f64()), (Some(a), Some(b)) if a == b)
		}
		_ => a == b,
	}
}

/// Strip the same-document definition prefix from a `$ref`.
pub(crate) fn ref_target(reference: &str) -> String {
	REF_PREFIXES
		.iter()
		.find_map(|prefix| reference.strip_prefix(prefix))
		.unwrap_or(reference)
		.to_string()
}

/// Percent-escape `value` for use in a link target or anchor id.
pub(crate) fn url_escape(value: &str) -> String {
	utf8_percent_encode(value, URL_ESCAPE_SET).to_string()
}

/// Render a scalar without JSON quoting. Non-scalar values fall back to
/// their JSON text.
pub(crate) fn display_scalar(value: &Value) -> String {
	match value {
		Value::String(s) => s.clone(),
		other => other.to_string(),
	}
}

/// Render a `type` keyword. A list of types is joined with ` | `.
pub(crate) fn type_label(kind: &Value) -> String {
	match kind {
		Value::Array(kinds) => kinds
			.iter()
			.map(display_scalar)
			.collect::<Vec<_>>()
			.join(" | "),
		other => display_scalar(other),
	}
}

/// Single-line JSON with a space after every `,` and `:`.
pub(crate) fn inline_json(value: &Value) -> SchemaDocResult<String> {
	let mut buffer = Vec::new();
	let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, SpacedFormatter);
	value
		.serialize(&mut serializer)
		.map_err(|e| SchemaDocError::Serialize(e.to_string()))?;

	String::from_utf8(buffer).map_err(|e| SchemaDocError::Serialize(e.to_string()))
}

struct SpacedFormatter;

impl serde_json::ser::Formatter for SpacedFormatter {
	fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
	where
		W: ?Sized + io::Write,
	{
		if first { Ok(()) } else { writer.write_all(b", ") }
	}

	fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
	where
		W: ?Sized + io::Write,
	{
		if first { Ok(()) } else { writer.write_all(b", ") }
	}

	fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
	where
		W: ?Sized + io::Write,
	{
		writer.write_all(b": ")
	}
}
