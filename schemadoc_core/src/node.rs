use std::fmt;

use derive_more::Deref;
use serde_json::Map;
use serde_json::Value;

use crate::SchemaDocError;
use crate::SchemaDocResult;

/// A schema value in a position where a subschema is expected.
#[derive(Debug, Clone, Copy)]
pub enum SchemaNode<'a> {
	/// A regular keyword mapping.
	Object(&'a Map<String, Value>),
	/// A sequence in place of a subschema. Each element is rendered as an
	/// anonymous node.
	List(&'a [Value]),
}

impl<'a> SchemaNode<'a> {
	/// Classify `value`, rejecting anything that is neither a mapping nor a
	/// sequence.
	pub fn classify(name: Option<&str>, value: &'a Value) -> SchemaDocResult<Self> {
		match value {
			Value::Object(map) => Ok(Self::Object(map)),
			Value::Array(items) => Ok(Self::List(items)),
			other => Err(SchemaDocError::non_object(name, other)),
		}
	}
}

/// Location of a node inside the schema, e.g. `["properties", "name"]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deref)]
pub struct SchemaPath(Vec<String>);

impl SchemaPath {
	pub fn new<I, S>(segments: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self(segments.into_iter().map(Into::into).collect())
	}

	/// A new path with `segment` appended.
	#[must_use]
	pub fn child(&self, segment: impl Into<String>) -> Self {
		let mut segments = self.0.clone();
		segments.push(segment.into());
		Self(segments)
	}

	/// A new path with `keyword` and then `name` appended.
	#[must_use]
	pub fn keyed(&self, keyword: &str, name: impl Into<String>) -> Self {
		let mut segments = self.0.clone();
		segments.push(keyword.to_string());
		segments.push(name.into());
		Self(segments)
	}

	/// The segments joined with `/`, the form ignore patterns match against.
	pub fn joined(&self) -> String {
		self.0.join("/")
	}
}

impl fmt::Display for SchemaPath {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.joined())
	}
}

/// Loose truthiness for flag keywords such as `deprecated` and `uniqueItems`.
/// `null`, `false`, zero and empty values all count as unset.
pub(crate) fn is_truthy(value: Option<&Value>) -> bool {
	match value {
		None | Some(Value::Null) => false,
		Some(Value::Bool(b)) => *b,
		Some(Value::Number(n)) => n.as_f64().is_some_and(|n| n != 0.0),
		Some(Value::String(s)) => !s.is_empty(),
		Some(Value::Array(items)) => !items.is_empty(),
		Some(Value::Object(map)) => !map.is_empty(),
	}
}
