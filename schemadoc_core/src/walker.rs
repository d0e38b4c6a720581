use serde_json::Map;
use serde_json::Value;

use crate::MarkdownLines;
use crate::SchemaDocError;
use crate::SchemaDocResult;
use crate::SchemaNode;
use crate::SchemaPath;
use crate::SchemaRenderer;
use crate::clauses::describe;
use crate::clauses::display_scalar;
use crate::clauses::type_label;
use crate::clauses::url_escape;
use crate::example::TAB_SIZE;
use crate::example::render_examples;
use crate::node::is_truthy;

const COMPOSITION_KEYWORDS: [(&str, &str); 3] =
	[("allOf", "All of"), ("anyOf", "Any of"), ("oneOf", "One of")];

const EXTRA_PROPERTY_KEYWORDS: [(&str, &str); 2] = [
	("additionalProperties", "Additional properties"),
	("unevaluatedProperties", "Unevaluated properties"),
];

const PROPERTY_KEYWORDS: [&str; 2] = ["properties", "patternProperties"];

/// Keywords whose object form nests further named schemas.
const CHILD_KEYWORDS: [&str; 4] = [
	"additionalProperties",
	"unevaluatedProperties",
	"properties",
	"patternProperties",
];

/// How a node is reached during the walk.
#[derive(Debug, Clone)]
pub(crate) struct Visit<'n> {
	pub name: Option<&'n str>,
	pub path: SchemaPath,
	pub depth: usize,
	/// Render the name in `code` formatting.
	pub name_monospace: bool,
	pub required: bool,
	/// Sibling properties whose presence makes this one required.
	pub dependent_required: Vec<String>,
}

impl<'n> Visit<'n> {
	/// A property-like node whose name is shown as code.
	pub fn named(name: &'n str, path: SchemaPath, depth: usize) -> Self {
		Self {
			name: Some(name),
			path,
			depth,
			name_monospace: true,
			required: false,
			dependent_required: Vec::new(),
		}
	}

	/// A node with a descriptive label such as "Items".
	pub fn labelled(label: &'n str, path: SchemaPath, depth: usize) -> Self {
		Self {
			name_monospace: false,
			..Self::named(label, path, depth)
		}
	}

	/// A list element or composition branch.
	pub fn anonymous(path: SchemaPath, depth: usize) -> Self {
		Self {
			name: None,
			path,
			depth,
			name_monospace: false,
			required: false,
			dependent_required: Vec::new(),
		}
	}

	#[must_use]
	pub fn with_required(mut self, required: bool, dependent_required: Vec<String>) -> Self {
		self.required = required;
		self.dependent_required = dependent_required;
		self
	}
}

fn indent(depth: usize) -> String {
	" ".repeat(TAB_SIZE * depth)
}

impl SchemaRenderer {
	/// Render `value` and everything beneath it into `out`.
	pub(crate) fn walk(
		&self,
		value: &Value,
		visit: Visit<'_>,
		out: &mut MarkdownLines,
	) -> SchemaDocResult<()> {
		let indentation = indent(visit.depth);
		let item_indentation = indent(visit.depth + 1);

		let node = match SchemaNode::classify(visit.name, value)? {
			SchemaNode::Object(node) => node,
			SchemaNode::List(elements) => {
				match visit.name {
					Some(name) => out.push(format!("{indentation}- **{name}**:\n")),
					None => out.push(format!("{indentation}-\n")),
				}

				for (index, element) in elements.iter().enumerate() {
					let path = visit.path.child(index.to_string());
					self.walk(element, Visit::anonymous(path, visit.depth + 2), out)?;
				}

				return Ok(());
			}
		};

		if is_truthy(node.get("deprecated")) && !self.options.show_deprecated {
			return Ok(());
		}

		let description = describe(node, false)?
			.iter()
			.map(|clause| clause.replace("\n\n", &format!("<br>{item_indentation}")))
			.collect::<Vec<_>>()
			.join(" ");
		let description = description.trim();

		let ignored = self.ignore.is_ignored(&visit.path);
		let has_children = CHILD_KEYWORDS
			.iter()
			.any(|keyword| matches!(node.get(*keyword), Some(Value::Object(_))));
		let collapsed = !ignored && has_children && self.options.collapse_children;

		if !ignored {
			let anchor = if visit.depth == 0 {
				let id = visit.path.last().map(String::as_str).unwrap_or_default();
				format!("<a id=\"{}\"></a>", url_escape(id))
			} else {
				String::new()
			};
			let header = format!("{anchor}{}", header_text(node, &visit));
			let prefix = if visit.depth == 0 {
				format!("\n{}", "#".repeat(self.options.header_level + 3))
			} else {
				format!("{indentation}-")
			};

			if collapsed {
				out.extend([
					format!("{prefix} <details>"),
					"<summary>".to_string(),
					summary_html(&header)?,
					"</summary>\n\n".to_string(),
				]);
			} else {
				out.push(format!("{prefix} {header}"));
			}

			if visit.depth == 0 {
				out.extend([
					"\n".to_string(),
					description.trim_matches(':').trim_start().to_string(),
					"\n\n".to_string(),
				]);
			} else if header.is_empty() {
				// An untyped anonymous branch renders as `- Length must be ...`
				// rather than `- : Length must be ...`.
				let description = description.trim_start_matches(':').trim_start();
				out.append_to_last(&format!("{description}\n"));
			} else {
				out.append_to_last(&format!("{description}\n"));
			}
		}

		for (keyword, label) in COMPOSITION_KEYWORDS {
			let Some(branches) = node.get(keyword) else {
				continue;
			};
			let Value::Array(branches) = branches else {
				return Err(SchemaDocError::InvalidComposition {
					keyword: keyword.to_string(),
					value: branches.to_string(),
				});
			};

			let composition_path = visit.path.child(keyword);
			if !self.ignore.is_ignored(&composition_path) {
				out.push(format!("{item_indentation}- **{label}**\n"));
			}

			for (index, branch) in branches.iter().enumerate() {
				let path = composition_path.child(index.to_string());
				self.walk(branch, Visit::anonymous(path, visit.depth + 2), out)?;
			}
		}

		for (keyword, label) in EXTRA_PROPERTY_KEYWORDS {
			if let Some(schema @ Value::Object(_)) = node.get(keyword) {
				let path = visit.path.child(keyword);
				self.walk(schema, Visit::labelled(label, path, visit.depth + 1), out)?;
			}
		}

		for keyword in PROPERTY_KEYWORDS {
			let Some(children) = node.get(keyword) else {
				continue;
			};
			let Value::Object(children) = children else {
				return Err(SchemaDocError::InvalidMapping {
					keyword: keyword.to_string(),
					value: children.to_string(),
				});
			};

			for (child_name, child) in children {
				let child_visit = Visit::named(
					child_name,
					visit.path.keyed(keyword, child_name.as_str()),
					visit.depth + 1,
				)
				.with_required(
					is_required(node, child_name),
					dependent_requirers(node, child_name),
				);
				self.walk(child, child_visit, out)?;
			}
		}

		if collapsed {
			out.push(format!("\n{item_indentation}</details>\n\n"));
		}

		if self.options.show_examples.includes_properties() {
			out.extend(render_examples(
				node,
				self.options.examples_format,
				visit.depth,
				true,
			)?);
		}

		Ok(())
	}
}

/// The name and parenthesised qualifiers shown on a node's line.
fn header_text(node: &Map<String, Value>, visit: &Visit<'_>) -> String {
	let kind = match (node.get("type"), node.get("format")) {
		(Some(kind), Some(format)) => {
			Some(format!("{}, format: {}", type_label(kind), display_scalar(format)))
		}
		(Some(kind), None) => Some(type_label(kind)),
		(None, Some(format)) => Some(format!("format: {}", display_scalar(format))),
		(None, None) => None,
	};

	let Some(name) = visit.name else {
		return kind.map(|kind| format!("*{kind}*")).unwrap_or_default();
	};

	let mut qualifiers: Vec<String> = kind.into_iter().collect();
	if visit.required {
		qualifiers.push("required".to_string());
	} else if let Some(hint) = conditional_required_hint(&visit.dependent_required) {
		qualifiers.push(hint);
	}
	for (keyword, label) in [
		("deprecated", "deprecated"),
		("readOnly", "read-only"),
		("writeOnly", "write-only"),
	] {
		if is_truthy(node.get(keyword)) {
			qualifiers.push(label.to_string());
		}
	}

	let name = if visit.name_monospace {
		format!("**`{name}`**")
	} else {
		format!("**{name}**")
	};

	if qualifiers.is_empty() {
		name
	} else {
		format!("{name} *({})*", qualifiers.join(", "))
	}
}

/// `required if `a`, `b`, or `c` is set`, or `None` without dependents.
fn conditional_required_hint(dependents: &[String]) -> Option<String> {
	let (last, rest) = dependents.split_last()?;
	let condition = if rest.is_empty() {
		format!("`{last}`")
	} else {
		let rest = rest
			.iter()
			.map(|name| format!("`{name}`"))
			.collect::<Vec<_>>()
			.join(", ");
		format!("{rest}, or `{last}`")
	};

	Some(format!("required <sub><sup>if {condition} is set</sup></sub>"))
}

/// Render a summary line through markdown, keeping raw inline HTML and
/// dropping the surrounding paragraph.
fn summary_html(text: &str) -> SchemaDocResult<String> {
	let options = markdown::Options {
		compile: markdown::CompileOptions {
			allow_dangerous_html: true,
			..markdown::CompileOptions::default()
		},
		..markdown::Options::default()
	};
	let html = markdown::to_html_with_options(text, &options)
		.map_err(|e| SchemaDocError::Markdown(e.to_string()))?;
	let html = html.trim();

	Ok(html
		.strip_prefix("<p>")
		.and_then(|inner| inner.strip_suffix("</p>"))
		.unwrap_or(html)
		.to_string())
}

/// Whether `name` appears in the parent's `required` list.
pub(crate) fn is_required(parent: &Map<String, Value>, name: &str) -> bool {
	match parent.get("required") {
		Some(Value::Array(names)) => names.iter().any(|entry| entry.as_str() == Some(name)),
		_ => false,
	}
}

/// Keys of the parent's `dependentRequired` whose lists contain `name`.
pub(crate) fn dependent_requirers(parent: &Map<String, Value>, name: &str) -> Vec<String> {
	let Some(Value::Object(dependencies)) = parent.get("dependentRequired") else {
		return Vec::new();
	};

	dependencies
		.iter()
		.filter(|(_, required)| {
			required
				.as_array()
				.is_some_and(|names| names.iter().any(|entry| entry.as_str() == Some(name)))
		})
		.map(|(key, _)| key.clone())
		.collect()
}
