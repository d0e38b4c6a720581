//! `schemadoc_core` turns a JSON Schema document into structured markdown
//! reference documentation.
//!
//! ## Rendering Pipeline
//!
//! ```text
//! schema.json / schema.yaml
//!   → Source loader (JSON or YAML into a serde_json::Value, key order kept)
//!   → Document assembler (fixed section order)
//!   → Tree walker (recursive descent over every subschema)
//!   → Clause builder + example renderer (per node)
//!   → MarkdownLines (ordered fragments, concatenated by the caller)
//! ```
//!
//! ## Modules
//!
//! - [`config`]: [`RenderOptions`], the `schemadoc.toml` file format, and
//!   ignore pattern compilation.
//! - [`source`]: Loading schema documents from JSON or YAML files.
//!
//! ## Key Types
//!
//! - [`SchemaRenderer`]: Validated options plus the rendering entry point.
//! - [`RenderedDocument`]: Markdown fragments and any skipped definitions.
//! - [`SchemaNode`]: A subschema position holding either a mapping or a list.
//! - [`SchemaPath`]: The location of a node, matched by ignore patterns.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use schemadoc_core::RenderOptions;
//! use schemadoc_core::SchemaRenderer;
//! use schemadoc_core::source::load_schema;
//! use std::path::Path;
//!
//! let schema = load_schema(Path::new("schema.json")).unwrap();
//! let renderer = SchemaRenderer::new(RenderOptions::default()).unwrap();
//! let document = renderer.render(&schema).unwrap();
//!
//! for warning in &document.warnings {
//! 	eprintln!("skipped {} from {}", warning.name, warning.section);
//! }
//! std::fs::write("schema.md", document.to_markdown()).unwrap();
//! ```

pub use clauses::describe;
pub use config::*;
pub use document::*;
pub use error::*;
pub use example::render_examples;
pub use node::*;
pub use output::*;

mod clauses;
pub mod config;
mod document;
#[allow(unused_assignments)]
mod error;
mod example;
mod node;
mod output;
pub mod source;
mod walker;
