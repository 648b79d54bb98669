//! Template module - templating with inheritance and source maps
//!
//! Renders templates to text while recording, for every span of the output,
//! the chain of template positions that produced it.
//!
//! ## Syntax
//!
//! - Output a value: `{%= post.title %}` (dotted lookup, no expressions)
//! - Iterate: `{% for post in posts %} ... {% end %}`
//! - Overridable slot: `{% block content %} ... {% endblock %}`
//! - Inherit: `{% extends layout.tpl %}` (must be the first tag)
//! - Inline another template: `{% render partials/nav.tpl %}`
//!
//! Text between tags that is only whitespace is dropped, so tags can sit on
//! lines of their own.
//!
//! ## Pipeline
//!
//! name → [`TemplateCache`] (parse once) → render to a segment tree (block
//! overrides merged) → flatten to text plus [`HtmlMap`](crate::map::HtmlMap).

pub mod ast;
pub mod cache;
pub mod context;
pub mod engine;
pub mod error;
pub mod loader;

pub use ast::{Node, Template};
pub use cache::TemplateCache;
pub use context::{LookupError, TemplateContext};
pub use engine::{RenderOutput, TemplateEngine};
pub use error::TemplateError;
pub use loader::{FsLoader, MemoryLoader, TemplateLoader};
