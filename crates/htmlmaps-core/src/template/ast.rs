//! Parsed template tree
//!
//! Nodes are built once per template file and shared by every render of it.

use crate::map::Frame;
use std::sync::Arc;

/// A parsed template
#[derive(Debug)]
pub struct Template {
    /// Name the template was loaded by
    pub name: String,
    /// Implicit root; always a [`Node::Fragment`]
    pub root: Node,
}

impl Template {
    pub fn new(name: impl Into<String>, nodes: Vec<Node>) -> Self {
        Self {
            name: name.into(),
            root: Node::Fragment(nodes),
        }
    }

    /// Top-level nodes
    pub fn nodes(&self) -> &[Node] {
        match &self.root {
            Node::Fragment(children) => children,
            other => std::slice::from_ref(other),
        }
    }
}

#[derive(Debug)]
pub enum Node {
    /// A sequence with no position of its own
    Fragment(Vec<Node>),

    /// Raw text, emitted verbatim
    Literal { source: Frame, text: String },

    /// `{%= path.to.value %}`
    Placeholder { source: Frame, path: Vec<String> },

    /// `{% for binding in iterable %} ... {% end %}`
    Loop {
        source: Frame,
        binding: String,
        iterable: Vec<String>,
        body: Vec<Node>,
    },

    /// `{% block name %} ... {% endblock %}`
    Block {
        source: Frame,
        name: String,
        body: Vec<Node>,
    },

    /// `{% extends name %}` or `{% render name %}`, with the target inlined
    Include {
        source: Frame,
        target: Arc<Template>,
    },
}

impl Node {
    /// Where the node starts in its template; `None` for fragments
    pub fn source(&self) -> Option<&Frame> {
        match self {
            Node::Fragment(_) => None,
            Node::Literal { source, .. }
            | Node::Placeholder { source, .. }
            | Node::Loop { source, .. }
            | Node::Block { source, .. }
            | Node::Include { source, .. } => Some(source),
        }
    }
}

/// Split a dotted path: `post.author.name` → `["post", "author", "name"]`
pub(crate) fn parse_path(text: &str) -> Vec<String> {
    text.split('.').map(|part| part.trim().to_string()).collect()
}
