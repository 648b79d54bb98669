//! Template parser: tokens → node tree
//!
//! Loops and blocks are tracked on two independent stacks, so `for` and
//! `block` scopes may interleave: `end` always returns to the node list that
//! was current when the innermost open `for` began, whatever blocks were
//! opened since, and likewise for `endblock`. Node lists therefore live in an
//! arena while parsing and are assembled into a tree at the end.

use super::tokenize::{TokenKind, TokenStream};
use crate::map::Frame;
use crate::template::ast::{parse_path, Node, Template};
use crate::template::cache::TemplateCache;
use crate::template::error::TemplateError;
use crate::template::loader::TemplateLoader;
use std::sync::Arc;

/// Parse `source` (the text of template `name`) into its top-level nodes
///
/// `extends`/`render` targets are loaded through `cache` as inclusions of
/// `chain`, which must already end with `name`.
pub(crate) async fn parse<L: TemplateLoader>(
    cache: &TemplateCache<L>,
    name: &str,
    source: &str,
    chain: &[String],
) -> Result<Vec<Node>, TemplateError> {
    let file: Arc<str> = Arc::from(name);
    let mut tree = TreeBuilder::new();
    let mut seen_tag = false;

    for token in TokenStream::new(Arc::clone(&file), source) {
        let token = token?;
        let at = Frame::at(&file, token.position);

        match token.kind {
            TokenKind::Text(text) => {
                // Whitespace-only runs vanish; the cursor has still moved past them
                if !text.trim().is_empty() {
                    tree.push(Draft::Literal {
                        source: at,
                        text: text.to_string(),
                    });
                }
            }
            TokenKind::Output(path) => {
                tree.push(Draft::Placeholder {
                    source: at,
                    path: parse_path(path),
                });
            }
            TokenKind::Directive(body) => {
                match Directive::parse(body, &at)? {
                    Directive::For { binding, iterable } => {
                        tree.open_loop(at, binding.to_string(), parse_path(iterable))
                    }
                    Directive::Block { name } => tree.open_block(at, name.to_string()),
                    Directive::Extends { target } => {
                        if seen_tag {
                            return Err(TemplateError::MisplacedExtends { at });
                        }
                        let target = cache.load_within(target.to_string(), chain.to_vec()).await?;
                        tree.push(Draft::Include { source: at, target });
                    }
                    Directive::Render { target } => {
                        let target = cache.load_within(target.to_string(), chain.to_vec()).await?;
                        tree.push(Draft::Include { source: at, target });
                    }
                    Directive::End => tree.close_loop(at)?,
                    Directive::EndBlock => tree.close_block(at)?,
                    Directive::Unknown => {
                        tracing::warn!(directive = body, at = %at, "ignoring unrecognized directive");
                    }
                }
            }
        }

        if !matches!(token.kind, TokenKind::Text(_)) {
            seen_tag = true;
        }
    }

    let nodes = tree.finish()?;
    tracing::debug!(template = name, nodes = nodes.len(), "parsed template");
    Ok(nodes)
}

/// A `{% ... %}` directive body, classified
#[derive(Debug, PartialEq, Eq)]
enum Directive<'a> {
    For { binding: &'a str, iterable: &'a str },
    Block { name: &'a str },
    Extends { target: &'a str },
    Render { target: &'a str },
    End,
    EndBlock,
    Unknown,
}

impl<'a> Directive<'a> {
    fn parse(body: &'a str, at: &Frame) -> Result<Self, TemplateError> {
        let malformed = || TemplateError::MalformedDirective {
            directive: body.to_string(),
            at: at.clone(),
        };
        let argument = |rest: &'a str| {
            let rest = rest.trim();
            if rest.is_empty() {
                Err(malformed())
            } else {
                Ok(rest)
            }
        };

        let (keyword, rest) = body
            .split_once(char::is_whitespace)
            .unwrap_or((body, ""));

        let rest = rest.trim();
        match keyword {
            "for" => {
                let (binding, iterable) = rest.split_once(" in ").ok_or_else(malformed)?;
                Ok(Directive::For {
                    binding: argument(binding)?,
                    iterable: argument(iterable)?,
                })
            }
            // Bare `block`, `extends` and `render` fall through to Unknown
            "block" if !rest.is_empty() => Ok(Directive::Block { name: rest }),
            "extends" if !rest.is_empty() => Ok(Directive::Extends { target: rest }),
            "render" if !rest.is_empty() => Ok(Directive::Render { target: rest }),
            "end" if rest.is_empty() => Ok(Directive::End),
            "endblock" if rest.is_empty() => Ok(Directive::EndBlock),
            _ => Ok(Directive::Unknown),
        }
    }
}

/// Index of a node list in the builder's arena
type ListId = usize;

/// Node under construction; container bodies are arena references
#[derive(Debug)]
enum Draft {
    Literal {
        source: Frame,
        text: String,
    },
    Placeholder {
        source: Frame,
        path: Vec<String>,
    },
    Loop {
        source: Frame,
        binding: String,
        iterable: Vec<String>,
        body: ListId,
    },
    Block {
        source: Frame,
        name: String,
        body: ListId,
    },
    Include {
        source: Frame,
        target: Arc<Template>,
    },
}

/// An open `for` or `block`: the list to return to, and where it began
struct OpenScope {
    parent: ListId,
    opened_at: Frame,
}

struct TreeBuilder {
    lists: Vec<Vec<Draft>>,
    current: ListId,
    loops: Vec<OpenScope>,
    blocks: Vec<OpenScope>,
}

impl TreeBuilder {
    fn new() -> Self {
        Self {
            lists: vec![Vec::new()],
            current: 0,
            loops: Vec::new(),
            blocks: Vec::new(),
        }
    }

    fn push(&mut self, draft: Draft) {
        self.lists[self.current].push(draft);
    }

    /// Start a fresh body list, returning its id
    fn new_list(&mut self) -> ListId {
        self.lists.push(Vec::new());
        self.lists.len() - 1
    }

    fn open_loop(&mut self, source: Frame, binding: String, iterable: Vec<String>) {
        let body = self.new_list();
        self.loops.push(OpenScope {
            parent: self.current,
            opened_at: source.clone(),
        });
        self.push(Draft::Loop {
            source,
            binding,
            iterable,
            body,
        });
        self.current = body;
    }

    fn open_block(&mut self, source: Frame, name: String) {
        let body = self.new_list();
        self.blocks.push(OpenScope {
            parent: self.current,
            opened_at: source.clone(),
        });
        self.push(Draft::Block { source, name, body });
        self.current = body;
    }

    fn close_loop(&mut self, at: Frame) -> Result<(), TemplateError> {
        let scope = self.loops.pop().ok_or(TemplateError::UnbalancedEnd {
            directive: "end".to_string(),
            at,
        })?;
        self.current = scope.parent;
        Ok(())
    }

    fn close_block(&mut self, at: Frame) -> Result<(), TemplateError> {
        let scope = self.blocks.pop().ok_or(TemplateError::UnbalancedEnd {
            directive: "endblock".to_string(),
            at,
        })?;
        self.current = scope.parent;
        Ok(())
    }

    /// Assemble the tree rooted at the top-level list
    fn finish(mut self) -> Result<Vec<Node>, TemplateError> {
        if let Some(scope) = self.loops.pop() {
            return Err(TemplateError::UnclosedDirective {
                directive: "for".to_string(),
                at: scope.opened_at,
            });
        }
        if let Some(scope) = self.blocks.pop() {
            return Err(TemplateError::UnclosedDirective {
                directive: "block".to_string(),
                at: scope.opened_at,
            });
        }
        Ok(Self::build(&mut self.lists, 0))
    }

    /// Every list except the root is the body of exactly one container, and
    /// bodies always have larger ids than the list holding their container.
    fn build(lists: &mut [Vec<Draft>], id: ListId) -> Vec<Node> {
        std::mem::take(&mut lists[id])
            .into_iter()
            .map(|draft| match draft {
                Draft::Literal { source, text } => Node::Literal { source, text },
                Draft::Placeholder { source, path } => Node::Placeholder { source, path },
                Draft::Loop {
                    source,
                    binding,
                    iterable,
                    body,
                } => Node::Loop {
                    source,
                    binding,
                    iterable,
                    body: Self::build(lists, body),
                },
                Draft::Block { source, name, body } => Node::Block {
                    source,
                    name,
                    body: Self::build(lists, body),
                },
                Draft::Include { source, target } => Node::Include { source, target },
            })
            .collect()
    }
}
