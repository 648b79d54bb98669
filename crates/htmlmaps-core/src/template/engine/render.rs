//! Segment-tree construction
//!
//! Rendering cannot write text directly: a block's position is fixed where it
//! is first declared, but its content is only final once the whole inclusion
//! chain has been walked. Nodes are therefore rendered into a tree of
//! segments whose block slots stay mutable until the walk is over.

use crate::map::Frame;
use crate::template::ast::Node;
use crate::template::context::{dotted, stringify_value, type_name, TemplateContext};
use crate::template::error::TemplateError;
use serde_json::Value;
use std::collections::HashMap;
use std::slice;
use std::sync::Arc;

/// Index of a block slot in the renderer's slot table
pub(crate) type SlotId = usize;

/// Deferred output
#[derive(Debug)]
pub(crate) enum RenderSegment {
    /// Resolved text with its call stack, innermost frame first
    Raw { call_stack: Vec<Frame>, text: String },
    /// A named block slot, expanded when flattening
    Fragment(SlotId),
}

/// Live content of a named block
#[derive(Debug)]
pub(crate) struct Slot {
    /// Still holding the declaring template's default body
    pub contains_default: bool,
    pub segments: Vec<RenderSegment>,
}

/// Frames of the `extends`/`render` tags enclosing the current node
///
/// A persistent list: entering an inclusion creates an extended copy and
/// leaves the caller's list untouched.
#[derive(Debug, Clone, Default)]
pub(crate) struct IncludeStack(Option<Arc<IncludeLink>>);

#[derive(Debug)]
struct IncludeLink {
    frame: Frame,
    parent: IncludeStack,
}

impl IncludeStack {
    fn push(&self, frame: Frame) -> Self {
        Self(Some(Arc::new(IncludeLink {
            frame,
            parent: self.clone(),
        })))
    }

    /// `leaf` followed by the enclosing inclusions, innermost first
    fn call_stack(&self, leaf: &Frame) -> Vec<Frame> {
        let mut stack = vec![leaf.clone()];
        let mut link = self.0.as_deref();
        while let Some(current) = link {
            stack.push(current.frame.clone());
            link = current.parent.0.as_deref();
        }
        stack
    }
}

/// Per-render state: the slot table and the open-blocks index into it
pub(crate) struct Renderer {
    strict: bool,
    slots: Vec<Slot>,
    open_blocks: HashMap<String, SlotId>,
}

impl Renderer {
    /// `strict` turns undefined lookups into errors instead of empty output
    pub fn new(strict: bool) -> Self {
        Self {
            strict,
            slots: Vec::new(),
            open_blocks: HashMap::new(),
        }
    }

    /// Render nodes under `ctx`, outside of any inclusion
    pub fn render(
        &mut self,
        nodes: &[Node],
        ctx: &TemplateContext,
    ) -> Result<Vec<RenderSegment>, TemplateError> {
        let mut out = Vec::new();
        self.render_into(nodes, ctx, &IncludeStack::default(), &mut out)?;
        Ok(out)
    }

    pub fn into_slots(self) -> Vec<Slot> {
        self.slots
    }

    fn render_into(
        &mut self,
        nodes: &[Node],
        ctx: &TemplateContext,
        includes: &IncludeStack,
        out: &mut Vec<RenderSegment>,
    ) -> Result<(), TemplateError> {
        for node in nodes {
            self.render_node(node, ctx, includes, out)?;
        }
        Ok(())
    }

    fn render_node(
        &mut self,
        node: &Node,
        ctx: &TemplateContext,
        includes: &IncludeStack,
        out: &mut Vec<RenderSegment>,
    ) -> Result<(), TemplateError> {
        match node {
            Node::Fragment(children) => self.render_into(children, ctx, includes, out)?,

            Node::Literal { source, text } => out.push(RenderSegment::Raw {
                call_stack: includes.call_stack(source),
                text: text.clone(),
            }),

            Node::Placeholder { source, path } => {
                let text = match ctx.lookup(path) {
                    Ok(value) => stringify_value(value, path, source)?,
                    Err(missing) if self.strict => {
                        return Err(TemplateError::UndefinedValue {
                            path: dotted(path),
                            segment: missing.segment,
                            at: source.clone(),
                        });
                    }
                    Err(_) => String::new(),
                };
                out.push(RenderSegment::Raw {
                    call_stack: includes.call_stack(source),
                    text,
                });
            }

            Node::Include { source, target } => {
                let inner = includes.push(source.clone());
                self.render_into(slice::from_ref(&target.root), ctx, &inner, out)?;
            }

            Node::Loop {
                source,
                binding,
                iterable,
                body,
            } => {
                let items: &[Value] = match ctx.lookup(iterable) {
                    Ok(Value::Array(items)) => items.as_slice(),
                    Ok(other) => {
                        return Err(TemplateError::NotIterable {
                            path: dotted(iterable),
                            found: type_name(other),
                            at: source.clone(),
                        });
                    }
                    Err(missing) if self.strict => {
                        return Err(TemplateError::UndefinedValue {
                            path: dotted(iterable),
                            segment: missing.segment,
                            at: source.clone(),
                        });
                    }
                    Err(_) => &[],
                };

                for item in items {
                    let scoped = ctx.with_binding(binding.clone(), item.clone());
                    self.render_into(body, &scoped, includes, out)?;
                }
            }

            Node::Block { name, body, .. } => {
                let mut segments = Vec::new();
                self.render_into(body, ctx, includes, &mut segments)?;

                match self.open_blocks.get(name) {
                    Some(&id) => {
                        let slot = &mut self.slots[id];
                        if slot.contains_default {
                            slot.contains_default = false;
                            slot.segments.clear();
                        }
                        slot.segments.extend(segments);
                    }
                    None => {
                        let id = self.slots.len();
                        self.slots.push(Slot {
                            contains_default: true,
                            segments,
                        });
                        self.open_blocks.insert(name.clone(), id);
                        out.push(RenderSegment::Fragment(id));
                    }
                }
            }
        }
        Ok(())
    }
}
