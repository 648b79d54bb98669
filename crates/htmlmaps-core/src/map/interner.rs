//! Frame deduplication for compact maps

use super::frame::Frame;
use std::collections::HashMap;

/// Assigns dense ids to frames in first-seen order
///
/// Two frames share an id exactly when their `(file, line, column)` triples
/// are equal.
#[derive(Debug, Default)]
pub struct FrameInterner {
    ids: HashMap<Frame, usize>,
    frames: Vec<Frame>,
}

impl FrameInterner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Id of `frame`, registering it if unseen
    pub fn intern(&mut self, frame: &Frame) -> usize {
        if let Some(&id) = self.ids.get(frame) {
            return id;
        }
        let id = self.frames.len();
        self.frames.push(frame.clone());
        self.ids.insert(frame.clone(), id);
        id
    }

    /// Intern a whole call stack, preserving its order
    pub fn intern_stack<'a>(&mut self, stack: impl IntoIterator<Item = &'a Frame>) -> Vec<usize> {
        stack.into_iter().map(|frame| self.intern(frame)).collect()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// The frame table, indexed by id
    pub fn into_frames(self) -> Vec<Frame> {
        self.frames
    }
}
