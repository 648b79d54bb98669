//! Segment tree → text and source map

use super::render::{RenderSegment, Slot};
use crate::map::{Frame, FrameInterner, HtmlMap, Position, Range};

/// Depth-first flatten of a segment tree
///
/// Returns the concatenated text and a map with one range per `Raw` segment,
/// in output order.
pub(crate) fn flatten(segments: &[RenderSegment], slots: &[Slot]) -> (String, HtmlMap) {
    let mut emitter = Emitter {
        slots,
        text: String::new(),
        cursor: Position::default(),
        ranges: Vec::new(),
        interner: FrameInterner::new(),
    };
    emitter.walk(segments);

    let map = HtmlMap {
        ranges: emitter.ranges,
        frames: emitter.interner.into_frames(),
        ..Default::default()
    };
    (emitter.text, map)
}

struct Emitter<'s> {
    slots: &'s [Slot],
    text: String,
    cursor: Position,
    ranges: Vec<Range>,
    interner: FrameInterner,
}

impl Emitter<'_> {
    fn walk(&mut self, segments: &[RenderSegment]) {
        for segment in segments {
            match segment {
                RenderSegment::Raw { call_stack, text } => self.emit(call_stack, text),
                RenderSegment::Fragment(id) => {
                    let slots = self.slots;
                    self.walk(&slots[*id].segments);
                }
            }
        }
    }

    fn emit(&mut self, call_stack: &[Frame], text: &str) {
        let start = self.cursor;
        self.cursor.advance(text);
        self.text.push_str(text);

        self.ranges.push(Range {
            call_stack: self.interner.intern_stack(call_stack),
            start_line: start.line,
            start_column: start.column,
            end_line: self.cursor.line,
            end_column: self.cursor.column,
            length: text.chars().count(),
        });
    }
}
