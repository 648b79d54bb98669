//! Line/column cursor shared by the lexer and the emitter

use serde::{Deserialize, Serialize};

/// A 0-based line/column position, columns counted in characters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// Advance over `text`
    ///
    /// With line breaks: `line` moves by their count and `column` becomes the
    /// number of characters after the last break. Without: `column` grows by
    /// the character count.
    pub fn advance(&mut self, text: &str) {
        match text.rfind('\n') {
            Some(last_break) => {
                self.line += count_newlines(text);
                self.column = text[last_break + 1..].chars().count();
            }
            None => self.column += text.chars().count(),
        }
    }

    /// Position reached after advancing over `text`
    pub fn after(mut self, text: &str) -> Self {
        self.advance(text);
        self
    }
}

/// Count newlines in text
fn count_newlines(text: &str) -> usize {
    text.bytes().filter(|&b| b == b'\n').count()
}
