use super::position::Position;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// A point in a source template: `(file, line, column)`
///
/// Lines and columns are 0-based; `Display` shows the line 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Frame {
    pub file: Arc<str>,
    pub line: usize,
    pub column: usize,
}

impl Frame {
    pub fn new(file: impl Into<Arc<str>>, line: usize, column: usize) -> Self {
        Self {
            file: file.into(),
            line,
            column,
        }
    }

    pub(crate) fn at(file: &Arc<str>, position: Position) -> Self {
        Self {
            file: Arc::clone(file),
            line: position.line,
            column: position.column,
        }
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line + 1, self.column)
    }
}
