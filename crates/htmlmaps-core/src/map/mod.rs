//! Source maps for rendered output
//!
//! An [`HtmlMap`] splits the rendered text into consecutive [`Range`]s. Each
//! range carries the call stack of template frames that produced it, stored
//! as ids into a shared frame table so repeated frames are written once.
//!
//! JSON shape:
//!
//! ```text
//! {
//!   "ranges": [{"callStack": [0, 1], "startLine": 0, "startColumn": 0,
//!               "endLine": 0, "endColumn": 5, "length": 5}],
//!   "frames": [{"file": "post.tpl", "line": 0, "column": 0}, ...],
//!   "html": "...", "url": "/posts", "mapUrl": "html-map.json"
//! }
//! ```

mod frame;
mod interner;
mod position;

pub use frame::Frame;
pub use interner::FrameInterner;
pub use position::Position;

use crate::error::{HtmlMapsError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A contiguous span of output text and its provenance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Range {
    /// Frame ids, innermost first
    pub call_stack: Vec<usize>,
    pub start_line: usize,
    pub start_column: usize,
    pub end_line: usize,
    pub end_column: usize,
    /// Length in characters
    pub length: usize,
}

impl Range {
    pub fn start(&self) -> Position {
        Position::new(self.start_line, self.start_column)
    }

    pub fn end(&self) -> Position {
        Position::new(self.end_line, self.end_column)
    }
}

/// Ranges plus the frame table they index into
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HtmlMap {
    pub ranges: Vec<Range>,
    pub frames: Vec<Frame>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub map_url: Option<String>,
}

impl HtmlMap {
    /// Resolve a range's call stack to frames
    ///
    /// Ids missing from the frame table are skipped.
    pub fn call_stack<'a>(&'a self, range: &'a Range) -> impl Iterator<Item = &'a Frame> + 'a {
        range
            .call_stack
            .iter()
            .filter_map(move |&id| self.frames.get(id))
    }

    /// Split `text` into the slices covered by each range, in order
    ///
    /// Ranges running past the end of `text` are clamped to it.
    pub fn slices<'t>(&self, text: &'t str) -> Vec<&'t str> {
        let mut slices = Vec::with_capacity(self.ranges.len());
        let mut rest = text;
        for range in &self.ranges {
            let end = rest
                .char_indices()
                .nth(range.length)
                .map(|(i, _)| i)
                .unwrap_or(rest.len());
            slices.push(&rest[..end]);
            rest = &rest[end..];
        }
        slices
    }

    /// Total characters covered by all ranges
    pub fn covered_length(&self) -> usize {
        self.ranges.iter().map(|range| range.length).sum()
    }

    /// Check that the ranges tile `text` exactly, in ascending order
    pub fn tiles(&self, text: &str) -> bool {
        let mut cursor = Position::default();
        let slices = self.slices(text);
        if self.covered_length() != text.chars().count() {
            return false;
        }
        self.ranges.iter().zip(slices).all(|(range, slice)| {
            let starts_at_cursor = range.start() == cursor;
            cursor.advance(slice);
            starts_at_cursor && range.end() == cursor && range.length == slice.chars().count()
        })
    }

    /// Write the map as pretty-printed JSON, creating parent directories
    pub async fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                HtmlMapsError::MapWriteError(format!("{}: {}", parent.display(), e))
            })?;
        }

        tokio::fs::write(path, json)
            .await
            .map_err(|e| HtmlMapsError::MapWriteError(format!("{}: {}", path.display(), e)))?;

        tracing::info!(path = %path.display(), ranges = self.ranges.len(), "wrote html map");
        Ok(())
    }

    /// Read a map previously written by [`HtmlMap::save`]
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| HtmlMapsError::MapReadError(format!("{}: {}", path.display(), e)))?;
        serde_json::from_str(&content)
            .map_err(|e| HtmlMapsError::MapReadError(format!("{}: {}", path.display(), e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn range(call_stack: Vec<usize>, start: (usize, usize), end: (usize, usize), length: usize) -> Range {
        Range {
            call_stack,
            start_line: start.0,
            start_column: start.1,
            end_line: end.0,
            end_column: end.1,
            length,
        }
    }

    fn sample() -> HtmlMap {
        HtmlMap {
            ranges: vec![
                range(vec![0], (0, 0), (1, 1), 5),
                range(vec![1, 0], (1, 1), (1, 4), 3),
            ],
            frames: vec![Frame::new("a.tpl", 0, 0), Frame::new("b.tpl", 2, 4)],
            ..Default::default()
        }
    }

    #[test]
    fn test_json_shape_uses_camel_case() {
        let map = HtmlMap {
            url: Some("/posts".to_string()),
            ..sample()
        };
        let json = serde_json::to_value(&map).unwrap();

        assert_eq!(json["ranges"][1]["callStack"], serde_json::json!([1, 0]));
        assert_eq!(json["ranges"][0]["startColumn"], 0);
        assert_eq!(json["ranges"][0]["endLine"], 1);
        assert_eq!(json["frames"][1]["file"], "b.tpl");
        assert_eq!(json["url"], "/posts");
        assert!(json.get("html").is_none());
        assert!(json.get("mapUrl").is_none());
    }

    #[test]
    fn test_slices_and_tiling() {
        let map = sample();
        let text = "abcd\nefg";
        assert_eq!(map.slices(text), vec!["abcd\n", "efg"]);
        assert_eq!(map.covered_length(), 8);
        assert!(map.tiles(text));
        assert!(!map.tiles("abcd\nefgh"));
    }

    #[test]
    fn test_call_stack_resolves_frames() {
        let map = sample();
        let frames: Vec<String> = map.call_stack(&map.ranges[1]).map(|f| f.to_string()).collect();
        assert_eq!(frames, vec!["b.tpl:3:4", "a.tpl:1:0"]);
    }

    #[tokio::test]
    async fn test_save_and_load() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("maps/out.json");
        let map = HtmlMap {
            html: Some("abcd\nefg".to_string()),
            ..sample()
        };

        map.save(&path).await.unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("\n  \"ranges\""));

        let loaded = HtmlMap::load(&path).await.unwrap();
        assert_eq!(loaded, map);
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let temp = TempDir::new().unwrap();
        let result = HtmlMap::load(temp.path().join("nope.json")).await;
        assert!(matches!(result, Err(HtmlMapsError::MapReadError(_))));
    }
}
