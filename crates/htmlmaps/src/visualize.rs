//! Side-by-side terminal view of an html map
//!
//! Left panel: the rendered text with line numbers, each range prefixed by its
//! index and painted with a background color. Right panel: one row per range
//! with its output span and call stack.

use clap::ValueEnum;
use colored::{ColoredString, Colorize};
use htmlmaps_core::{HtmlMap, Range};
use thiserror::Error;

/// Background colors, in assignment order
const PALETTE: [(u8, u8, u8); 3] = [(255, 99, 71), (46, 139, 87), (30, 144, 255)];

/// How ranges are colored
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Alternate between two colors
    Alternate,
    /// One color per template file of the range's innermost frame
    Source,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum VisualizeError {
    #[error("need more colors: more than {available} source files in the map")]
    NeedMoreColors { available: usize },
}

/// Styled text plus its printed width
#[derive(Debug, Default, Clone)]
struct Cell {
    text: String,
    width: usize,
}

impl Cell {
    fn plain(text: impl Into<String>) -> Self {
        let text = text.into();
        let width = text.chars().count();
        Self { text, width }
    }

    fn styled(styled: ColoredString, width: usize) -> Self {
        Self {
            text: styled.to_string(),
            width,
        }
    }

    fn push(&mut self, other: Cell) {
        self.text.push_str(&other.text);
        self.width += other.width;
    }

    fn pad_to(&mut self, width: usize) {
        let padding = width.saturating_sub(self.width);
        self.text.push_str(&" ".repeat(padding));
        self.width += padding;
    }
}

/// Render both panels, joined line by line
pub fn visualize(text: &str, map: &HtmlMap, mode: ColorMode) -> Result<Vec<String>, VisualizeError> {
    let colors = range_colors(map, mode)?;
    let left = left_panel(text, map, &colors);
    let right = right_panel(map);

    let left_width = left.iter().map(|cell| cell.width).max().unwrap_or(0) + 1;
    let rows = left.len().max(right.len());

    Ok((0..rows)
        .map(|i| {
            let mut line = left.get(i).cloned().unwrap_or_default();
            if let Some(row) = right.get(i) {
                line.pad_to(left_width);
                line.push(row.clone());
            }
            line.text
        })
        .collect())
}

fn range_colors(map: &HtmlMap, mode: ColorMode) -> Result<Vec<(u8, u8, u8)>, VisualizeError> {
    match mode {
        ColorMode::Alternate => Ok((0..map.ranges.len()).map(|i| PALETTE[i % 2]).collect()),
        ColorMode::Source => {
            let mut files: Vec<&str> = Vec::new();
            map.ranges
                .iter()
                .map(|range| {
                    let file = innermost_file(map, range);
                    let index = match files.iter().position(|seen| *seen == file) {
                        Some(index) => index,
                        None => {
                            files.push(file);
                            files.len() - 1
                        }
                    };
                    PALETTE
                        .get(index)
                        .copied()
                        .ok_or(VisualizeError::NeedMoreColors {
                            available: PALETTE.len(),
                        })
                })
                .collect()
        }
    }
}

fn innermost_file<'a>(map: &'a HtmlMap, range: &'a Range) -> &'a str {
    map.call_stack(range)
        .next()
        .map(|frame| frame.file.as_ref())
        .unwrap_or("")
}

fn left_panel(text: &str, map: &HtmlMap, colors: &[(u8, u8, u8)]) -> Vec<Cell> {
    let mut lines = vec![Cell::default()];

    for (i, (slice, &(r, g, b))) in map.slices(text).into_iter().zip(colors).enumerate() {
        let label = i.to_string();
        let width = label.chars().count();
        if let Some(line) = lines.last_mut() {
            line.push(Cell::styled(label.white().bold().on_truecolor(r, g, b), width));
        }

        for (n, piece) in slice.split('\n').enumerate() {
            if n > 0 {
                lines.push(Cell::default());
            }
            if piece.is_empty() {
                continue;
            }
            if let Some(line) = lines.last_mut() {
                line.push(Cell::styled(
                    piece.black().on_truecolor(r, g, b),
                    piece.chars().count(),
                ));
            }
        }
    }

    let number_width = lines.len().to_string().len();
    lines
        .into_iter()
        .enumerate()
        .map(|(i, line)| {
            let number = format!("{:>width$}", i + 1, width = number_width);
            let mut cell = Cell::styled(number.white(), number_width);
            cell.push(Cell::styled("|".bright_black(), 1));
            cell.push(line);
            cell
        })
        .collect()
}

fn right_panel(map: &HtmlMap) -> Vec<Cell> {
    let rows: Vec<Vec<Cell>> = map
        .ranges
        .iter()
        .enumerate()
        .map(|(i, range)| {
            let index = i.to_string();
            let width = index.chars().count();
            let mut row = vec![
                Cell::styled(index.white().bold(), width),
                Cell::plain(format!(
                    "{}:{} -> {}:{}",
                    range.start_line + 1,
                    range.start_column,
                    range.end_line + 1,
                    range.end_column
                )),
            ];
            row.extend(map.call_stack(range).map(|frame| Cell::plain(frame.to_string())));
            row
        })
        .collect();

    let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
    let widths: Vec<usize> = (0..columns)
        .map(|column| {
            rows.iter()
                .filter_map(|row| row.get(column))
                .map(|cell| cell.width)
                .max()
                .unwrap_or(0)
        })
        .collect();

    rows.into_iter()
        .map(|row| {
            let last = row.len().saturating_sub(1);
            let mut line = Cell::default();
            for (column, mut cell) in row.into_iter().enumerate() {
                if column > 0 {
                    line.push(Cell::plain(" "));
                }
                if column < last {
                    cell.pad_to(widths[column]);
                }
                line.push(cell);
            }
            line
        })
        .collect()
}
