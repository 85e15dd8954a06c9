//! Soft line wrapping for fixed-width rendering.
//!
//! Wrapping is a pure function of the document and a column width `W`.
//! Each display line holds at most `W - 1` cells, leaving the last column
//! free for a cursor parked after the final character. Wrap points are
//! decided by display width, so wide glyphs count as two cells.

use unicode_width::UnicodeWidthChar;

use crate::{ColorTag, Cursor, Document};

/// A width-bounded fragment of one logical line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayLine {
    pub text: String,
    pub style: ColorTag,
    /// Index of the logical line this fragment came from
    pub source_line: usize,
    /// Column in the logical line where this fragment starts
    pub start_column: usize,
}

impl DisplayLine {
    /// Display width in cells
    pub fn width(&self) -> usize {
        self.text.chars().map(char_width).sum()
    }

    /// Length in code points
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Display width of a code point; control characters take no cells
pub fn char_width(ch: char) -> usize {
    ch.width().unwrap_or(0)
}

/// Usable cells per display line for wrap width `width`
pub fn content_width(width: usize) -> usize {
    width.saturating_sub(1).max(1)
}

/// Calculate where the display line starting at `start` ends.
///
/// Accumulates code points until the next one would push the display
/// width past `max_width`. At least one code point is always taken, so a
/// glyph wider than the whole line still makes progress.
pub fn calculate_wrap_point(chars: &[char], start: usize, max_width: usize) -> usize {
    let mut display_width = 0;
    let mut end = start;

    for &ch in chars.iter().skip(start) {
        let ch_width = char_width(ch);
        if display_width + ch_width > max_width && end > start {
            break;
        }
        display_width += ch_width;
        end += 1;
    }

    end
}

/// Column indices where each display line of `text` starts.
///
/// Always begins with 0; an empty line yields exactly `[0]`.
pub fn calculate_wrap_points_for_line(text: &str, width: usize) -> Vec<usize> {
    let chars: Vec<char> = text.chars().collect();
    let max_width = content_width(width);

    let mut points = vec![0];
    let mut offset = calculate_wrap_point(&chars, 0, max_width);
    while offset < chars.len() {
        points.push(offset);
        offset = calculate_wrap_point(&chars, offset, max_width);
    }
    points
}

/// Wrap one logical line into display lines
pub fn wrap_line(text: &str, style: ColorTag, source_line: usize, width: usize) -> Vec<DisplayLine> {
    let chars: Vec<char> = text.chars().collect();
    let points = calculate_wrap_points_for_line(text, width);

    points
        .iter()
        .enumerate()
        .map(|(i, &start)| {
            let end = points.get(i + 1).copied().unwrap_or(chars.len());
            DisplayLine {
                text: chars[start..end].iter().collect(),
                style,
                source_line,
                start_column: start,
            }
        })
        .collect()
}

/// Derive the display lines of a whole document
pub fn wrap_document(doc: &Document, width: usize) -> Vec<DisplayLine> {
    doc.lines()
        .iter()
        .enumerate()
        .flat_map(|(index, line)| wrap_line(&line.text, line.style, index, width))
        .collect()
}

/// Locate the cursor in a wrapped layout.
///
/// Returns `(row, x)`: the display row index and the cell offset within
/// that row. A column that falls exactly on a wrap point belongs to the
/// following fragment; the end-of-line column stays on the last fragment.
pub fn cursor_display_position(display: &[DisplayLine], cursor: Cursor) -> (usize, usize) {
    let mut found: Option<usize> = None;
    for (row, line) in display.iter().enumerate() {
        if line.source_line == cursor.line && line.start_column <= cursor.column {
            found = Some(row);
        } else if line.source_line > cursor.line {
            break;
        }
    }

    let Some(row) = found else {
        return (display.len().saturating_sub(1), 0);
    };

    let line = &display[row];
    let x = line
        .text
        .chars()
        .take(cursor.column - line.start_column)
        .map(char_width)
        .sum();
    (row, x)
}
