use std::cmp::{max, min};

use crate::Document;

/// Cursor position in document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    /// Line number (0-based)
    pub line: usize,
    /// Position in line in code points (0-based, may equal line length)
    pub column: usize,
}

impl Cursor {
    /// Create a new cursor at position (0, 0)
    pub fn new() -> Self {
        Self { line: 0, column: 0 }
    }

    /// Create cursor at specified position
    pub fn at(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// Move cursor up, clamping the column to the target line
    pub fn move_up(&mut self, doc: &Document) {
        if self.line > 0 {
            self.line -= 1;
            self.clamp_column(doc.line_len(self.line));
        }
    }

    /// Move cursor down, clamping the column to the target line
    pub fn move_down(&mut self, doc: &Document) {
        if self.line < doc.last_line() {
            self.line += 1;
            self.clamp_column(doc.line_len(self.line));
        }
    }

    /// Move cursor left; at column 0 wraps to the end of the previous line
    pub fn move_left(&mut self, doc: &Document) {
        if self.column > 0 {
            self.column -= 1;
        } else if self.line > 0 {
            self.line -= 1;
            self.column = doc.line_len(self.line);
        }
    }

    /// Move cursor right; at end of line wraps to column 0 of the next line
    pub fn move_right(&mut self, doc: &Document) {
        if self.column < doc.line_len(self.line) {
            self.column += 1;
        } else if self.line < doc.last_line() {
            self.line += 1;
            self.column = 0;
        }
    }

    /// Step by logical columns (`dx`) and lines (`dy`), clamped to the
    /// document on both axes
    pub fn step(&mut self, doc: &Document, dx: isize, dy: isize) {
        *self = doc.clamp(*self);
        for _ in 0..dy.unsigned_abs() {
            if dy < 0 {
                self.move_up(doc);
            } else {
                self.move_down(doc);
            }
        }
        for _ in 0..dx.unsigned_abs() {
            if dx < 0 {
                self.move_left(doc);
            } else {
                self.move_right(doc);
            }
        }
    }

    /// Move to (0, 0)
    pub fn move_to_top(&mut self) {
        *self = Self::new();
    }

    /// Move to column 0 of the last line
    pub fn move_to_bottom(&mut self, doc: &Document) {
        *self = Self::at(doc.last_line(), 0);
    }

    /// Move to column 0
    pub fn move_to_line_start(&mut self) {
        self.column = 0;
    }

    /// Move past the last character of the line
    pub fn move_to_line_end(&mut self, doc: &Document) {
        self.column = doc.line_len(self.line);
    }

    /// Clamp column to maximum line length
    pub fn clamp_column(&mut self, max_column: usize) {
        self.column = min(self.column, max_column);
    }
}

impl PartialOrd for Cursor {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Cursor {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        match self.line.cmp(&other.line) {
            std::cmp::Ordering::Equal => self.column.cmp(&other.column),
            other => other,
        }
    }
}

/// Half-open range `[start, end)` with `start <= end`.
///
/// Construction is the only place endpoints get reordered; delete, yank
/// and highlight all consume this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextRange {
    pub start: Cursor,
    pub end: Cursor,
}

impl TextRange {
    /// Normalize two positions into a range
    pub fn new(a: Cursor, b: Cursor) -> Self {
        Self {
            start: min(a, b),
            end: max(a, b),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// True if the cell at (line, column) lies inside the range
    pub fn contains(&self, line: usize, column: usize) -> bool {
        let pos = Cursor::at(line, column);
        self.start <= pos && pos < self.end
    }
}

/// Visual mode selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    /// Fixed at mode entry
    pub anchor: Cursor,
    /// Moves with the cursor
    pub active: Cursor,
}

impl Selection {
    /// Create a new selection
    pub fn new(anchor: Cursor, active: Cursor) -> Self {
        Self { anchor, active }
    }

    /// Normalized range
    pub fn range(&self) -> TextRange {
        TextRange::new(self.anchor, self.active)
    }

    /// Selection is empty (anchor == active)
    pub fn is_empty(&self) -> bool {
        self.anchor == self.active
    }

    /// Highlight test used by the renderer
    pub fn is_selected(&self, line: usize, column: usize) -> bool {
        self.range().contains(line, column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn doc(lines: &[&str]) -> Document {
        Document::from_text(&lines.join("\n"))
    }

    #[test]
    fn test_cursor_ordering() {
        let c1 = Cursor::at(0, 5);
        let c2 = Cursor::at(1, 0);
        let c3 = Cursor::at(1, 5);

        assert!(c1 < c2);
        assert!(c2 < c3);
        assert!(c1 < c3);
    }

    #[test]
    fn test_move_left_wraps_to_previous_line() {
        let doc = doc(&["abc", "de"]);
        let mut cursor = Cursor::at(1, 0);
        cursor.move_left(&doc);
        assert_eq!(cursor, Cursor::at(0, 3));
    }

    #[test]
    fn test_move_right_wraps_to_next_line() {
        let doc = doc(&["abc", "de"]);
        let mut cursor = Cursor::at(0, 3);
        cursor.move_right(&doc);
        assert_eq!(cursor, Cursor::at(1, 0));
    }

    #[test]
    fn test_no_wrap_past_document_edges() {
        let doc = doc(&["abc", "de"]);
        let mut cursor = Cursor::new();
        cursor.move_left(&doc);
        assert_eq!(cursor, Cursor::new());

        let mut cursor = Cursor::at(1, 2);
        cursor.move_right(&doc);
        assert_eq!(cursor, Cursor::at(1, 2));
    }

    #[test]
    fn test_vertical_moves_clamp_column() {
        let doc = doc(&["long line", "ab", "long again"]);
        let mut cursor = Cursor::at(0, 7);
        cursor.move_down(&doc);
        assert_eq!(cursor, Cursor::at(1, 2));
        cursor.move_down(&doc);
        assert_eq!(cursor, Cursor::at(2, 2));
        cursor.move_down(&doc);
        assert_eq!(cursor, Cursor::at(2, 2));
    }

    #[test]
    fn test_step_stays_in_bounds() {
        let doc = doc(&["abc", "", "xyz"]);
        let mut cursor = Cursor::at(9, 9);
        cursor.step(&doc, 0, 0);
        assert_eq!(cursor, Cursor::at(2, 3));

        for (dx, dy) in [(-7, 0), (4, -1), (0, 5), (-1, -9), (20, 20)] {
            cursor.step(&doc, dx, dy);
            assert!(cursor.line < doc.line_count());
            assert!(cursor.column <= doc.line_len(cursor.line));
        }
    }

    #[test]
    fn test_top_and_bottom() {
        let doc = doc(&["a", "b", "c"]);
        let mut cursor = Cursor::at(1, 1);
        cursor.move_to_bottom(&doc);
        assert_eq!(cursor, Cursor::at(2, 0));
        cursor.move_to_top();
        assert_eq!(cursor, Cursor::new());
    }

    #[test]
    fn test_selection_range() {
        let sel = Selection::new(Cursor::at(1, 5), Cursor::at(3, 10));
        assert_eq!(sel.range().start, Cursor::at(1, 5));
        assert_eq!(sel.range().end, Cursor::at(3, 10));

        let sel_rev = Selection::new(Cursor::at(3, 10), Cursor::at(1, 5));
        assert_eq!(sel_rev.range(), sel.range());
    }

    #[test]
    fn test_zero_width_selection_selects_nothing() {
        let sel = Selection::new(Cursor::at(1, 2), Cursor::at(1, 2));
        assert!(sel.is_empty());
        for line in 0..3 {
            for column in 0..5 {
                assert!(!sel.is_selected(line, column));
            }
        }
    }

    fn position() -> impl Strategy<Value = Cursor> {
        (0usize..6, 0usize..8).prop_map(|(line, column)| Cursor::at(line, column))
    }

    proptest! {
        #[test]
        fn test_is_selected_symmetric(anchor in position(), active in position()) {
            let forward = Selection::new(anchor, active);
            let backward = Selection::new(active, anchor);
            for line in 0..7 {
                for column in 0..9 {
                    prop_assert_eq!(
                        forward.is_selected(line, column),
                        backward.is_selected(line, column)
                    );
                }
            }
        }

        #[test]
        fn test_moves_stay_in_bounds(
            lines in prop::collection::vec("[a-z中]{0,5}", 1..5),
            moves in prop::collection::vec(0u8..6, 0..40),
        ) {
            let doc = Document::from_text(&lines.join("\n"));
            let mut cursor = Cursor::new();
            for step in moves {
                match step {
                    0 => cursor.move_left(&doc),
                    1 => cursor.move_right(&doc),
                    2 => cursor.move_up(&doc),
                    3 => cursor.move_down(&doc),
                    4 => cursor.move_to_bottom(&doc),
                    _ => cursor.move_to_top(),
                }
                prop_assert!(cursor.line < doc.line_count());
                prop_assert!(cursor.column <= doc.line_len(cursor.line));
            }
        }
    }

    #[test]
    fn test_is_selected_shape() {
        let sel = Selection::new(Cursor::at(0, 2), Cursor::at(2, 1));
        // start line suffix
        assert!(!sel.is_selected(0, 1));
        assert!(sel.is_selected(0, 2));
        assert!(sel.is_selected(0, 40));
        // interior line in full
        assert!(sel.is_selected(1, 0));
        assert!(sel.is_selected(1, 99));
        // end line prefix, half-open
        assert!(sel.is_selected(2, 0));
        assert!(!sel.is_selected(2, 1));
    }

    #[test]
    fn test_single_line_half_open() {
        let sel = Selection::new(Cursor::at(0, 0), Cursor::at(0, 3));
        assert!(sel.is_selected(0, 0));
        assert!(sel.is_selected(0, 2));
        assert!(!sel.is_selected(0, 3));
    }
}
