use crate::{Cursor, LineEnding, TextRange};

/// Display color tag carried by every line.
///
/// The tag is resolved to concrete colors by the renderer's theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorTag {
    /// Text typed by the user
    #[default]
    Text,
    /// Text appended from a provider response
    Response,
}

/// One logical line: code points plus a color tag.
///
/// Never contains a line separator.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Line {
    pub text: String,
    pub style: ColorTag,
}

impl Line {
    pub fn new(text: impl Into<String>, style: ColorTag) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    /// Length in code points
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// True when the line has no visible characters
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Ordered sequence of styled lines.
///
/// Always holds at least one line. Every edit goes through the methods
/// below, which keep the cursor they are handed inside buffer bounds.
#[derive(Debug, Clone)]
pub struct Document {
    lines: Vec<Line>,
    /// Line ending used when serializing
    line_ending: LineEnding,
    /// Modified since last load/save
    modified: bool,
}

impl Document {
    /// Create a document holding a single empty line
    pub fn new() -> Self {
        Self {
            lines: vec![Line::default()],
            line_ending: LineEnding::LF,
            modified: false,
        }
    }

    /// Build a document from persisted transcript text.
    ///
    /// Every line is tagged [`ColorTag::Text`]. Lines are split on `\n` with
    /// a preceding `\r` stripped, and the line ending is detected so that
    /// [`Document::to_text`] reproduces the input byte for byte. Mixed line
    /// endings are normalized to CRLF and the document starts modified.
    pub fn from_text(content: &str) -> Self {
        let crlf_count = content.matches("\r\n").count();
        let lf_count = content.matches('\n').count();
        let line_ending = if crlf_count > 0 {
            LineEnding::CRLF
        } else {
            LineEnding::LF
        };

        let mut lines: Vec<Line> = content
            .split('\n')
            .map(|line| Line::new(line, ColorTag::Text))
            .collect();
        // Every segment but the last was followed by '\n'
        let separated = lines.len() - 1;
        for line in &mut lines[..separated] {
            if line.text.ends_with('\r') {
                line.text.pop();
            }
        }

        Self {
            lines,
            line_ending,
            modified: crlf_count > 0 && crlf_count != lf_count,
        }
    }

    /// Serialize as newline-joined plain text
    pub fn to_text(&self) -> String {
        let texts: Vec<&str> = self.lines.iter().map(|l| l.text.as_str()).collect();
        texts.join(self.line_ending.as_str())
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn line(&self, index: usize) -> Option<&Line> {
        self.lines.get(index)
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Line length in code points, 0 for a missing line
    pub fn line_len(&self, index: usize) -> usize {
        self.lines.get(index).map(Line::len).unwrap_or(0)
    }

    /// Index of the last line
    pub fn last_line(&self) -> usize {
        self.lines.len() - 1
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// Mark content as persisted
    pub fn mark_saved(&mut self) {
        self.modified = false;
    }

    /// Clamp a position into buffer bounds
    pub fn clamp(&self, cursor: Cursor) -> Cursor {
        let line = cursor.line.min(self.last_line());
        Cursor::at(line, cursor.column.min(self.line_len(line)))
    }

    /// Insert a code point at the cursor and advance it by one column.
    ///
    /// A line separator is routed to [`Document::insert_newline`]. Does
    /// nothing if the cursor line does not exist.
    pub fn insert_char(&mut self, cursor: &mut Cursor, ch: char) {
        if ch == '\n' {
            self.insert_newline(cursor);
            return;
        }
        let Some(line) = self.lines.get_mut(cursor.line) else {
            return;
        };

        let column = cursor.column.min(line.len());
        let byte = byte_offset(&line.text, column);
        line.text.insert(byte, ch);
        cursor.column = column + 1;
        self.modified = true;
    }

    /// Split the cursor line in two, both halves keeping its style.
    ///
    /// The cursor moves to column 0 of the new line.
    pub fn insert_newline(&mut self, cursor: &mut Cursor) {
        let Some(line) = self.lines.get_mut(cursor.line) else {
            return;
        };

        let column = cursor.column.min(line.len());
        let byte = byte_offset(&line.text, column);
        let tail = line.text.split_off(byte);
        let style = line.style;

        self.lines.insert(cursor.line + 1, Line::new(tail, style));
        *cursor = Cursor::at(cursor.line + 1, 0);
        self.modified = true;
    }

    /// Delete the code point before the cursor.
    ///
    /// At column 0 the line is joined onto the previous one and the cursor
    /// lands on the join point. At (0, 0) nothing happens.
    pub fn backspace(&mut self, cursor: &mut Cursor) {
        if cursor.line >= self.lines.len() {
            return;
        }

        let column = cursor.column.min(self.line_len(cursor.line));
        if column > 0 {
            let line = &mut self.lines[cursor.line];
            let start = byte_offset(&line.text, column - 1);
            let end = byte_offset(&line.text, column);
            line.text.replace_range(start..end, "");
            cursor.column = column - 1;
            self.modified = true;
        } else if cursor.line > 0 {
            let removed = self.lines.remove(cursor.line);
            let previous = &mut self.lines[cursor.line - 1];
            let join_column = previous.len();
            previous.text.push_str(&removed.text);
            *cursor = Cursor::at(cursor.line - 1, join_column);
            self.modified = true;
        }
    }

    /// Remove everything inside `range` and join the remainders of its
    /// first and last line. Returns the position where the range started.
    pub fn delete_range(&mut self, range: TextRange) -> Cursor {
        let start = self.clamp(range.start);
        let end = self.clamp(range.end);
        if start >= end {
            return start;
        }

        let tail = {
            let end_line = &self.lines[end.line].text;
            end_line[byte_offset(end_line, end.column)..].to_string()
        };

        let first = &mut self.lines[start.line];
        let cut = byte_offset(&first.text, start.column);
        first.text.truncate(cut);
        first.text.push_str(&tail);

        self.lines.drain(start.line + 1..=end.line);
        self.modified = true;
        start
    }

    /// Text covered by `range`, lines joined with `\n`
    pub fn text_in(&self, range: TextRange) -> String {
        let start = self.clamp(range.start);
        let end = self.clamp(range.end);
        if start >= end {
            return String::new();
        }

        if start.line == end.line {
            let text = &self.lines[start.line].text;
            return text[byte_offset(text, start.column)..byte_offset(text, end.column)]
                .to_string();
        }

        let mut result = String::new();
        for index in start.line..=end.line {
            let text = &self.lines[index].text;
            if index == start.line {
                result.push_str(&text[byte_offset(text, start.column)..]);
                result.push('\n');
            } else if index == end.line {
                result.push_str(&text[..byte_offset(text, end.column)]);
            } else {
                result.push_str(text);
                result.push('\n');
            }
        }
        result
    }

    /// Insert possibly multi-line text at the cursor, leaving the cursor
    /// after the inserted text.
    pub fn insert_text(&mut self, cursor: &mut Cursor, text: &str) {
        for ch in text.chars() {
            match ch {
                '\r' => {}
                '\n' => self.insert_newline(cursor),
                _ => self.insert_char(cursor, ch),
            }
        }
    }

    /// Append `text` as new lines carrying `style`.
    ///
    /// A document that is just one empty line has that line replaced.
    /// Returns the index of the first appended line.
    pub fn append_block(&mut self, text: &str, style: ColorTag) -> usize {
        let replace_placeholder = self.lines.len() == 1 && self.lines[0].is_empty();
        if replace_placeholder {
            self.lines.clear();
        }

        let first = self.lines.len();
        self.lines.extend(
            text.split('\n')
                .map(|line| Line::new(line.trim_end_matches('\r'), style)),
        );
        self.modified = true;
        first
    }

    /// Index of the last line with visible characters, scanning backward
    pub fn last_non_blank_line(&self) -> Option<usize> {
        self.lines.iter().rposition(|line| !line.is_blank())
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

/// Byte offset of code point `column` in `text`, clamped to the end
pub(crate) fn byte_offset(text: &str, column: usize) -> usize {
    text.char_indices()
        .nth(column)
        .map(|(byte, _)| byte)
        .unwrap_or(text.len())
}
