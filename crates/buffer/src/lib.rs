//! Text model for gottem.
//!
//! Provides the line-oriented document with per-line color tags, cursor
//! and selection handling, soft wrapping into display lines, and the
//! wrap-aware viewport.

mod cursor;
mod document;
mod viewport;
mod wrap;

pub use cursor::{Cursor, Selection, TextRange};
pub use document::{ColorTag, Document, Line};
pub use viewport::Viewport;
pub use wrap::{
    calculate_wrap_point, calculate_wrap_points_for_line, char_width, content_width,
    cursor_display_position, wrap_document, wrap_line, DisplayLine,
};

/// Line ending type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum LineEnding {
    #[default]
    LF, // Unix \n
    CRLF, // Windows \r\n
}

impl LineEnding {
    /// Separator written between lines
    pub fn as_str(&self) -> &'static str {
        match self {
            LineEnding::LF => "\n",
            LineEnding::CRLF => "\r\n",
        }
    }
}
