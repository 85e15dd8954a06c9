use anyhow::Result;
use ratatui::style::Style;

use crate::Event;

/// Minimal drawing and input capability the editor renders onto.
///
/// Cells are addressed in columns and rows from the top-left corner.
/// Nothing becomes visible until [`ScreenSurface::show`] is called.
pub trait ScreenSurface {
    /// Surface size as (cols, rows)
    fn size(&self) -> (u16, u16);

    /// Reset every cell to a blank with default style
    fn clear(&mut self);

    /// Paint one code point; out-of-bounds coordinates are ignored
    fn set_cell(&mut self, x: u16, y: u16, ch: char, style: Style);

    /// Place the hardware cursor, or hide it
    fn set_cursor(&mut self, position: Option<(u16, u16)>);

    /// Flush painted cells to the screen
    fn show(&mut self) -> Result<()>;

    /// Block until the next input event
    fn poll_event(&mut self) -> Result<Event>;
}
