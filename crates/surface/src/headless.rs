use std::collections::VecDeque;

use anyhow::{bail, Result};
use gottem_core::{Event, ScreenSurface};
use ratatui::style::Style;

/// Headless surface that records painted cells and replays a scripted
/// sequence of input events.
///
/// Polling past the end of the script is an error, which ends a control
/// loop that never reached a quit.
#[derive(Debug, Clone)]
pub struct TestSurface {
    width: u16,
    height: u16,
    cells: Vec<(char, Style)>,
    cursor: Option<(u16, u16)>,
    events: VecDeque<Event>,
    frames: usize,
}

impl TestSurface {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![(' ', Style::default()); width as usize * height as usize],
            cursor: None,
            events: VecDeque::new(),
            frames: 0,
        }
    }

    /// Queue events to be returned by `poll_event`
    pub fn script(mut self, events: impl IntoIterator<Item = Event>) -> Self {
        self.events.extend(events);
        self
    }

    /// Character and style painted at (x, y)
    pub fn cell(&self, x: u16, y: u16) -> Option<(char, Style)> {
        self.index(x, y).map(|i| self.cells[i])
    }

    /// Text of row `y` with trailing blanks removed
    pub fn row_text(&self, y: u16) -> String {
        let text: String = (0..self.width)
            .filter_map(|x| self.cell(x, y).map(|(ch, _)| ch))
            .collect();
        text.trim_end().to_string()
    }

    pub fn cursor(&self) -> Option<(u16, u16)> {
        self.cursor
    }

    /// Number of times `show` was called
    pub fn frames(&self) -> usize {
        self.frames
    }

    pub fn pending_events(&self) -> usize {
        self.events.len()
    }

    fn index(&self, x: u16, y: u16) -> Option<usize> {
        (x < self.width && y < self.height).then(|| y as usize * self.width as usize + x as usize)
    }

    fn resize(&mut self, width: u16, height: u16) {
        *self = Self {
            events: std::mem::take(&mut self.events),
            frames: self.frames,
            ..Self::new(width, height)
        };
    }
}

impl ScreenSurface for TestSurface {
    fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    fn clear(&mut self) {
        self.cells.fill((' ', Style::default()));
    }

    fn set_cell(&mut self, x: u16, y: u16, ch: char, style: Style) {
        if let Some(i) = self.index(x, y) {
            self.cells[i] = (ch, style);
        }
    }

    fn set_cursor(&mut self, position: Option<(u16, u16)>) {
        self.cursor = position;
    }

    fn show(&mut self) -> Result<()> {
        self.frames += 1;
        Ok(())
    }

    fn poll_event(&mut self) -> Result<Event> {
        match self.events.pop_front() {
            Some(Event::Resize(width, height)) => {
                self.resize(width, height);
                Ok(Event::Resize(width, height))
            }
            Some(event) => Ok(event),
            None => bail!("event script exhausted"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_cells() {
        let mut surface = TestSurface::new(4, 2);
        surface.set_cell(1, 1, 'x', Style::default());
        surface.set_cell(9, 9, 'y', Style::default());
        assert_eq!(surface.row_text(1), " x");
        assert_eq!(surface.cell(9, 9), None);
    }

    #[test]
    fn test_script_then_exhausted() {
        let mut surface = TestSurface::new(4, 2).script([Event::char('a')]);
        assert_eq!(surface.poll_event().unwrap(), Event::char('a'));
        assert!(surface.poll_event().is_err());
    }

    #[test]
    fn test_resize_event_resizes_grid() {
        let mut surface = TestSurface::new(4, 2).script([Event::Resize(10, 3), Event::char('b')]);
        surface.set_cell(0, 0, 'z', Style::default());

        assert_eq!(surface.poll_event().unwrap(), Event::Resize(10, 3));
        assert_eq!(surface.size(), (10, 3));
        assert_eq!(surface.row_text(0), "");
        assert_eq!(surface.pending_events(), 1);
    }
}
