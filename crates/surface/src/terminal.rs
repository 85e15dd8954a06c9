use std::io::{self, Stdout};

use anyhow::Result;
use crossterm::{
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use gottem_core::{Event, EventHandler, ScreenSurface};
use ratatui::{
    backend::CrosstermBackend,
    buffer::Buffer,
    layout::{Position, Rect},
    style::Style,
    Terminal,
};

/// Surface backed by the real terminal.
///
/// Cells are painted into an off-screen buffer; [`ScreenSurface::show`]
/// hands it to ratatui, which writes only the cells that changed.
pub struct TerminalSurface {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    events: EventHandler,
    buffer: Buffer,
    cursor: Option<(u16, u16)>,
    keyboard_enhanced: bool,
}

impl TerminalSurface {
    /// Switch the terminal to raw mode and the alternate screen.
    ///
    /// On failure the terminal is put back the way it was found.
    pub fn enter() -> Result<Self> {
        enable_raw_mode()?;
        Self::setup().inspect_err(|_| {
            let _ = execute!(io::stdout(), LeaveAlternateScreen);
            let _ = disable_raw_mode();
        })
    }

    fn setup() -> Result<Self> {
        let mut stdout = io::stdout();

        // Kitty protocol reports key releases and disambiguates Esc sequences
        let keyboard_enhanced = supports_keyboard_enhancement().unwrap_or(false);

        execute!(stdout, EnterAlternateScreen)?;

        if keyboard_enhanced {
            execute!(
                stdout,
                PushKeyboardEnhancementFlags(
                    KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                        | KeyboardEnhancementFlags::REPORT_ALTERNATE_KEYS
                )
            )?;
        }

        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        let size = terminal.size()?;

        Ok(Self {
            terminal,
            events: EventHandler::default(),
            buffer: Buffer::empty(Rect::new(0, 0, size.width, size.height)),
            cursor: None,
            keyboard_enhanced,
        })
    }

    /// Give the terminal back to the shell; every step is attempted and the
    /// first failure is returned
    pub fn restore(&mut self) -> Result<()> {
        if self.keyboard_enhanced {
            let _ = execute!(self.terminal.backend_mut(), PopKeyboardEnhancementFlags);
        }
        let left = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let raw = disable_raw_mode();
        let cursor = self.terminal.show_cursor();
        left?;
        raw?;
        cursor?;
        Ok(())
    }
}

impl ScreenSurface for TerminalSurface {
    fn size(&self) -> (u16, u16) {
        (self.buffer.area.width, self.buffer.area.height)
    }

    fn clear(&mut self) {
        self.buffer.reset();
    }

    fn set_cell(&mut self, x: u16, y: u16, ch: char, style: Style) {
        if let Some(cell) = self.buffer.cell_mut(Position::new(x, y)) {
            cell.set_char(ch).set_style(style);
        }
    }

    fn set_cursor(&mut self, position: Option<(u16, u16)>) {
        self.cursor = position;
    }

    fn show(&mut self) -> Result<()> {
        let source = &self.buffer;
        let cursor = self.cursor;

        self.terminal.draw(|frame| {
            let area = frame.area();
            let target = frame.buffer_mut();
            for y in 0..area.height.min(source.area.height) {
                for x in 0..area.width.min(source.area.width) {
                    let position = Position::new(x, y);
                    if let (Some(src), Some(dst)) = (source.cell(position), target.cell_mut(position)) {
                        *dst = src.clone();
                    }
                }
            }
            if let Some((x, y)) = cursor {
                frame.set_cursor_position(Position::new(x, y));
            }
        })?;
        Ok(())
    }

    fn poll_event(&mut self) -> Result<Event> {
        loop {
            match self.events.next()? {
                Event::Tick => continue,
                Event::Resize(width, height) => {
                    self.buffer.resize(Rect::new(0, 0, width, height));
                    return Ok(Event::Resize(width, height));
                }
                event => return Ok(event),
            }
        }
    }
}
