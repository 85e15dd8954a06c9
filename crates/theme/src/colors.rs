//! Theme color definitions.

use gottem_buffer::ColorTag;
use ratatui::style::{Color, Modifier, Style};

/// Editor theme with semantic color assignments.
///
/// The palette has:
/// - 2 base colors (bg, fg)
/// - 1 transcript color (response)
/// - 2 status bar colors (accented_bg, accented_fg)
/// - 2 selection colors (selected_bg, selected_fg)
/// - 1 disabled color
/// - 2 semantic colors (success, error)
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    /// Theme name for display
    pub name: String,

    // === Base ===
    /// Editor background
    pub bg: Color,
    /// Text typed by the user
    pub fg: Color,

    // === Transcript ===
    /// Provider responses
    pub response: Color,

    // === Accented ===
    /// Status bar background
    pub accented_bg: Color,
    /// Mode label, provider name
    pub accented_fg: Color,

    // === Selection ===
    /// Visual mode selection background
    pub selected_bg: Color,
    /// Visual mode selection text
    pub selected_fg: Color,

    /// Secondary status bar text
    pub disabled: Color,

    // === Semantic ===
    /// Informational status messages
    pub success: Color,
    /// Error status messages
    pub error: Color,
}

impl Theme {
    /// Text style for a line carrying `tag`
    pub fn style_for(&self, tag: ColorTag) -> Style {
        let fg = match tag {
            ColorTag::Text => self.fg,
            ColorTag::Response => self.response,
        };
        Style::default().fg(fg).bg(self.bg)
    }

    /// Highlight style for selected cells
    pub fn selection_style(&self) -> Style {
        Style::default().fg(self.selected_fg).bg(self.selected_bg)
    }

    /// Base status bar style
    pub fn status_style(&self) -> Style {
        Style::default().fg(self.fg).bg(self.accented_bg)
    }

    /// Status bar mode label
    pub fn mode_style(&self) -> Style {
        Style::default()
            .fg(self.accented_fg)
            .bg(self.accented_bg)
            .add_modifier(Modifier::BOLD)
    }

    /// Status message style
    pub fn message_style(&self, is_error: bool) -> Style {
        if is_error {
            Style::default()
                .fg(self.error)
                .bg(self.accented_bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.success).bg(self.accented_bg)
        }
    }

    /// Hardcoded fallback theme in case of parse errors.
    pub fn fallback(name: &str) -> Self {
        Self {
            name: name.to_string(),
            bg: Color::Reset,
            fg: Color::White,
            response: Color::Cyan,
            accented_bg: Color::DarkGray,
            accented_fg: Color::Cyan,
            selected_bg: Color::Blue,
            selected_fg: Color::White,
            disabled: Color::Gray,
            success: Color::Green,
            error: Color::Red,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::get_by_name("default", None)
    }
}
