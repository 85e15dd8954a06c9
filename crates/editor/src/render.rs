//! Painting the editor onto a screen surface.
//!
//! Rendering is a pure function of editor state: the transcript area shows
//! the wrapped display lines from the viewport's top row, the last screen
//! row is the status bar.

use gottem_buffer::{char_width, cursor_display_position, wrap_document, DisplayLine, Selection};
use gottem_core::ScreenSurface;
use gottem_theme::Theme;
use ratatui::style::Style;

use crate::{Editor, Mode};

/// Paint the whole screen and position the cursor
pub fn render(editor: &Editor, surface: &mut dyn ScreenSurface) {
    let (cols, rows) = surface.size();
    surface.clear();
    if cols == 0 || rows == 0 {
        surface.set_cursor(None);
        return;
    }

    let theme = &editor.theme;
    let text_rows = rows - 1;
    let display = wrap_document(&editor.document, editor.wrap_width);
    let selection = match editor.mode {
        Mode::Visual => editor.selection.filter(|s| !s.is_empty()),
        _ => None,
    };

    let base = Style::default().fg(theme.fg).bg(theme.bg);
    for y in 0..text_rows {
        fill_row(surface, y, cols, base);
        let row = editor.viewport.top_row + y as usize;
        if let Some(line) = display.get(row) {
            draw_display_line(editor, surface, y, cols, line, selection);
        }
    }

    draw_status_bar(editor, surface, rows - 1, cols);

    let (row, x) = cursor_display_position(&display, editor.cursor);
    let cursor = editor
        .viewport
        .row_to_screen(row)
        .filter(|&y| y < text_rows as usize && x < cols as usize)
        .map(|y| (x as u16, y as u16));
    surface.set_cursor(cursor);
}

fn fill_row(surface: &mut dyn ScreenSurface, y: u16, cols: u16, style: Style) {
    for x in 0..cols {
        surface.set_cell(x, y, ' ', style);
    }
}

fn draw_display_line(
    editor: &Editor,
    surface: &mut dyn ScreenSurface,
    y: u16,
    cols: u16,
    line: &DisplayLine,
    selection: Option<Selection>,
) {
    let theme = &editor.theme;
    let text_style = theme.style_for(line.style);
    let is_selected = |column: usize| {
        selection
            .map(|s| s.is_selected(line.source_line, column))
            .unwrap_or(false)
    };

    let mut x = 0usize;
    for (offset, ch) in line.text.chars().enumerate() {
        let width = char_width(ch);
        if width == 0 {
            continue;
        }
        if x + width > cols as usize {
            return;
        }
        let style = if is_selected(line.start_column + offset) {
            theme.selection_style()
        } else {
            text_style
        };
        surface.set_cell(x as u16, y, ch, style);
        x += width;
    }

    // Selected line break, shown on the last fragment of the line
    let end_column = line.start_column + line.len();
    if end_column == editor.document.line_len(line.source_line)
        && is_selected(end_column)
        && x < cols as usize
    {
        surface.set_cell(x as u16, y, ' ', theme.selection_style());
    }
}

/// Write `text` from `x`, stopping at the right edge; returns the next column
fn put_str(
    surface: &mut dyn ScreenSurface,
    mut x: u16,
    y: u16,
    cols: u16,
    text: &str,
    style: Style,
) -> u16 {
    for ch in text.chars() {
        let width = char_width(ch) as u16;
        if width == 0 {
            continue;
        }
        if x + width > cols {
            break;
        }
        surface.set_cell(x, y, ch, style);
        x += width;
    }
    x
}

fn str_width(text: &str) -> u16 {
    text.chars().map(char_width).sum::<usize>() as u16
}

fn disabled_style(theme: &Theme) -> Style {
    Style::default().fg(theme.disabled).bg(theme.accented_bg)
}

fn draw_status_bar(editor: &Editor, surface: &mut dyn ScreenSurface, y: u16, cols: u16) {
    let theme = &editor.theme;
    fill_row(surface, y, cols, theme.status_style());

    let mut x = put_str(
        surface,
        0,
        y,
        cols,
        &format!(" {} ", editor.mode),
        theme.mode_style(),
    );

    let provider = match editor.selected_provider() {
        Some(p) => format!(" {} ({}) ", p.name, p.shortcut),
        None => " no provider ".to_string(),
    };
    let provider_style = if editor.mode == Mode::ApiSelect {
        theme.selection_style()
    } else {
        theme.status_style()
    };
    x = put_str(surface, x, y, cols, &provider, provider_style);
    x = put_str(surface, x, y, cols, " ", theme.status_style());

    match editor.mode {
        Mode::ApiSelect => {
            let hint = format!(
                "{}/{}  h/l: switch  Enter: select  Esc: cancel",
                editor.selected_provider + 1,
                editor.providers.len()
            );
            x = put_str(surface, x, y, cols, &hint, disabled_style(theme));
        }
        Mode::QuitConfirm => {
            x = put_str(
                surface,
                x,
                y,
                cols,
                "Save and quit? (y/n)",
                theme.message_style(false),
            );
        }
        _ => {
            if let Some(status) = &editor.status {
                x = put_str(
                    surface,
                    x,
                    y,
                    cols,
                    &status.text,
                    theme.message_style(status.is_error),
                );
            }
        }
    }

    let position = format!(
        "{}{}:{} ",
        if editor.document.is_modified() { "[+] " } else { "" },
        editor.cursor.line + 1,
        editor.cursor.column + 1
    );
    let width = str_width(&position);
    if x + width <= cols {
        put_str(surface, cols - width, y, cols, &position, disabled_style(theme));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::*;
    use gottem_buffer::ColorTag;
    use gottem_surface::TestSurface;

    fn draw(editor: &mut Editor, cols: u16, rows: u16) -> TestSurface {
        let mut surface = TestSurface::new(cols, rows);
        editor.sync_view((cols, rows));
        render(editor, &mut surface);
        surface
    }

    #[test]
    fn test_transcript_and_status_bar() {
        let (mut editor, _, _) = editor_with_text("hello");
        editor.send_query();
        let surface = draw(&mut editor, 60, 5);

        assert_eq!(surface.row_text(0), "hello");
        assert_eq!(surface.row_text(1), "world");
        assert_eq!(surface.row_text(2), "");

        let theme = editor.theme();
        assert_eq!(surface.cell(0, 0).map(|c| c.1), Some(theme.style_for(ColorTag::Text)));
        assert_eq!(surface.cell(0, 1).map(|c| c.1), Some(theme.style_for(ColorTag::Response)));

        let status = surface.row_text(4);
        assert!(status.starts_with(" NORMAL "));
        assert!(status.contains("Mock (m)"));
        assert!(status.contains("Response from Mock"));
        assert!(status.ends_with("2:1"));
    }

    #[test]
    fn test_long_line_wraps() {
        let text = "a".repeat(25);
        let (mut editor, _, _) = editor_with_text(&text);
        editor.settings.wrap_width = 10;
        let surface = draw(&mut editor, 20, 5);

        assert_eq!(surface.row_text(0), "a".repeat(9));
        assert_eq!(surface.row_text(1), "a".repeat(9));
        assert_eq!(surface.row_text(2), "a".repeat(7));
        // End of line stays on the last fragment
        assert_eq!(surface.cursor(), Some((7, 2)));
    }

    #[test]
    fn test_wrap_width_follows_narrow_terminal() {
        let text = "b".repeat(30);
        let (mut editor, _, _) = editor_with_text(&text);
        let surface = draw(&mut editor, 16, 6);
        assert_eq!(surface.row_text(0), "b".repeat(15));
        assert_eq!(surface.row_text(1), "b".repeat(15));
    }

    #[test]
    fn test_selection_highlight() {
        let (mut editor, _, _) = editor_with_text("abcd\nef");
        press_all(&mut editor, &[ch('g'), ch('g'), ch('v'), ch('l'), ch('l')]);
        let surface = draw(&mut editor, 20, 4);
        let selected = editor.theme().selection_style();

        assert_eq!(surface.cell(0, 0).map(|c| c.1), Some(selected));
        assert_eq!(surface.cell(1, 0).map(|c| c.1), Some(selected));
        assert_ne!(surface.cell(2, 0).map(|c| c.1), Some(selected));
        assert!(surface.row_text(3).starts_with(" VISUAL "));
    }

    #[test]
    fn test_selected_line_break_is_highlighted() {
        let (mut editor, _, _) = editor_with_text("ab\ncd");
        press_all(&mut editor, &[ch('g'), ch('g'), ch('v'), ch('j')]);
        let surface = draw(&mut editor, 20, 4);
        let selected = editor.theme().selection_style();
        assert_eq!(surface.cell(2, 0), Some((' ', selected)));
        assert_ne!(surface.cell(0, 1).map(|c| c.1), Some(selected));
    }

    #[test]
    fn test_cursor_follows_scroll() {
        let text = (1..=10).map(|i| i.to_string()).collect::<Vec<_>>().join("\n");
        let (mut editor, _, _) = editor_with_text(&text);
        let surface = draw(&mut editor, 20, 4);

        // 3 text rows showing lines 8..=10
        assert_eq!(surface.row_text(0), "8");
        assert_eq!(surface.row_text(2), "10");
        assert_eq!(surface.cursor(), Some((2, 2)));
    }

    #[test]
    fn test_mode_prompts() {
        let (mut editor, _, _) = editor_with_text("x");
        press(&mut editor, ch('q'));
        let surface = draw(&mut editor, 60, 3);
        assert!(surface.row_text(2).contains("Save and quit? (y/n)"));

        press_all(&mut editor, &[ch('n'), ch('a')]);
        let surface = draw(&mut editor, 60, 3);
        let status = surface.row_text(2);
        assert!(status.starts_with(" API "));
        assert!(status.contains("1/1"));
    }

    #[test]
    fn test_dirty_marker() {
        let (mut editor, _, _) = editor_with_text("x");
        press_all(&mut editor, &[ch('i'), ch('y')]);
        let surface = draw(&mut editor, 40, 3);
        assert!(surface.row_text(2).ends_with("[+] 1:3"));
    }

    #[test]
    fn test_tiny_surface() {
        let (mut editor, _, _) = editor_with_text("hello");
        let surface = draw(&mut editor, 3, 1);
        assert!(surface.cursor().is_none());
        assert_eq!(surface.row_text(0), " NO");
    }
}
