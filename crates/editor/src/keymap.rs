//! Keyboard command handling for the editor.
//!
//! Key parsing is separated from execution: [`EditorCommand::from_key_event`]
//! decides what a key means in the current mode, [`EditorCommand::execute`]
//! applies it to the editor.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::{Editor, Mode};

/// Cursor motion shared by Normal, Insert and Visual modes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    Left,
    Right,
    Up,
    Down,
    LineStart,
    LineEnd,
    Top,
    Bottom,
}

/// Editor command representing a user action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorCommand {
    // Global
    SendQuery,

    // Navigation (extends the selection in Visual mode)
    Move(Motion),
    /// First `g` of `gg`
    PendingTop,

    // Mode changes from Normal
    EnterInsert,
    EnterVisual,
    EnterApiSelect,
    EnterQuitConfirm,
    /// Esc in Insert and Visual
    ExitToNormal,

    // Normal
    Paste,
    Save,

    // Insert
    InsertChar(char),
    InsertTab,
    InsertNewline,
    Backspace,

    // Visual
    Yank,
    DeleteSelection,

    // Provider selection
    PrevProvider,
    NextProvider,
    ConfirmProvider,
    CancelProvider,

    // Quit confirmation
    ConfirmQuit,
    CancelQuit,

    // No operation (for unhandled keys)
    None,
}

/// Plain or shifted character, i.e. no Ctrl/Alt
fn plain_char(key: &KeyEvent) -> Option<char> {
    match key.code {
        KeyCode::Char(ch) if key.modifiers.difference(KeyModifiers::SHIFT).is_empty() => Some(ch),
        _ => None,
    }
}

/// Arrow keys without modifiers
fn arrow_motion(key: &KeyEvent) -> Option<Motion> {
    if key.modifiers != KeyModifiers::NONE {
        return None;
    }
    match key.code {
        KeyCode::Left => Some(Motion::Left),
        KeyCode::Right => Some(Motion::Right),
        KeyCode::Up => Some(Motion::Up),
        KeyCode::Down => Some(Motion::Down),
        _ => None,
    }
}

/// Motion keys of Normal and Visual mode
fn motion(key: &KeyEvent, pending_top: bool) -> Option<EditorCommand> {
    if let Some(motion) = arrow_motion(key) {
        return Some(EditorCommand::Move(motion));
    }
    let motion = match plain_char(key)? {
        'h' => Motion::Left,
        'l' => Motion::Right,
        'k' => Motion::Up,
        'j' => Motion::Down,
        '0' => Motion::LineStart,
        '$' => Motion::LineEnd,
        'G' => Motion::Bottom,
        'g' if pending_top => Motion::Top,
        'g' => return Some(EditorCommand::PendingTop),
        _ => return None,
    };
    Some(EditorCommand::Move(motion))
}

impl EditorCommand {
    /// Parse a KeyEvent into an EditorCommand for `mode`.
    ///
    /// `pending_top` is true when the previous key was a lone `g`.
    pub fn from_key_event(key: KeyEvent, mode: Mode, pending_top: bool) -> Self {
        if key.code == KeyCode::Char('e') && key.modifiers == KeyModifiers::CONTROL {
            return Self::SendQuery;
        }

        match mode {
            Mode::Normal => Self::from_normal(key, pending_top),
            Mode::Insert => Self::from_insert(key),
            Mode::Visual => Self::from_visual(key, pending_top),
            Mode::ApiSelect => Self::from_api_select(key),
            Mode::QuitConfirm => Self::from_quit_confirm(key),
        }
    }

    fn from_normal(key: KeyEvent, pending_top: bool) -> Self {
        if let Some(command) = motion(&key, pending_top) {
            return command;
        }
        if key.code == KeyCode::Char('s') && key.modifiers == KeyModifiers::CONTROL {
            return Self::Save;
        }
        match plain_char(&key) {
            Some('i') => Self::EnterInsert,
            Some('v') => Self::EnterVisual,
            Some('a') => Self::EnterApiSelect,
            Some('p') => Self::Paste,
            Some('q') => Self::EnterQuitConfirm,
            _ => Self::None,
        }
    }

    fn from_insert(key: KeyEvent) -> Self {
        if let Some(motion) = arrow_motion(&key) {
            return Self::Move(motion);
        }
        match (key.code, key.modifiers) {
            (KeyCode::Esc, _) => Self::ExitToNormal,
            (KeyCode::Enter, KeyModifiers::NONE) => Self::InsertNewline,
            (KeyCode::Backspace, KeyModifiers::NONE) => Self::Backspace,
            (KeyCode::Tab, KeyModifiers::NONE) => Self::InsertTab,
            _ => match plain_char(&key) {
                Some(ch) if !ch.is_control() => Self::InsertChar(ch),
                _ => Self::None,
            },
        }
    }

    fn from_visual(key: KeyEvent, pending_top: bool) -> Self {
        if key.code == KeyCode::Esc {
            return Self::ExitToNormal;
        }
        if let Some(command) = motion(&key, pending_top) {
            return command;
        }
        match plain_char(&key) {
            Some('y') => Self::Yank,
            Some('d') | Some('x') => Self::DeleteSelection,
            _ => Self::None,
        }
    }

    fn from_api_select(key: KeyEvent) -> Self {
        match (key.code, key.modifiers) {
            (KeyCode::Left, KeyModifiers::NONE) => Self::PrevProvider,
            (KeyCode::Right, KeyModifiers::NONE) => Self::NextProvider,
            (KeyCode::Enter, KeyModifiers::NONE) => Self::ConfirmProvider,
            (KeyCode::Esc, _) => Self::CancelProvider,
            _ => match plain_char(&key) {
                Some('h') => Self::PrevProvider,
                Some('l') => Self::NextProvider,
                _ => Self::None,
            },
        }
    }

    fn from_quit_confirm(key: KeyEvent) -> Self {
        match (key.code, key.modifiers) {
            (KeyCode::Enter, KeyModifiers::NONE) => Self::ConfirmQuit,
            (KeyCode::Esc, _) => Self::CancelQuit,
            _ => match plain_char(&key) {
                Some('y') | Some('Y') => Self::ConfirmQuit,
                Some('n') | Some('N') => Self::CancelQuit,
                _ => Self::None,
            },
        }
    }

    /// Execute this command on the given editor.
    pub fn execute(self, editor: &mut Editor) {
        match self {
            Self::SendQuery => editor.request_query(),

            Self::Move(motion) => editor.move_cursor(motion),
            Self::PendingTop => editor.pending_top = true,

            Self::EnterInsert => editor.set_mode(Mode::Insert),
            Self::EnterVisual => editor.start_visual(),
            Self::EnterApiSelect => editor.start_api_select(),
            Self::EnterQuitConfirm => editor.set_mode(Mode::QuitConfirm),
            Self::ExitToNormal => editor.set_mode(Mode::Normal),

            Self::Paste => editor.paste(),
            Self::Save => editor.save_now(),

            Self::InsertChar(ch) => editor.insert_char(ch),
            Self::InsertTab => editor.insert_tab(),
            Self::InsertNewline => editor.insert_newline(),
            Self::Backspace => editor.backspace(),

            Self::Yank => editor.yank_selection(),
            Self::DeleteSelection => editor.delete_selection(),

            Self::PrevProvider => editor.cycle_provider(false),
            Self::NextProvider => editor.cycle_provider(true),
            Self::ConfirmProvider => editor.confirm_provider(),
            Self::CancelProvider => editor.cancel_provider(),

            Self::ConfirmQuit => editor.confirm_quit(),
            Self::CancelQuit => editor.set_mode(Mode::Normal),

            Self::None => {}
        }
    }
}
