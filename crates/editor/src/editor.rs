use anyhow::{Context, Result};
use crossterm::event::KeyEvent;

use gottem_buffer::{cursor_display_position, wrap_document, Cursor, Document, Selection, Viewport};
use gottem_config::EditorSettings;
use gottem_core::{
    ConversationId, Event, Message, PersistenceGateway, ProviderInfo, QueryService, ScreenSurface,
};
use gottem_logger::Logger;
use gottem_theme::Theme;

use crate::dispatch::PendingQuery;
use crate::keymap::{EditorCommand, Motion};
use crate::render::render;
use crate::Mode;

/// Transient status line message; cleared by the next key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub is_error: bool,
}

/// Startup parameters
#[derive(Debug, Clone)]
pub struct EditorOptions {
    pub conversation_id: ConversationId,
    pub settings: EditorSettings,
    pub theme: Theme,
    /// Shortcut of the provider selected at startup
    pub default_provider: Option<String>,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            conversation_id: 1,
            settings: EditorSettings::default(),
            theme: Theme::default(),
            default_provider: None,
        }
    }
}

/// Modal transcript editor
pub struct Editor {
    // === Core editing state ===
    /// Transcript text
    pub(crate) document: Document,
    pub(crate) cursor: Cursor,
    /// Active only in Visual mode
    pub(crate) selection: Option<Selection>,
    /// Single-slot yank register
    pub(crate) register: String,
    pub(crate) mode: Mode,
    /// A lone `g` was pressed
    pub(crate) pending_top: bool,

    // === View state ===
    pub(crate) viewport: Viewport,
    /// Wrap width in effect for the current screen size
    pub(crate) wrap_width: usize,
    pub(crate) settings: EditorSettings,
    pub(crate) theme: Theme,
    pub(crate) status: Option<StatusMessage>,

    // === Providers ===
    pub(crate) providers: Vec<ProviderInfo>,
    pub(crate) selected_provider: usize,
    /// Restored when provider selection is cancelled
    provider_before_select: usize,

    // === Conversation ===
    pub(crate) conversation_id: ConversationId,
    pub(crate) history: Vec<Message>,
    pub(crate) pending_query: Option<PendingQuery>,
    should_quit: bool,
    exit_error: Option<anyhow::Error>,
    /// The stored transcript could not be read; it is only overwritten
    /// once the document has been edited or saved explicitly
    load_failed: bool,

    // === Collaborators ===
    pub(crate) service: Box<dyn QueryService>,
    pub(crate) persistence: Box<dyn PersistenceGateway>,
    pub(crate) logger: Logger,
}

impl Editor {
    /// Create an editor and load the conversation's transcript.
    ///
    /// A load failure leaves the document empty and is shown on the
    /// status line.
    pub fn open(
        options: EditorOptions,
        service: Box<dyn QueryService>,
        persistence: Box<dyn PersistenceGateway>,
        logger: Logger,
    ) -> Self {
        let providers = service.providers();
        let selected_provider = match options.default_provider.as_deref() {
            Some(shortcut) => match providers.iter().position(|p| p.shortcut == shortcut) {
                Some(index) => index,
                None => {
                    logger.warn(format!("Unknown default provider '{}'", shortcut));
                    0
                }
            },
            None => 0,
        };

        let mut editor = Self {
            document: Document::new(),
            cursor: Cursor::new(),
            selection: None,
            register: String::new(),
            mode: Mode::Normal,
            pending_top: false,
            viewport: Viewport::default(),
            wrap_width: options.settings.wrap_width,
            settings: options.settings,
            theme: options.theme,
            status: None,
            providers,
            selected_provider,
            provider_before_select: selected_provider,
            conversation_id: options.conversation_id,
            history: Vec::new(),
            pending_query: None,
            should_quit: false,
            exit_error: None,
            load_failed: false,
            service,
            persistence,
            logger,
        };
        editor.load();
        editor
    }

    fn load(&mut self) {
        match self.persistence.load_context(self.conversation_id) {
            Ok(text) => {
                self.document = Document::from_text(&text);
                let last = self.document.last_line();
                self.cursor = Cursor::at(last, self.document.line_len(last));
                self.logger.info(format!(
                    "Loaded conversation {} ({} lines)",
                    self.conversation_id,
                    self.document.line_count()
                ));
            }
            Err(e) => {
                self.logger.error(format!(
                    "Failed to load conversation {}: {:#}",
                    self.conversation_id, e
                ));
                self.load_failed = true;
                self.set_error(format!("Load failed: {:#}", e));
            }
        }
    }

    // === Accessors ===

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn selection(&self) -> Option<Selection> {
        self.selection
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn register(&self) -> &str {
        &self.register
    }

    pub fn status(&self) -> Option<&StatusMessage> {
        self.status.as_ref()
    }

    /// Messages exchanged during this session
    pub fn history(&self) -> &[Message] {
        &self.history
    }

    pub fn providers(&self) -> &[ProviderInfo] {
        &self.providers
    }

    pub fn selected_provider(&self) -> Option<&ProviderInfo> {
        self.providers.get(self.selected_provider)
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    // === Status ===

    pub(crate) fn set_info(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            text: text.into(),
            is_error: false,
        });
    }

    pub(crate) fn set_error(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            text: text.into(),
            is_error: true,
        });
    }

    // === Input ===

    /// Route one input event through the mode state machine
    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Resize(cols, rows) => {
                self.logger.debug(format!("Resized to {}x{}", cols, rows));
            }
            Event::Tick => {}
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        self.status = None;
        let pending_top = std::mem::take(&mut self.pending_top);
        let command = EditorCommand::from_key_event(key, self.mode, pending_top);
        if command != EditorCommand::None {
            self.logger
                .debug(format!("{} {:?} -> {:?}", self.mode, key.code, command));
        }
        command.execute(self);
    }

    pub(crate) fn set_mode(&mut self, mode: Mode) {
        if mode == self.mode {
            return;
        }
        self.logger.debug(format!("Mode {} -> {}", self.mode, mode));
        if self.mode == Mode::Visual {
            self.selection = None;
        }
        self.mode = mode;
    }

    // === Motion ===

    pub(crate) fn move_cursor(&mut self, motion: Motion) {
        let doc = &self.document;
        match motion {
            Motion::Left => self.cursor.step(doc, -1, 0),
            Motion::Right => self.cursor.step(doc, 1, 0),
            Motion::Up => self.cursor.step(doc, 0, -1),
            Motion::Down => self.cursor.step(doc, 0, 1),
            Motion::LineStart => self.cursor.move_to_line_start(),
            Motion::LineEnd => self.cursor.move_to_line_end(doc),
            Motion::Top => self.cursor.move_to_top(),
            Motion::Bottom => self.cursor.move_to_bottom(doc),
        }
        if let Some(selection) = &mut self.selection {
            selection.active = self.cursor;
        }
    }

    // === Editing ===

    pub(crate) fn insert_char(&mut self, ch: char) {
        self.document.insert_char(&mut self.cursor, ch);
    }

    pub(crate) fn insert_tab(&mut self) {
        for _ in 0..self.settings.tab_size {
            self.document.insert_char(&mut self.cursor, ' ');
        }
    }

    pub(crate) fn insert_newline(&mut self) {
        self.document.insert_newline(&mut self.cursor);
    }

    pub(crate) fn backspace(&mut self) {
        self.document.backspace(&mut self.cursor);
    }

    /// Insert the register before the cursor
    pub(crate) fn paste(&mut self) {
        if self.register.is_empty() {
            self.set_info("Register is empty");
            return;
        }
        self.document.insert_text(&mut self.cursor, &self.register);
    }

    // === Visual ===

    pub(crate) fn start_visual(&mut self) {
        self.selection = Some(Selection::new(self.cursor, self.cursor));
        self.set_mode(Mode::Visual);
    }

    pub(crate) fn yank_selection(&mut self) {
        if let Some(selection) = self.selection {
            let range = selection.range();
            self.register = self.document.text_in(range);
            self.cursor = range.start;
            self.logger.debug(format!(
                "Yanked {} chars",
                self.register.chars().count()
            ));
        }
        self.set_mode(Mode::Normal);
    }

    pub(crate) fn delete_selection(&mut self) {
        if let Some(selection) = self.selection {
            self.cursor = self.document.delete_range(selection.range());
        }
        self.set_mode(Mode::Normal);
    }

    // === Provider selection ===

    pub(crate) fn start_api_select(&mut self) {
        if self.providers.is_empty() {
            self.set_error("No providers configured");
            return;
        }
        self.provider_before_select = self.selected_provider;
        self.set_mode(Mode::ApiSelect);
    }

    pub(crate) fn cycle_provider(&mut self, forward: bool) {
        let count = self.providers.len();
        if count == 0 {
            return;
        }
        self.selected_provider = if forward {
            (self.selected_provider + 1) % count
        } else {
            (self.selected_provider + count - 1) % count
        };
    }

    pub(crate) fn confirm_provider(&mut self) {
        if let Some(provider) = self.selected_provider() {
            let message = format!("Selected provider {} ({})", provider.name, provider.shortcut);
            self.logger.info(message.clone());
            self.set_info(message);
        }
        self.set_mode(Mode::Normal);
    }

    pub(crate) fn cancel_provider(&mut self) {
        self.selected_provider = self.provider_before_select;
        self.set_mode(Mode::Normal);
    }

    // === Persistence ===

    /// Write the transcript through the persistence gateway
    pub fn save(&mut self) -> Result<()> {
        let text = self.document.to_text();
        self.persistence
            .save_context(self.conversation_id, &text)
            .with_context(|| format!("failed to save conversation {}", self.conversation_id))?;
        self.document.mark_saved();
        self.load_failed = false;
        self.logger
            .info(format!("Saved conversation {}", self.conversation_id));
        Ok(())
    }

    /// Save before exiting, leaving an unreadable transcript untouched
    /// when nothing was edited
    fn save_on_exit(&mut self) -> Result<()> {
        if self.load_failed && !self.document.is_modified() {
            self.logger.warn(format!(
                "Not saving conversation {}: transcript was never loaded",
                self.conversation_id
            ));
            return Ok(());
        }
        self.save()
    }

    pub(crate) fn save_now(&mut self) {
        match self.save() {
            Ok(()) => self.set_info(format!("Saved conversation {}", self.conversation_id)),
            Err(e) => {
                self.logger.error(format!("{:#}", e));
                self.set_error(format!("Save failed: {:#}", e));
            }
        }
    }

    pub(crate) fn confirm_quit(&mut self) {
        if let Err(e) = self.save_on_exit() {
            self.logger.error(format!("{:#}", e));
            self.exit_error = Some(e);
        }
        self.should_quit = true;
    }

    // === View ===

    /// Recompute wrap width and scroll offset for a screen of `size`
    pub fn sync_view(&mut self, size: (u16, u16)) {
        let (cols, rows) = size;
        self.wrap_width = self.settings.effective_wrap_width(cols as usize);
        self.viewport.resize(rows.saturating_sub(1) as usize);

        let display = wrap_document(&self.document, self.wrap_width);
        let (row, _) = cursor_display_position(&display, self.cursor);
        self.viewport.ensure_row_visible(row, display.len());
    }

    // === Control loop ===

    /// Render, wait for input, dispatch; until quit is confirmed.
    ///
    /// The transcript is saved on every exit path. A save failure on exit
    /// is returned after the loop has stopped.
    pub fn run(&mut self, surface: &mut dyn ScreenSurface) -> Result<()> {
        self.logger.info(format!(
            "Editing conversation {}",
            self.conversation_id
        ));

        if let Err(e) = self.event_loop(surface) {
            if let Err(save_error) = self.save_on_exit() {
                self.logger.error(format!("{:#}", save_error));
            }
            return Err(e);
        }

        match self.exit_error.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    fn event_loop(&mut self, surface: &mut dyn ScreenSurface) -> Result<()> {
        loop {
            self.sync_view(surface.size());
            render(self, surface);
            surface.show()?;

            if self.should_quit {
                return Ok(());
            }

            // The "sending" status is on screen; block on the provider now
            if self.pending_query.is_some() {
                self.dispatch_pending_query();
                continue;
            }

            let event = surface.poll_event()?;
            self.handle_event(event);
        }
    }
}
