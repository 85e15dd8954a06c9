//! In-memory collaborators for editor tests.

use std::cell::RefCell;
use std::rc::Rc;

use anyhow::{anyhow, bail, Result};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use gottem_core::{ConversationId, Message, PersistenceGateway, ProviderInfo, QueryService};
use gottem_logger::Logger;

use crate::{Editor, EditorOptions};

pub type Shared<T> = Rc<RefCell<T>>;

/// One call made to [`StubService::handle`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryCall {
    pub shortcut: String,
    pub query: String,
    pub context: String,
}

/// Query service with a canned reply
pub struct StubService {
    providers: Vec<ProviderInfo>,
    reply: std::result::Result<String, String>,
    pub calls: Shared<Vec<QueryCall>>,
}

impl StubService {
    pub fn replying(reply: &str) -> Self {
        Self {
            providers: vec![ProviderInfo::new("Mock", "m")],
            reply: Ok(reply.to_string()),
            calls: Shared::default(),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            reply: Err(message.to_string()),
            ..Self::replying("")
        }
    }

    pub fn with_providers(mut self, shortcuts: &[&str]) -> Self {
        self.providers = shortcuts
            .iter()
            .map(|s| ProviderInfo::new(format!("Provider {}", s), *s))
            .collect();
        self
    }
}

impl QueryService for StubService {
    fn handle(
        &mut self,
        shortcut: &str,
        query: &str,
        _conversation_id: ConversationId,
        context: &str,
    ) -> Result<String> {
        self.calls.borrow_mut().push(QueryCall {
            shortcut: shortcut.to_string(),
            query: query.to_string(),
            context: context.to_string(),
        });
        self.reply.clone().map_err(|e| anyhow!(e))
    }

    fn providers(&self) -> Vec<ProviderInfo> {
        self.providers.clone()
    }
}

/// Persistence gateway keeping everything in memory
#[derive(Default)]
pub struct MemoryStore {
    initial: String,
    fail_load: bool,
    fail_save: bool,
    pub saves: Shared<Vec<String>>,
    pub recorded: Shared<Vec<Message>>,
}

impl MemoryStore {
    pub fn with_text(text: &str) -> Self {
        Self {
            initial: text.to_string(),
            ..Self::default()
        }
    }

    pub fn failing_load() -> Self {
        Self {
            fail_load: true,
            ..Self::default()
        }
    }

    pub fn failing_save(text: &str) -> Self {
        Self {
            fail_save: true,
            ..Self::with_text(text)
        }
    }
}

impl PersistenceGateway for MemoryStore {
    fn load_context(&self, _conversation_id: ConversationId) -> Result<String> {
        if self.fail_load {
            bail!("disk unavailable");
        }
        Ok(self.initial.clone())
    }

    fn save_context(&mut self, _conversation_id: ConversationId, text: &str) -> Result<()> {
        if self.fail_save {
            bail!("disk full");
        }
        self.saves.borrow_mut().push(text.to_string());
        Ok(())
    }

    fn record_messages(&mut self, _conversation_id: ConversationId, messages: &[Message]) -> Result<()> {
        self.recorded.borrow_mut().extend_from_slice(messages);
        Ok(())
    }
}

pub fn open_editor(service: StubService, store: MemoryStore) -> Editor {
    Editor::open(
        EditorOptions::default(),
        Box::new(service),
        Box::new(store),
        Logger::memory(100),
    )
}

/// Editor over `text` with a stub replying "world"; returns the query log
/// and the saved texts
pub fn editor_with_text(text: &str) -> (Editor, Shared<Vec<QueryCall>>, Shared<Vec<String>>) {
    editor_with(text, StubService::replying("world"))
}

pub fn editor_with_providers(
    text: &str,
    shortcuts: &[&str],
) -> (Editor, Shared<Vec<QueryCall>>, Shared<Vec<String>>) {
    editor_with(text, StubService::replying("world").with_providers(shortcuts))
}

fn editor_with(
    text: &str,
    service: StubService,
) -> (Editor, Shared<Vec<QueryCall>>, Shared<Vec<String>>) {
    let calls = service.calls.clone();
    let store = MemoryStore::with_text(text);
    let saves = store.saves.clone();
    (open_editor(service, store), calls, saves)
}

pub fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

pub fn ch(c: char) -> KeyEvent {
    key(KeyCode::Char(c))
}

pub fn shift(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::SHIFT)
}

pub fn ctrl(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
}

pub fn press(editor: &mut Editor, key: KeyEvent) {
    editor.handle_key(key);
}

pub fn press_all(editor: &mut Editor, keys: &[KeyEvent]) {
    for k in keys {
        editor.handle_key(*k);
    }
}
