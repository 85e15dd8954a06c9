//! Transcript persistence for gottem.
//!
//! Each conversation is stored under one directory as two files:
//! - `<id>.txt` - the transcript text exactly as the editor serialized it
//! - `<id>.history.toml` - the message history, appended after each query
//!
//! [`ScratchStore`] keeps conversations in memory for sessions without a
//! usable data directory.

use anyhow::{Context, Result};
use gottem_core::{ConversationId, Message, PersistenceGateway};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Serialized message history
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct History {
    #[serde(default)]
    messages: Vec<Message>,
}

/// File-backed transcript store
#[derive(Debug, Clone)]
pub struct TranscriptStore {
    dir: PathBuf,
}

impl TranscriptStore {
    /// Create a store rooted at `dir`; the directory is created on first save
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Get the path to the transcript file for a conversation
    pub fn transcript_path(&self, conversation_id: ConversationId) -> PathBuf {
        self.dir.join(format!("{}.txt", conversation_id))
    }

    /// Get the path to the message history file for a conversation
    pub fn history_path(&self, conversation_id: ConversationId) -> PathBuf {
        self.dir.join(format!("{}.history.toml", conversation_id))
    }

    /// Load the message history; a missing file is an empty history
    pub fn load_messages(&self, conversation_id: ConversationId) -> Result<Vec<Message>> {
        let path = self.history_path(conversation_id);
        if !path.exists() {
            return Ok(Vec::new());
        }
        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read history file: {}", path.display()))?;
        let history: History = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse history file: {}", path.display()))?;
        Ok(history.messages)
    }

    fn ensure_dir(&self) -> Result<()> {
        fs::create_dir_all(&self.dir).with_context(|| {
            format!(
                "Failed to create transcript directory: {}",
                self.dir.display()
            )
        })
    }
}

impl PersistenceGateway for TranscriptStore {
    fn load_context(&self, conversation_id: ConversationId) -> Result<String> {
        let path = self.transcript_path(conversation_id);
        if !path.exists() {
            return Ok(String::new());
        }
        fs::read_to_string(&path)
            .with_context(|| format!("Failed to read transcript file: {}", path.display()))
    }

    fn save_context(&mut self, conversation_id: ConversationId, text: &str) -> Result<()> {
        self.ensure_dir()?;
        let path = self.transcript_path(conversation_id);
        fs::write(&path, text)
            .with_context(|| format!("Failed to write transcript file: {}", path.display()))
    }

    fn record_messages(
        &mut self,
        conversation_id: ConversationId,
        messages: &[Message],
    ) -> Result<()> {
        if messages.is_empty() {
            return Ok(());
        }
        self.ensure_dir()?;

        let mut history = History {
            messages: self.load_messages(conversation_id)?,
        };
        history.messages.extend_from_slice(messages);

        let path = self.history_path(conversation_id);
        let contents = toml::to_string_pretty(&history).context("Failed to serialize history")?;
        fs::write(&path, contents)
            .with_context(|| format!("Failed to write history file: {}", path.display()))
    }
}

/// Store that lives only as long as the process
#[derive(Debug, Default)]
pub struct ScratchStore {
    transcripts: HashMap<ConversationId, String>,
    histories: HashMap<ConversationId, Vec<Message>>,
}

impl ScratchStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self, conversation_id: ConversationId) -> &[Message] {
        self.histories
            .get(&conversation_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

impl PersistenceGateway for ScratchStore {
    fn load_context(&self, conversation_id: ConversationId) -> Result<String> {
        Ok(self
            .transcripts
            .get(&conversation_id)
            .cloned()
            .unwrap_or_default())
    }

    fn save_context(&mut self, conversation_id: ConversationId, text: &str) -> Result<()> {
        self.transcripts.insert(conversation_id, text.to_string());
        Ok(())
    }

    fn record_messages(
        &mut self,
        conversation_id: ConversationId,
        messages: &[Message],
    ) -> Result<()> {
        self.histories
            .entry(conversation_id)
            .or_default()
            .extend_from_slice(messages);
        Ok(())
    }
}
