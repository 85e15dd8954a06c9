//! Collaborator interfaces for query dispatch and transcript storage.

use anyhow::Result;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Conversation identifier
pub type ConversationId = u64;

/// Backend descriptor shown in the provider selector and status line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderInfo {
    pub name: String,
    pub shortcut: String,
}

impl ProviderInfo {
    pub fn new(name: impl Into<String>, shortcut: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            shortcut: shortcut.into(),
        }
    }
}

/// Author of a transcript message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One query or response exchanged with a provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    /// Shortcut of the provider the message was exchanged with
    pub provider: String,
    pub content: String,
    pub created_at: DateTime<Local>,
}

impl Message {
    pub fn new(role: Role, provider: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role,
            provider: provider.into(),
            content: content.into(),
            created_at: Local::now(),
        }
    }
}

/// Answers queries on behalf of a language-model backend.
///
/// Errors are reported to the user as status text; implementations must
/// tolerate being called again after a failure.
pub trait QueryService {
    /// Send `query` to the provider identified by `shortcut`.
    ///
    /// `context` is the full transcript text at the time of the call.
    fn handle(
        &mut self,
        shortcut: &str,
        query: &str,
        conversation_id: ConversationId,
        context: &str,
    ) -> Result<String>;

    /// Ordered provider directory
    fn providers(&self) -> Vec<ProviderInfo>;
}

/// Loads and stores transcript text per conversation
pub trait PersistenceGateway {
    fn load_context(&self, conversation_id: ConversationId) -> Result<String>;

    fn save_context(&mut self, conversation_id: ConversationId, text: &str) -> Result<()>;

    /// Append exchanged messages to the conversation history
    fn record_messages(
        &mut self,
        _conversation_id: ConversationId,
        _messages: &[Message],
    ) -> Result<()> {
        Ok(())
    }
}
