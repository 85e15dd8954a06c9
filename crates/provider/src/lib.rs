//! Provider directory and query routing for gottem.
//!
//! A [`ProviderRegistry`] keeps backends in registration order and routes
//! each query to the one registered under the requested shortcut.

use anyhow::{bail, Result};
use gottem_core::{ConversationId, ProviderInfo, QueryService};

/// A language-model backend
pub trait LlmClient {
    /// Answer `query` given the full transcript `context`
    fn complete(&self, query: &str, context: &str) -> Result<String>;
}

/// Offline backend that answers with the query uppercased
#[derive(Debug, Clone)]
pub struct EchoClient {
    name: String,
}

impl EchoClient {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl LlmClient for EchoClient {
    fn complete(&self, query: &str, _context: &str) -> Result<String> {
        Ok(format!("Response from {}: {}", self.name, query.to_uppercase()))
    }
}

struct Entry {
    info: ProviderInfo,
    client: Box<dyn LlmClient>,
}

/// Ordered set of providers keyed by shortcut
#[derive(Default)]
pub struct ProviderRegistry {
    entries: Vec<Entry>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the built-in offline provider
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register("Mock", "m", EchoClient::new("Mock"));
        registry
    }

    /// Add a provider; a repeated shortcut replaces the earlier client in place
    pub fn register(
        &mut self,
        name: impl Into<String>,
        shortcut: impl Into<String>,
        client: impl LlmClient + 'static,
    ) {
        let info = ProviderInfo::new(name, shortcut);
        let client: Box<dyn LlmClient> = Box::new(client);

        match self
            .entries
            .iter_mut()
            .find(|entry| entry.info.shortcut == info.shortcut)
        {
            Some(entry) => {
                entry.info = info;
                entry.client = client;
            }
            None => self.entries.push(Entry { info, client }),
        }
    }

}

impl QueryService for ProviderRegistry {
    fn handle(
        &mut self,
        shortcut: &str,
        query: &str,
        _conversation_id: ConversationId,
        context: &str,
    ) -> Result<String> {
        let Some(entry) = self
            .entries
            .iter()
            .find(|entry| entry.info.shortcut == shortcut)
        else {
            bail!("no provider registered for shortcut '{}'", shortcut);
        };
        entry.client.complete(query, context)
    }

    fn providers(&self) -> Vec<ProviderInfo> {
        self.entries.iter().map(|entry| entry.info.clone()).collect()
    }
}
