//! Sending queries to the selected provider and appending the response.

use gottem_buffer::{ColorTag, Cursor};
use gottem_core::{Message, ProviderInfo, Role};

use crate::{Editor, Mode};

/// A query accepted by Ctrl+E, sent on the next loop iteration so the
/// "sending" status is painted first
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PendingQuery {
    pub provider: ProviderInfo,
    pub text: String,
}

/// Expand tabs to `tab_size` spaces
fn expand_tabs(text: &str, tab_size: usize) -> String {
    text.replace('\t', &" ".repeat(tab_size))
}

impl Editor {
    /// Text that Ctrl+E would send: the selection in Visual mode, otherwise
    /// the last non-blank line
    pub fn query_text(&self) -> Option<String> {
        if self.mode == Mode::Visual {
            if let Some(selection) = self.selection.filter(|s| !s.is_empty()) {
                return Some(self.document.text_in(selection.range()));
            }
        }
        let index = self.document.last_non_blank_line()?;
        self.document.line(index).map(|line| line.text.clone())
    }

    /// Queue a query for the selected provider
    pub(crate) fn request_query(&mut self) {
        if self.pending_query.is_some() {
            return;
        }
        let Some(provider) = self.selected_provider().cloned() else {
            self.set_error("No providers configured");
            return;
        };
        let Some(text) = self.query_text() else {
            self.set_info("Nothing to send");
            return;
        };

        self.set_info(format!("Sending to {}...", provider.name));
        self.pending_query = Some(PendingQuery { provider, text });
    }

    /// Send the queued query, if any, and apply the outcome
    pub fn dispatch_pending_query(&mut self) {
        let Some(PendingQuery { provider, text }) = self.pending_query.take() else {
            return;
        };

        let context = self.document.to_text();
        self.logger.info(format!(
            "Sending query to {} ({} chars)",
            provider.shortcut,
            text.chars().count()
        ));

        match self
            .service
            .handle(&provider.shortcut, &text, self.conversation_id, &context)
        {
            Ok(response) => self.apply_response(&provider, text, response),
            Err(e) => {
                self.logger
                    .error(format!("Query to {} failed: {:#}", provider.shortcut, e));
                self.set_error(format!("Query failed: {:#}", e));
            }
        }
    }

    /// Queue and immediately send a query
    pub fn send_query(&mut self) {
        self.request_query();
        self.dispatch_pending_query();
    }

    fn apply_response(&mut self, provider: &ProviderInfo, query: String, response: String) {
        let block = expand_tabs(&response, self.settings.tab_size);
        let first = self.document.append_block(&block, ColorTag::Response);
        if self.mode != Mode::Visual {
            self.cursor = Cursor::at(first, 0);
        }

        let messages = [
            Message::new(Role::User, provider.shortcut.as_str(), query),
            Message::new(Role::Assistant, provider.shortcut.as_str(), response),
        ];
        if let Err(e) = self
            .persistence
            .record_messages(self.conversation_id, &messages)
        {
            self.logger
                .warn(format!("Failed to record message history: {:#}", e));
        }
        self.history.extend(messages);
        self.set_info(format!("Response from {}", provider.name));

        if self.settings.save_after_query {
            if let Err(e) = self.save() {
                self.logger.error(format!("{:#}", e));
                self.set_error(format!("Save failed: {:#}", e));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::*;
    use crossterm::event::KeyCode;

    #[test]
    fn test_hello_world_scenario() {
        let (mut editor, calls, _) = editor_with_text("");
        press(&mut editor, ch('i'));
        for c in "hello".chars() {
            press(&mut editor, ch(c));
        }
        press(&mut editor, ctrl('e'));
        assert!(editor.pending_query.is_some());
        editor.dispatch_pending_query();

        let lines = editor.document().lines();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].text, "hello");
        assert_eq!(lines[0].style, ColorTag::Text);
        assert_eq!(lines[1].text, "world");
        assert_eq!(lines[1].style, ColorTag::Response);

        let calls = calls.borrow();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].shortcut, "m");
        assert_eq!(calls[0].query, "hello");
        assert_eq!(calls[0].context, "hello");
        assert_eq!(editor.cursor(), Cursor::at(1, 0));
        assert_eq!(editor.mode(), Mode::Insert);
    }

    #[test]
    fn test_sends_last_non_blank_line() {
        let (mut editor, calls, _) = editor_with_text("first\nsecond\n   \n");
        editor.send_query();
        assert_eq!(calls.borrow()[0].query, "second");
    }

    #[test]
    fn test_sends_visual_selection() {
        let (mut editor, calls, _) = editor_with_text("one two\nthree");
        press_all(&mut editor, &[ch('g'), ch('g'), ch('v'), ch('j'), ctrl('e')]);
        editor.dispatch_pending_query();
        assert_eq!(calls.borrow()[0].query, "one two\n");
        // Visual mode and selection survive the response
        assert_eq!(editor.mode(), Mode::Visual);
        assert_eq!(editor.cursor(), Cursor::at(1, 0));
        assert!(editor.selection().is_some());
    }

    #[test]
    fn test_nothing_to_send() {
        let (mut editor, calls, _) = editor_with_text("\n  \n");
        editor.send_query();
        assert!(calls.borrow().is_empty());
        assert_eq!(editor.status().map(|s| s.text.as_str()), Some("Nothing to send"));
    }

    #[test]
    fn test_no_providers() {
        let (mut editor, calls, _) = editor_with_providers("hi", &[]);
        editor.send_query();
        assert!(calls.borrow().is_empty());
        assert!(editor.status().map(|s| s.is_error).unwrap_or(false));
    }

    #[test]
    fn test_query_error_leaves_document() {
        let service = StubService::failing("connection refused");
        let calls = service.calls.clone();
        let mut editor = open_editor(service, MemoryStore::with_text("ask me"));
        editor.send_query();

        assert_eq!(calls.borrow().len(), 1);
        assert_eq!(editor.document().to_text(), "ask me");
        assert!(!editor.document().is_modified());
        assert_eq!(editor.mode(), Mode::Normal);
        let status = editor.status().cloned();
        assert!(status.as_ref().map(|s| s.is_error).unwrap_or(false));
        assert!(status
            .map(|s| s.text.contains("connection refused"))
            .unwrap_or(false));
        assert!(editor.history().is_empty());
    }

    #[test]
    fn test_response_tabs_expanded_and_multiline() {
        let service = StubService::replying("a\tb\nc");
        let mut editor = open_editor(service, MemoryStore::with_text("q"));
        editor.send_query();
        let texts: Vec<&str> = editor
            .document()
            .lines()
            .iter()
            .map(|l| l.text.as_str())
            .collect();
        assert_eq!(texts, vec!["q", "a    b", "c"]);
    }

    #[test]
    fn test_response_saved_and_recorded() {
        let store = MemoryStore::with_text("q");
        let saves = store.saves.clone();
        let recorded = store.recorded.clone();
        let mut editor = open_editor(StubService::replying("answer"), store);
        editor.send_query();

        assert_eq!(*saves.borrow(), vec!["q\nanswer".to_string()]);
        assert!(!editor.document().is_modified());

        let recorded = recorded.borrow();
        assert_eq!(recorded.len(), 2);
        assert_eq!(recorded[0].role, Role::User);
        assert_eq!(recorded[0].content, "q");
        assert_eq!(recorded[1].role, Role::Assistant);
        assert_eq!(recorded[1].content, "answer");
        assert_eq!(editor.history().len(), 2);
    }

    #[test]
    fn test_save_after_query_disabled() {
        let store = MemoryStore::with_text("q");
        let saves = store.saves.clone();
        let mut editor = open_editor(StubService::replying("answer"), store);
        editor.settings.save_after_query = false;
        editor.send_query();
        assert!(saves.borrow().is_empty());
        assert!(editor.document().is_modified());
    }

    #[test]
    fn test_save_failure_after_query_reported() {
        let mut editor = open_editor(StubService::replying("answer"), MemoryStore::failing_save("q"));
        editor.send_query();
        assert_eq!(editor.document().line_count(), 2);
        assert!(editor.status().map(|s| s.is_error).unwrap_or(false));
    }

    #[test]
    fn test_second_request_while_pending_is_ignored() {
        let (mut editor, calls, _) = editor_with_text("q");
        press_all(&mut editor, &[ctrl('e'), key(KeyCode::Esc), ctrl('e')]);
        editor.dispatch_pending_query();
        editor.dispatch_pending_query();
        assert_eq!(calls.borrow().len(), 1);
    }

    #[test]
    fn test_expand_tabs() {
        assert_eq!(expand_tabs("\tx", 2), "  x");
        assert_eq!(expand_tabs("none", 4), "none");
    }
}
