//! Conversation transcript.
//!
//! Owns the ordered list of displayed messages and the transient pending
//! indicator shown while a request is in flight. Messages are append-only;
//! the only removal is a full [`Transcript::reset`].

use crate::markup::{render, Author};
use serde::Serialize;

/// Role of a transcript entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// Typed by the user.
    User,
    /// Produced by the model (or an error standing in for one).
    Assistant,
}

/// A single displayed message. Immutable once appended.
#[derive(Debug, Clone, Serialize)]
pub struct Message {
    /// Author role.
    pub role: MessageRole,
    /// Raw text content.
    pub content: String,
    /// Sanitized markup for the content, produced at append time.
    pub rendered: String,
    /// Whether this entry represents a request failure.
    pub is_error: bool,
}

/// Handle for a pending indicator. Each shown indicator gets a unique id so
/// a stale clear can never remove the wrong one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingToken(u64);

/// Ordered conversation transcript with a transient pending indicator.
#[derive(Debug, Default)]
pub struct Transcript {
    messages: Vec<Message>,
    pending: Option<PendingToken>,
    next_pending_id: u64,
}

impl Transcript {
    /// Create an empty transcript.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a user message. Escaped only, never markup-transformed.
    pub fn append_user(&mut self, text: &str) {
        self.messages.push(Message {
            role: MessageRole::User,
            content: text.to_string(),
            rendered: render(text, Author::User),
            is_error: false,
        });
    }

    /// Append an assistant message, sanitized and markup-rendered.
    pub fn append_assistant(&mut self, text: &str) {
        self.messages.push(Message {
            role: MessageRole::Assistant,
            content: text.to_string(),
            rendered: render(text, Author::Assistant),
            is_error: false,
        });
    }

    /// Append an error entry. Rendered as an assistant-role message with the
    /// error mark set; the description is escaped, never transformed.
    pub fn append_error(&mut self, detail: &str) {
        self.messages.push(Message {
            role: MessageRole::Assistant,
            content: detail.to_string(),
            rendered: render(detail, Author::User),
            is_error: true,
        });
    }

    /// Show the pending indicator, returning its handle.
    ///
    /// At most one indicator is displayed at a time; showing a new one
    /// replaces the old handle.
    pub fn show_pending(&mut self) -> PendingToken {
        self.next_pending_id += 1;
        let token = PendingToken(self.next_pending_id);
        self.pending = Some(token);
        token
    }

    /// Clear the pending indicator if `token` is the one currently shown.
    pub fn clear_pending(&mut self, token: PendingToken) {
        if self.pending == Some(token) {
            self.pending = None;
        }
    }

    /// Whether a pending indicator is currently displayed.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// All messages in insertion order.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Number of messages.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Whether the transcript is empty.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// The most recent message, if any.
    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Discard all messages and any pending indicator.
    ///
    /// Session statistics are owned elsewhere and are not touched.
    pub fn reset(&mut self) {
        self.messages.clear();
        self.pending = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insertion_order_preserved() {
        let mut transcript = Transcript::new();
        transcript.append_user("one");
        transcript.append_assistant("two");
        transcript.append_user("three");

        let contents: Vec<&str> = transcript
            .messages()
            .iter()
            .map(|m| m.content.as_str())
            .collect();
        assert_eq!(contents, vec!["one", "two", "three"]);
    }

    #[test]
    fn test_user_message_not_markup_transformed() {
        let mut transcript = Transcript::new();
        transcript.append_user("**bold** <b>");
        assert_eq!(transcript.last().unwrap().rendered, "**bold** &lt;b&gt;");
    }

    #[test]
    fn test_assistant_message_rendered() {
        let mut transcript = Transcript::new();
        transcript.append_assistant("use `cargo`");
        assert_eq!(
            transcript.last().unwrap().rendered,
            "use <code>cargo</code>"
        );
    }

    #[test]
    fn test_error_entry_marked() {
        let mut transcript = Transcript::new();
        transcript.append_error("provider unavailable");

        let last = transcript.last().unwrap();
        assert!(last.is_error);
        assert_eq!(last.role, MessageRole::Assistant);
    }

    #[test]
    fn test_pending_tokens_unique_and_exact() {
        let mut transcript = Transcript::new();
        let first = transcript.show_pending();
        let second = transcript.show_pending();
        assert_ne!(first, second);

        // A stale token must not clear the current indicator.
        transcript.clear_pending(first);
        assert!(transcript.is_pending());

        transcript.clear_pending(second);
        assert!(!transcript.is_pending());

        // Clearing twice is a no-op.
        transcript.clear_pending(second);
        assert!(!transcript.is_pending());
    }

    #[test]
    fn test_reset_clears_messages_and_pending() {
        let mut transcript = Transcript::new();
        transcript.append_user("hello");
        transcript.show_pending();

        transcript.reset();

        assert!(transcript.is_empty());
        assert!(!transcript.is_pending());
    }
}
