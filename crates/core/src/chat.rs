//! Style-consultant chat transcript.
//!
//! The advisor itself is stateless; the transcript is what the visitor sees.
//! Each submission takes a [`Ticket`]. Only the reply for the newest ticket is
//! appended: if a visitor sends a second message before the first reply
//! arrives, the late reply to the first message is dropped instead of being
//! appended after the second question.

use serde::{Deserialize, Serialize};

/// Opening line shown when the chat is first opened.
pub const GREETING: &str = "Assalamu alaikum! I am the style consultant at Noor Panjabi House. \
I can help you find the perfect panjabi for Eid, a wedding, Jummah or everyday wear. \
What occasion are you dressing for?";

/// Who wrote a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatRole {
    User,
    Model,
}

/// One turn in the transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub text: String,
}

impl ChatMessage {
    /// Whether the visitor wrote this message.
    #[must_use]
    pub fn is_user(&self) -> bool {
        self.role == ChatRole::User
    }
}

/// Handle for one outstanding advisor request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket(u64);

/// Result of applying a reply to the transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settlement {
    /// The reply was appended.
    Appended,
    /// A newer message was sent meanwhile; the reply was discarded.
    Stale,
}

/// The visible conversation plus request sequencing state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transcript {
    messages: Vec<ChatMessage>,
    next_ticket: u64,
    pending: Option<Ticket>,
}

impl Default for Transcript {
    fn default() -> Self {
        Self::new()
    }
}

impl Transcript {
    /// A transcript holding only the greeting.
    #[must_use]
    pub fn new() -> Self {
        Self {
            messages: vec![ChatMessage {
                role: ChatRole::Model,
                text: GREETING.to_string(),
            }],
            next_ticket: 0,
            pending: None,
        }
    }

    /// Append the visitor's message and start waiting for a reply.
    ///
    /// Returns `None` for a blank message, which is ignored.
    pub fn submit(&mut self, text: &str) -> Option<Ticket> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        self.messages.push(ChatMessage {
            role: ChatRole::User,
            text: text.to_string(),
        });
        let ticket = Ticket(self.next_ticket);
        self.next_ticket += 1;
        self.pending = Some(ticket);
        Some(ticket)
    }

    /// Append the advisor's reply for `ticket` if it is still the newest request.
    pub fn settle(&mut self, ticket: Ticket, reply: String) -> Settlement {
        if self.pending != Some(ticket) {
            return Settlement::Stale;
        }
        self.pending = None;
        self.messages.push(ChatMessage {
            role: ChatRole::Model,
            text: reply,
        });
        Settlement::Appended
    }

    /// Whether a reply is outstanding (the "typing" indicator).
    #[must_use]
    pub const fn is_waiting(&self) -> bool {
        self.pending.is_some()
    }

    /// Messages in order.
    #[must_use]
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(t: &Transcript) -> Vec<&str> {
        t.messages().iter().map(|m| m.text.as_str()).collect()
    }

    #[test]
    fn test_new_transcript_greets() {
        let t = Transcript::new();
        assert_eq!(t.messages().len(), 1);
        assert_eq!(t.messages()[0].role, ChatRole::Model);
        assert!(!t.is_waiting());
    }

    #[test]
    fn test_blank_message_ignored() {
        let mut t = Transcript::new();
        assert!(t.submit("   \n").is_none());
        assert_eq!(t.messages().len(), 1);
        assert!(!t.is_waiting());
    }

    #[test]
    fn test_submit_then_settle() {
        let mut t = Transcript::new();
        let ticket = t.submit("  What suits a wedding? ").expect("ticket");
        assert!(t.is_waiting());
        assert_eq!(t.settle(ticket, "Deep emerald silk.".to_string()), Settlement::Appended);
        assert!(!t.is_waiting());
        assert_eq!(
            texts(&t)[1..],
            ["What suits a wedding?", "Deep emerald silk."]
        );
        assert!(t.messages()[1].is_user());
    }

    #[test]
    fn test_stale_reply_discarded() {
        let mut t = Transcript::new();
        let first = t.submit("Eid?").expect("ticket");
        let second = t.submit("Actually, a wedding").expect("ticket");

        assert_eq!(t.settle(second, "Emerald for the wedding.".to_string()), Settlement::Appended);
        assert_eq!(t.settle(first, "Cream for Eid.".to_string()), Settlement::Stale);

        assert_eq!(
            texts(&t)[1..],
            ["Eid?", "Actually, a wedding", "Emerald for the wedding."]
        );
    }

    #[test]
    fn test_reply_to_settled_ticket_discarded() {
        let mut t = Transcript::new();
        let ticket = t.submit("Jummah").expect("ticket");
        assert_eq!(t.settle(ticket, "White cotton.".to_string()), Settlement::Appended);
        assert_eq!(t.settle(ticket, "Again".to_string()), Settlement::Stale);
        assert_eq!(t.messages().len(), 3);
    }
}
