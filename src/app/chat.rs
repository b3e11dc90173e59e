use crate::domain::model::{ChatMessage, RecordId, Sender};
use crate::domain::ports::ChatService;
use chrono::Utc;

pub const GREETING: &str = "Hello! I'm your AI financial assistant. I can help you with budgets, \
                            transactions, contacts, and security alerts. How can I assist you today?";

/// A conversation with the assistant.
pub struct ChatSession<'a, S: ChatService + ?Sized> {
    service: &'a S,
    messages: Vec<ChatMessage>,
}

impl<'a, S: ChatService + ?Sized> ChatSession<'a, S> {
    pub fn new(service: &'a S) -> Self {
        Self {
            service,
            messages: Vec::new(),
        }
    }

    /// Starts the conversation with the assistant's greeting.
    pub fn with_greeting(service: &'a S) -> Self {
        let mut session = Self::new(service);
        session.messages.push(ChatMessage {
            id: 1,
            text: GREETING.to_string(),
            sender: Sender::Ai,
            timestamp: Utc::now(),
            suggestions: None,
        });
        session
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Sends `text` with the conversation so far and records the reply.
    ///
    /// Blank input is ignored and returns `None`.
    pub async fn send(&mut self, text: &str) -> Option<&ChatMessage> {
        if text.trim().is_empty() {
            return None;
        }

        let sent_at = Utc::now();
        let id: RecordId = sent_at.timestamp_millis();
        let prior = self.messages.len();
        self.messages.push(ChatMessage {
            id,
            text: text.to_string(),
            sender: Sender::User,
            timestamp: sent_at,
            suggestions: None,
        });

        let reply = self.service.chat(text, &self.messages[..prior]).await;
        self.messages.push(ChatMessage {
            id: id + 1,
            text: reply.response,
            sender: Sender::Ai,
            timestamp: Utc::now(),
            suggestions: Some(reply.suggestions),
        });
        self.messages.last()
    }
}
