use crate::api::client::ApiClient;
use crate::api::mock;
use crate::domain::model::{ChatMessage, ChatReply};
use crate::domain::ports::ChatService;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Method;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    message: &'a str,
    history: &'a [ChatMessage],
    timestamp: DateTime<Utc>,
}

/// Entry point of the AI assistant.
#[derive(Debug, Clone)]
pub struct Orchestrator {
    client: ApiClient,
}

impl Orchestrator {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ChatService for Orchestrator {
    async fn chat(&self, message: &str, history: &[ChatMessage]) -> ChatReply {
        let request = ChatRequest {
            message,
            history,
            timestamp: Utc::now(),
        };

        self.client
            .fetch_or(
                "chat",
                || self.client.send_json(Method::POST, "/chat", &request),
                || mock::chat_reply(message),
            )
            .await
    }
}
