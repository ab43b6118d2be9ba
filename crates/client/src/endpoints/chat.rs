//! AI-chat endpoints
//!
//! Conversations with the platform's study assistant. The client only
//! transports messages; generation happens server-side.

use serde::{Deserialize, Serialize};
use tracing::instrument;

use campushub_domain::ChatMessage;

use crate::api::{ApiClient, ApiError, QueryPairs};

/// Conversation summary row
#[derive(Debug, Clone, Deserialize)]
pub struct Conversation {
    pub id: String,
    #[serde(default)]
    pub topic: Option<String>,
    #[serde(default)]
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Debug, Serialize)]
struct StartConversationRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    topic: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    content: &'a str,
}

impl ApiClient {
    /// The signed-in user's conversations, most recent first.
    pub async fn chat_conversations(&self) -> Result<Vec<Conversation>, ApiError> {
        self.get("/chat/conversations").await
    }

    /// Messages of one conversation, oldest first.
    pub async fn chat_messages(
        &self,
        conversation_id: &str,
        limit: Option<u32>,
        after: Option<&str>,
    ) -> Result<Vec<ChatMessage>, ApiError> {
        let mut query = QueryPairs::new();
        query.push_opt_display("limit", limit).push_opt("after", after);
        self.get_with(&format!("/chat/conversations/{}/messages", conversation_id), query).await
    }

    /// Open a new conversation.
    pub async fn chat_start_conversation(
        &self,
        topic: Option<&str>,
    ) -> Result<Conversation, ApiError> {
        self.post("/chat/conversations", &StartConversationRequest { topic }).await
    }

    /// Send a message; the reply is the assistant's message.
    #[instrument(skip(self, content))]
    pub async fn chat_send_message(
        &self,
        conversation_id: &str,
        content: &str,
    ) -> Result<ChatMessage, ApiError> {
        self.post(
            &format!("/chat/conversations/{}/messages", conversation_id),
            &SendMessageRequest { content },
        )
        .await
    }

    /// Delete a conversation and its history.
    pub async fn chat_delete_conversation(&self, conversation_id: &str) -> Result<(), ApiError> {
        let _: Option<serde_json::Value> =
            self.delete(&format!("/chat/conversations/{}", conversation_id)).await?;
        Ok(())
    }
}
