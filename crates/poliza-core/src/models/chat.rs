use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// A single message in a chat session log.
///
/// Messages are appended in arrival order and never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ChatMessage {
    pub id: Uuid,
    /// Position in the session, assigned when the message is created.
    pub seq: u64,
    pub role: ChatRole,
    pub text: String,
    /// Sequence number of the user message this assistant reply answers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<u64>,
    pub timestamp: jiff::Timestamp,
}

impl ChatMessage {
    pub fn user(seq: u64, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            seq,
            role: ChatRole::User,
            text: text.into(),
            reply_to: None,
            timestamp: jiff::Timestamp::now(),
        }
    }

    pub fn assistant(seq: u64, text: impl Into<String>, reply_to: Option<u64>) -> Self {
        Self {
            id: Uuid::new_v4(),
            seq,
            role: ChatRole::Assistant,
            text: text.into(),
            reply_to,
            timestamp: jiff::Timestamp::now(),
        }
    }
}

/// Role of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ChatRole {
    User,
    Assistant,
}

/// Opaque token correlating the turns of one conversation on the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ConversationThread(Uuid);

impl ConversationThread {
    /// Start a new conversation with a random id.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn id(&self) -> Uuid {
        self.0
    }
}

impl From<Uuid> for ConversationThread {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl fmt::Display for ConversationThread {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
