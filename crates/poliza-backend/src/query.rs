use poliza_core::models::chat::ConversationThread;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::client::{BackendClient, routes};
use crate::context::QueryContext;
use crate::error::BackendError;

#[derive(Debug, Clone, Serialize)]
pub struct AnswerQueryRequest {
    pub query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thread_id: Option<ConversationThread>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_policy_text: Option<String>,
}

impl AnswerQueryRequest {
    pub fn new(
        query: impl Into<String>,
        thread_id: Option<ConversationThread>,
        context: &QueryContext,
    ) -> Self {
        Self {
            query: query.into(),
            thread_id,
            document_url: context.document_url().map(str::to_string),
            current_policy_text: context.current_policy_text.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnswerQueryResponse {
    #[serde(default)]
    pub answer: Option<String>,
}

impl AnswerQueryResponse {
    /// The answer text, `None` when missing or blank.
    pub fn text(&self) -> Option<&str> {
        self.answer.as_deref().filter(|a| !a.trim().is_empty())
    }
}

impl BackendClient {
    pub async fn answer_query(
        &self,
        request: &AnswerQueryRequest,
    ) -> Result<AnswerQueryResponse, BackendError> {
        if request.query.trim().is_empty() {
            return Err(BackendError::Validation("Query is required"));
        }
        info!(
            thread_id = ?request.thread_id.map(|t| t.id()),
            has_document = request.document_url.is_some(),
            has_policy = request.current_policy_text.is_some(),
            "answering query"
        );
        self.post_json(routes::ANSWER_QUERY, request).await
    }
}
