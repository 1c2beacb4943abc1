//! The policy editor: one document under review plus the chat beside it.
//!
//! Every submitted message is classified. Drafting and editing requests go
//! to their own endpoints and the result enters review; questions go to the
//! chat with the current document attached. A failed request leaves the
//! document exactly as it was.

use std::sync::Arc;

use poliza_backend::context::QueryContext;
use poliza_backend::policy::{EditPolicyRequest, GenerateDraftRequest};
use poliza_core::document::{AnnotatedDocument, ChangeSummary};
use poliza_core::error::CoreError;
use poliza_core::intent::{Classification, Intent, IntentClassifier};
use poliza_core::models::chat::{ChatMessage, ConversationThread};
use poliza_core::models::policy::{NEW_POLICY_HTML, PolicySummary};
use poliza_core::review::{ReviewState, ReviewWorkflow};
use tracing::{info, warn};

use crate::backend::AssistantBackend;
use crate::chat::{ChatSession, Welcome, failure_message};

const DRAFT_READY_MESSAGE: &str =
    "He generado un borrador de póliza. Revisa los cambios resaltados y acéptalos o recházalos.";
const EDIT_READY_MESSAGE: &str = "He aplicado los cambios solicitados. Las adiciones aparecen resaltadas en verde y las eliminaciones en rojo; acéptalos o recházalos.";
const NO_CHANGES_MESSAGE: &str = "La propuesta no introduce cambios en la póliza.";

/// What the editor opens on.
#[derive(Debug, Clone)]
pub enum Opening {
    NewPolicy,
    Existing { title: String, text: String },
}

impl Opening {
    pub fn policy(summary: &PolicySummary) -> Self {
        Opening::Existing {
            title: summary.title.clone(),
            text: summary.starter_document(),
        }
    }
}

/// The outcome of one submitted message.
#[derive(Debug, Clone)]
pub struct EditorReply {
    pub classification: Classification,
    pub message: ChatMessage,
    pub state: ReviewState,
}

pub struct PolicyEditor<B> {
    backend: Arc<B>,
    classifier: IntentClassifier,
    review: ReviewWorkflow,
    chat: ChatSession<B>,
}

impl<B: AssistantBackend> PolicyEditor<B> {
    pub fn open(
        backend: Arc<B>,
        classifier: IntentClassifier,
        thread: Option<ConversationThread>,
        opening: Opening,
    ) -> Self {
        let (text, welcome) = match opening {
            Opening::NewPolicy => (NEW_POLICY_HTML.to_string(), Welcome::NewPolicy),
            Opening::Existing { title, text } => (text, Welcome::Policy { title }),
        };
        Self {
            chat: ChatSession::new(backend.clone(), thread, welcome),
            backend,
            classifier,
            review: ReviewWorkflow::new(text),
        }
    }

    pub fn document(&self) -> &str {
        self.review.live()
    }

    pub fn annotated(&self) -> AnnotatedDocument {
        self.review.annotated()
    }

    pub fn review(&self) -> &ReviewWorkflow {
        &self.review
    }

    pub fn chat(&self) -> &ChatSession<B> {
        &self.chat
    }

    pub async fn messages(&self) -> Vec<ChatMessage> {
        self.chat.messages().await
    }

    /// Route one message. Blank input is ignored.
    pub async fn submit(&mut self, text: &str) -> Option<EditorReply> {
        if text.trim().is_empty() {
            return None;
        }
        let classification = self.classifier.explain(text);
        info!(intent = ?classification.intent, rule = ?classification.rule, "editor message");

        let message = match classification.intent {
            Intent::Qa => {
                let context = QueryContext::none().with_policy_text(self.review.live());
                self.chat.send_with(text, &context).await?
            }
            Intent::Generate => {
                let asked = self.chat.push_user(text).await;
                let request = GenerateDraftRequest {
                    prompt: text.to_string(),
                    current_policy_text: Some(self.review.live().to_string()),
                };
                let result = {
                    let _typing = self.chat.typing();
                    self.backend.generate_draft(&request).await
                };
                let reply = match result {
                    Ok(response) => self.apply(response.draft_text, DRAFT_READY_MESSAGE),
                    Err(e) => {
                        warn!(error = %e, "draft generation failed, document unchanged");
                        failure_message(&e)
                    }
                };
                self.chat.push_assistant(reply, asked).await
            }
            Intent::Edit => {
                let asked = self.chat.push_user(text).await;
                let request = EditPolicyRequest {
                    current_policy_text: self.review.live().to_string(),
                    edit_instruction: text.to_string(),
                };
                let result = {
                    let _typing = self.chat.typing();
                    self.backend.edit_policy(&request).await
                };
                let reply = match result {
                    Ok(response) => self.apply(response.edited_policy_text, EDIT_READY_MESSAGE),
                    Err(e) => {
                        warn!(error = %e, "policy edit failed, document unchanged");
                        failure_message(&e)
                    }
                };
                self.chat.push_assistant(reply, asked).await
            }
        };

        Some(EditorReply {
            classification,
            message,
            state: self.review.state(),
        })
    }

    pub fn accept(&mut self) -> Result<ChangeSummary, CoreError> {
        self.review.accept()
    }

    pub fn reject(&mut self) -> Result<(), CoreError> {
        self.review.reject()
    }

    /// Replace the document by hand. A pending suggestion is accepted first.
    pub fn replace_document(&mut self, text: impl Into<String>) {
        self.review.replace(text);
    }

    fn apply(&mut self, suggestion: String, ready: &str) -> String {
        if suggestion == self.review.live() {
            return NO_CHANGES_MESSAGE.to_string();
        }
        self.review.propose(suggestion);
        ready.to_string()
    }
}
