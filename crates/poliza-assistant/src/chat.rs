//! A chat session bound to one conversation thread.
//!
//! `send` takes `&self`, so a caller may have several sends in flight. The
//! log is appended in arrival order; every assistant reply records the
//! sequence number of the user message it answers in `reply_to`. The typing
//! indicator is a count of outstanding requests, lowered by a guard on every
//! exit path.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use poliza_backend::BackendError;
use poliza_backend::context::QueryContext;
use poliza_backend::query::AnswerQueryRequest;
use poliza_core::models::chat::{ChatMessage, ConversationThread};
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::backend::AssistantBackend;

pub const CONFIG_ERROR_MESSAGE: &str =
    "Lo siento, ocurrió un error de configuración. Por favor, recarga la página.";
pub const EMPTY_ANSWER_MESSAGE: &str = "No se recibió respuesta del asistente.";
pub const CONNECTION_ERROR_MESSAGE: &str =
    "Lo siento, no pude conectar con el asistente. Intenta de nuevo más tarde.";

/// How a session greets the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Welcome {
    General,
    NewPolicy,
    Policy { title: String },
    Custom(String),
}

impl Welcome {
    pub fn text(&self) -> String {
        match self {
            Welcome::General => "¡Hola! Soy tu asistente AI. ¿En qué puedo ayudarte hoy?".to_string(),
            Welcome::NewPolicy => "¡Hola! Soy tu asistente de pólizas. Estoy aquí para ayudarte a crear una nueva póliza de seguro personalizada. ¿Qué tipo de cobertura estás buscando?".to_string(),
            Welcome::Policy { title } => format!(
                "¡Hola! Soy tu asistente para la póliza \"{title}\". Puedo ayudarte a analizar, explicar o modificar esta póliza. ¿En qué puedo ayudarte hoy?"
            ),
            Welcome::Custom(text) => text.clone(),
        }
    }
}

/// The assistant text shown for a failed request.
pub fn failure_message(error: &BackendError) -> String {
    match error {
        BackendError::Transport(_) => CONNECTION_ERROR_MESSAGE.to_string(),
        other => format!("Error: {}", other.detail()),
    }
}

pub struct ChatSession<B> {
    backend: Arc<B>,
    thread: Option<ConversationThread>,
    log: Mutex<Vec<ChatMessage>>,
    next_seq: AtomicU64,
    pending: AtomicUsize,
}

impl<B: AssistantBackend> ChatSession<B> {
    /// Open a session. The log starts with the welcome message.
    pub fn new(backend: Arc<B>, thread: Option<ConversationThread>, welcome: Welcome) -> Self {
        let greeting = ChatMessage::assistant(0, welcome.text(), None);
        Self {
            backend,
            thread,
            log: Mutex::new(vec![greeting]),
            next_seq: AtomicU64::new(1),
            pending: AtomicUsize::new(0),
        }
    }

    pub fn thread(&self) -> Option<ConversationThread> {
        self.thread
    }

    /// Whether any request from this session is still outstanding.
    pub fn is_typing(&self) -> bool {
        self.pending.load(Ordering::SeqCst) > 0
    }

    pub async fn messages(&self) -> Vec<ChatMessage> {
        self.log.lock().await.clone()
    }

    /// Ask a question with no extra context.
    pub async fn send(&self, text: &str) -> Option<ChatMessage> {
        self.send_with(text, &QueryContext::none()).await
    }

    /// Append the user's message, ask the backend, and append the reply.
    ///
    /// Returns the assistant message that was appended, or `None` when the
    /// input was blank and nothing happened.
    pub async fn send_with(&self, text: &str, context: &QueryContext) -> Option<ChatMessage> {
        if text.trim().is_empty() {
            return None;
        }
        let asked = self.push_user(text).await;

        let Some(thread) = self.thread else {
            warn!("chat send without a conversation thread");
            return Some(self.push_assistant(CONFIG_ERROR_MESSAGE, asked).await);
        };

        let reply = {
            let _typing = self.typing();
            let request = AnswerQueryRequest::new(text, Some(thread), context);
            match self.backend.answer_query(&request).await {
                Ok(response) => response.text().unwrap_or(EMPTY_ANSWER_MESSAGE).to_string(),
                Err(e) => {
                    warn!(thread_id = %thread, error = %e, "answer_query failed");
                    failure_message(&e)
                }
            }
        };

        info!(thread_id = %thread, reply_to = asked, "assistant replied");
        Some(self.push_assistant(reply, asked).await)
    }

    /// Append a user message and return its sequence number.
    pub(crate) async fn push_user(&self, text: &str) -> u64 {
        let mut log = self.log.lock().await;
        let seq = self.next_seq.fetch_add(1, Ordering::SeqCst);
        log.push(ChatMessage::user(seq, text));
        seq
    }

    pub(crate) async fn push_assistant(
        &self,
        text: impl Into<String>,
        reply_to: u64,
    ) -> ChatMessage {
        let mut log = self.log.lock().await;
        let seq = self.next_seq.fetch_add(1, Ordering::SeqCst);
        let message = ChatMessage::assistant(seq, text, Some(reply_to));
        log.push(message.clone());
        message
    }

    /// Raise the typing indicator until the returned guard drops.
    pub(crate) fn typing(&self) -> TypingGuard<'_> {
        self.pending.fetch_add(1, Ordering::SeqCst);
        TypingGuard {
            pending: &self.pending,
        }
    }
}

pub(crate) struct TypingGuard<'a> {
    pending: &'a AtomicUsize,
}

impl Drop for TypingGuard<'_> {
    fn drop(&mut self) {
        self.pending.fetch_sub(1, Ordering::SeqCst);
    }
}
