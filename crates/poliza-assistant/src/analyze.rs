//! Have the backend assess a policy, either an uploaded document or policy
//! text pasted by the user.

use std::sync::Arc;

use poliza_backend::context::QueryContext;
use poliza_backend::query::AnswerQueryRequest;
use poliza_backend::upload::UploadFile;
use poliza_core::models::analysis::{AnalysisOutcome, PolicyAnalysis};
use poliza_core::models::chat::ConversationThread;
use poliza_core::models::upload::{DocumentType, UploadedDocumentRef};
use tracing::info;

use crate::backend::AssistantBackend;
use crate::chat::EMPTY_ANSWER_MESSAGE;
use crate::error::AssistantError;

pub const ANALYSIS_PROMPT: &str = "Analiza la póliza proporcionada. Responde únicamente con un objeto JSON con las claves \"score\" (entero de 0 a 100), \"strengths\", \"weaknesses\" y \"recommendations\" (listas de textos en español).";

pub struct PolicyAnalyzer<B> {
    backend: Arc<B>,
    thread: Option<ConversationThread>,
    document: Option<UploadedDocumentRef>,
}

impl<B: AssistantBackend> PolicyAnalyzer<B> {
    pub fn new(backend: Arc<B>, thread: Option<ConversationThread>) -> Self {
        Self {
            backend,
            thread,
            document: None,
        }
    }

    pub fn document(&self) -> Option<&UploadedDocumentRef> {
        self.document.as_ref()
    }

    /// Upload a document. It replaces any previously uploaded one; a failed
    /// upload keeps the previous one.
    pub async fn upload(
        &mut self,
        file: UploadFile,
        document_type: DocumentType,
        description: Option<&str>,
    ) -> Result<&UploadedDocumentRef, AssistantError> {
        let stored = self
            .backend
            .upload_pdf(file, document_type, description)
            .await?;
        info!(url = %stored.url, "analysis document replaced");
        Ok(self.document.insert(stored))
    }

    /// Ask for a structured assessment of the uploaded document.
    pub async fn analyze(&self) -> Result<AnalysisOutcome, AssistantError> {
        let context = self.document_context()?;
        self.assess(&context).await
    }

    /// Ask for a structured assessment of pasted policy text. No upload is
    /// needed and any uploaded document is left out of the request.
    pub async fn analyze_text(&self, text: &str) -> Result<AnalysisOutcome, AssistantError> {
        let context = text_context(text)?;
        self.assess(&context).await
    }

    /// Ask a free-form question about the uploaded document.
    pub async fn ask(&self, question: &str) -> Result<String, AssistantError> {
        let context = self.document_context()?;
        self.answer(question, &context).await
    }

    /// Ask a free-form question about pasted policy text.
    pub async fn ask_about_text(
        &self,
        text: &str,
        question: &str,
    ) -> Result<String, AssistantError> {
        let context = text_context(text)?;
        self.answer(question, &context).await
    }

    fn document_context(&self) -> Result<QueryContext, AssistantError> {
        let document = self.document.clone().ok_or(AssistantError::NoDocument)?;
        Ok(QueryContext::none().with_document(document))
    }

    async fn assess(&self, context: &QueryContext) -> Result<AnalysisOutcome, AssistantError> {
        let answer = self.query(ANALYSIS_PROMPT, context).await?;
        let outcome = PolicyAnalysis::from_answer(answer.as_deref().unwrap_or_default());
        if let AnalysisOutcome::Structured(analysis) = &outcome {
            info!(score = analysis.score, "analysis decoded");
        }
        Ok(outcome)
    }

    async fn answer(
        &self,
        question: &str,
        context: &QueryContext,
    ) -> Result<String, AssistantError> {
        let answer = self.query(question, context).await?;
        Ok(answer.unwrap_or_else(|| EMPTY_ANSWER_MESSAGE.to_string()))
    }

    async fn query(
        &self,
        query: &str,
        context: &QueryContext,
    ) -> Result<Option<String>, AssistantError> {
        let request = AnswerQueryRequest::new(query, self.thread, context);
        let response = self.backend.answer_query(&request).await?;
        Ok(response.text().map(str::to_string))
    }
}

fn text_context(text: &str) -> Result<QueryContext, AssistantError> {
    let context = QueryContext::none().with_policy_text(text);
    if context.is_empty() {
        return Err(AssistantError::EmptyPolicyText);
    }
    Ok(context)
}
