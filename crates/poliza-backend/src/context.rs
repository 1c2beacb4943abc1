//! Context attached to a question.
//!
//! A question can be asked about an uploaded document, about the policy
//! currently open in the editor, or both. The caller owns both pieces and
//! passes them down per request; nothing here is retained.

use poliza_core::models::upload::UploadedDocumentRef;

#[derive(Debug, Clone, Default)]
pub struct QueryContext {
    pub document: Option<UploadedDocumentRef>,
    pub current_policy_text: Option<String>,
}

impl QueryContext {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn with_document(mut self, document: UploadedDocumentRef) -> Self {
        self.document = Some(document);
        self
    }

    /// Attach the open policy. Blank text is treated as absent.
    pub fn with_policy_text(mut self, text: impl Into<String>) -> Self {
        let text = text.into();
        self.current_policy_text = (!text.trim().is_empty()).then_some(text);
        self
    }

    pub fn document_url(&self) -> Option<&str> {
        self.document.as_ref().map(|d| d.url.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.document.is_none() && self.current_policy_text.is_none()
    }
}
