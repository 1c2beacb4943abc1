//! Scripted in-process backend.

#![allow(dead_code)]

use std::sync::Mutex;

use poliza_assistant::backend::AssistantBackend;
use poliza_backend::BackendError;
use poliza_backend::policy::{
    EditPolicyRequest, EditPolicyResponse, GenerateDraftRequest, GenerateDraftResponse,
};
use poliza_backend::query::{AnswerQueryRequest, AnswerQueryResponse};
use poliza_backend::upload::UploadFile;
use poliza_core::models::upload::{DocumentType, UploadedDocumentRef};
use tokio::sync::Semaphore;

#[derive(Debug, Clone)]
pub enum Reply {
    Ok(&'static str),
    Missing,
    Upstream(u16, &'static str),
    Transport,
}

impl Reply {
    fn into_result(self) -> Result<Option<String>, BackendError> {
        match self {
            Reply::Ok(text) => Ok(Some(text.to_string())),
            Reply::Missing => Ok(None),
            Reply::Upstream(status, detail) => Err(BackendError::Upstream {
                status,
                detail: detail.to_string(),
            }),
            Reply::Transport => Err(BackendError::Transport("connection refused".to_string())),
        }
    }
}

pub struct MockBackend {
    pub answer: Reply,
    pub edit: Reply,
    pub draft: Reply,
    pub upload: Reply,
    pub queries: Mutex<Vec<AnswerQueryRequest>>,
    pub edits: Mutex<Vec<EditPolicyRequest>>,
    pub drafts: Mutex<Vec<GenerateDraftRequest>>,
    pub uploads: Mutex<Vec<(String, DocumentType)>>,
    pub gate: Option<Semaphore>,
}

impl Default for MockBackend {
    fn default() -> Self {
        Self {
            answer: Reply::Ok("respuesta"),
            edit: Reply::Ok("<p>editado</p>"),
            draft: Reply::Ok("<h2>borrador</h2>"),
            upload: Reply::Ok("https://files.example.com/doc.pdf"),
            queries: Mutex::default(),
            edits: Mutex::default(),
            drafts: Mutex::default(),
            uploads: Mutex::default(),
            gate: None,
        }
    }
}

impl MockBackend {
    /// Hold every request until [`MockBackend::release`] is called.
    pub fn gated(mut self) -> Self {
        self.gate = Some(Semaphore::new(0));
        self
    }

    pub fn release(&self, n: usize) {
        if let Some(gate) = &self.gate {
            gate.add_permits(n);
        }
    }

    pub fn requests(&self) -> usize {
        self.queries.lock().unwrap().len()
            + self.edits.lock().unwrap().len()
            + self.drafts.lock().unwrap().len()
            + self.uploads.lock().unwrap().len()
    }

    pub fn last_query(&self) -> AnswerQueryRequest {
        self.queries.lock().unwrap().last().cloned().unwrap()
    }

    async fn wait(&self) {
        if let Some(gate) = &self.gate {
            gate.acquire().await.unwrap().forget();
        }
    }
}

fn shape_error() -> BackendError {
    BackendError::ResponseShape("missing field".to_string())
}

impl AssistantBackend for MockBackend {
    async fn answer_query(
        &self,
        request: &AnswerQueryRequest,
    ) -> Result<AnswerQueryResponse, BackendError> {
        self.queries.lock().unwrap().push(request.clone());
        self.wait().await;
        let answer = self.answer.clone().into_result()?;
        Ok(AnswerQueryResponse { answer })
    }

    async fn edit_policy(
        &self,
        request: &EditPolicyRequest,
    ) -> Result<EditPolicyResponse, BackendError> {
        self.edits.lock().unwrap().push(request.clone());
        self.wait().await;
        let edited_policy_text = self.edit.clone().into_result()?.ok_or_else(shape_error)?;
        Ok(EditPolicyResponse { edited_policy_text })
    }

    async fn generate_draft(
        &self,
        request: &GenerateDraftRequest,
    ) -> Result<GenerateDraftResponse, BackendError> {
        self.drafts.lock().unwrap().push(request.clone());
        self.wait().await;
        let draft_text = self.draft.clone().into_result()?.ok_or_else(shape_error)?;
        Ok(GenerateDraftResponse { draft_text })
    }

    async fn upload_pdf(
        &self,
        file: UploadFile,
        document_type: DocumentType,
        _description: Option<&str>,
    ) -> Result<UploadedDocumentRef, BackendError> {
        if file.bytes.is_empty() {
            return Err(BackendError::Validation("File is required"));
        }
        self.uploads
            .lock()
            .unwrap()
            .push((file.filename.clone(), document_type));
        self.wait().await;
        let url = self.upload.clone().into_result()?.ok_or_else(shape_error)?;
        Ok(UploadedDocumentRef {
            url,
            filename: file.filename,
        })
    }
}
