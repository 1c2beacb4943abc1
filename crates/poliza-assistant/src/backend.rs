//! The seam between the assistant and the HTTP client.

use std::future::Future;

use poliza_backend::BackendClient;
use poliza_backend::BackendError;
use poliza_backend::policy::{
    EditPolicyRequest, EditPolicyResponse, GenerateDraftRequest, GenerateDraftResponse,
};
use poliza_backend::query::{AnswerQueryRequest, AnswerQueryResponse};
use poliza_backend::upload::UploadFile;
use poliza_core::models::upload::{DocumentType, UploadedDocumentRef};

/// The backend operations the assistant needs.
pub trait AssistantBackend: Send + Sync {
    fn answer_query(
        &self,
        request: &AnswerQueryRequest,
    ) -> impl Future<Output = Result<AnswerQueryResponse, BackendError>> + Send;

    fn edit_policy(
        &self,
        request: &EditPolicyRequest,
    ) -> impl Future<Output = Result<EditPolicyResponse, BackendError>> + Send;

    fn generate_draft(
        &self,
        request: &GenerateDraftRequest,
    ) -> impl Future<Output = Result<GenerateDraftResponse, BackendError>> + Send;

    fn upload_pdf(
        &self,
        file: UploadFile,
        document_type: DocumentType,
        description: Option<&str>,
    ) -> impl Future<Output = Result<UploadedDocumentRef, BackendError>> + Send;
}

impl AssistantBackend for BackendClient {
    fn answer_query(
        &self,
        request: &AnswerQueryRequest,
    ) -> impl Future<Output = Result<AnswerQueryResponse, BackendError>> + Send {
        BackendClient::answer_query(self, request)
    }

    fn edit_policy(
        &self,
        request: &EditPolicyRequest,
    ) -> impl Future<Output = Result<EditPolicyResponse, BackendError>> + Send {
        BackendClient::edit_policy(self, request)
    }

    fn generate_draft(
        &self,
        request: &GenerateDraftRequest,
    ) -> impl Future<Output = Result<GenerateDraftResponse, BackendError>> + Send {
        BackendClient::generate_draft(self, request)
    }

    fn upload_pdf(
        &self,
        file: UploadFile,
        document_type: DocumentType,
        description: Option<&str>,
    ) -> impl Future<Output = Result<UploadedDocumentRef, BackendError>> + Send {
        BackendClient::upload_pdf(self, file, document_type, description)
    }
}
