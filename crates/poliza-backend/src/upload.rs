//! PDF upload over multipart.

use std::path::Path;

use poliza_core::models::upload::{DocumentType, UploadedDocumentRef};
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use tracing::info;

use crate::client::{BackendClient, read_json, routes};
use crate::error::BackendError;

/// A file to upload, already read into memory.
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub async fn from_path(path: &Path) -> Result<Self, BackendError> {
        let bytes = tokio::fs::read(path).await?;
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "document.pdf".to_string());
        Ok(Self { filename, bytes })
    }
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    document: Option<StoredDocument>,
}

#[derive(Debug, Deserialize)]
struct StoredDocument {
    url: Option<String>,
    filename: Option<String>,
    original_filename: Option<String>,
}

impl BackendClient {
    /// Upload a document and return the backend's reference to it.
    ///
    /// The backend names the stored file either `filename` or
    /// `original_filename`; the uploaded name is used when it sends neither.
    pub async fn upload_pdf(
        &self,
        file: UploadFile,
        document_type: DocumentType,
        description: Option<&str>,
    ) -> Result<UploadedDocumentRef, BackendError> {
        if file.bytes.is_empty() {
            return Err(BackendError::Validation("File is required"));
        }

        let mime = mime_guess::from_path(&file.filename).first_or_octet_stream();
        let uploaded_name = file.filename.clone();
        let size = file.bytes.len();
        let part = Part::bytes(file.bytes)
            .file_name(file.filename)
            .mime_str(mime.essence_str())?;

        let mut form = Form::new()
            .part("file", part)
            .text("document_type", document_type.as_str());
        if let Some(description) = description.filter(|d| !d.trim().is_empty()) {
            form = form.text("description", description.to_string());
        }

        info!(
            filename = %uploaded_name,
            size,
            document_type = document_type.as_str(),
            "uploading document"
        );
        let response = self.post(routes::UPLOAD_PDF).multipart(form).send().await?;
        let body: UploadResponse = read_json(routes::UPLOAD_PDF, response).await?;

        let stored = body.document.ok_or_else(|| {
            BackendError::ResponseShape("missing `document` in upload response".into())
        })?;
        let url = stored
            .url
            .filter(|u| !u.is_empty())
            .ok_or_else(|| {
                BackendError::ResponseShape("missing `document.url` in upload response".into())
            })?;
        let filename = stored
            .filename
            .or(stored.original_filename)
            .unwrap_or(uploaded_name);

        info!(url = %url, filename = %filename, "document uploaded");
        Ok(UploadedDocumentRef { url, filename })
    }
}
