use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A document stored by the backend's upload endpoint.
///
/// Held by the analysis flow and handed to chat requests as read-only
/// context. A new upload replaces it wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct UploadedDocumentRef {
    pub url: String,
    pub filename: String,
}

/// Document categories accepted by the upload endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum DocumentType {
    Policy,
    Claim,
    Contract,
    Other,
}

impl DocumentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentType::Policy => "policy",
            DocumentType::Claim => "claim",
            DocumentType::Contract => "contract",
            DocumentType::Other => "other",
        }
    }
}
