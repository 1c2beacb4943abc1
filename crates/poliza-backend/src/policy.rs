use serde::{Deserialize, Serialize};
use tracing::info;

use crate::client::{BackendClient, routes};
use crate::error::BackendError;

#[derive(Debug, Clone, Serialize)]
pub struct EditPolicyRequest {
    pub current_policy_text: String,
    pub edit_instruction: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EditPolicyResponse {
    pub edited_policy_text: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct GenerateDraftRequest {
    pub prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_policy_text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GenerateDraftResponse {
    pub draft_text: String,
}

impl BackendClient {
    /// Ask for an edited version of the policy. The result carries
    /// `<ins>`/`<del>` markers against `current_policy_text`.
    pub async fn edit_policy(
        &self,
        request: &EditPolicyRequest,
    ) -> Result<EditPolicyResponse, BackendError> {
        if request.current_policy_text.trim().is_empty()
            || request.edit_instruction.trim().is_empty()
        {
            return Err(BackendError::Validation(
                "Current policy text and edit instruction are required",
            ));
        }
        info!(
            policy_len = request.current_policy_text.len(),
            "requesting policy edit"
        );
        self.post_json(routes::EDIT_POLICY, request).await
    }

    pub async fn generate_draft(
        &self,
        request: &GenerateDraftRequest,
    ) -> Result<GenerateDraftResponse, BackendError> {
        if request.prompt.trim().is_empty() {
            return Err(BackendError::Validation("Prompt is required"));
        }
        info!(
            has_policy = request.current_policy_text.is_some(),
            "requesting policy draft"
        );
        self.post_json(routes::GENERATE_DRAFT, request).await
    }
}
