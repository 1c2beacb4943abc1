use poliza_backend::BackendError;
use poliza_core::error::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AssistantError {
    #[error(transparent)]
    Backend(#[from] BackendError),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("no document uploaded")]
    NoDocument,

    #[error("policy text is empty")]
    EmptyPolicyText,
}
