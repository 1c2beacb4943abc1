use thiserror::Error;

#[derive(Debug, Error)]
pub enum BackendError {
    /// A required request field was missing; nothing was sent.
    #[error("{0}")]
    Validation(&'static str),

    #[error("backend returned {status}: {detail}")]
    Upstream { status: u16, detail: String },

    #[error("could not reach the backend: {0}")]
    Transport(String),

    #[error("unexpected response from backend: {0}")]
    ResponseShape(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("backend config error: {0}")]
    Config(String),
}

impl BackendError {
    /// The text shown to the user: the upstream detail when the backend
    /// supplied one, the full error otherwise.
    pub fn detail(&self) -> String {
        match self {
            BackendError::Upstream { detail, .. } => detail.clone(),
            other => other.to_string(),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            BackendError::Upstream { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for BackendError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            BackendError::ResponseShape(e.to_string())
        } else {
            BackendError::Transport(e.to_string())
        }
    }
}
