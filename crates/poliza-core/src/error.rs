use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid intent rule pattern `{pattern}`: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("no pending AI suggestion to resolve")]
    NoPendingSuggestion,
}
