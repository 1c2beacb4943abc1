use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Longest slice of a raw answer embedded in a diagnostic.
pub const RAW_EXCERPT_CHARS: usize = 300;

/// Structured result of a policy analysis query.
///
/// The backend returns it JSON-encoded inside the `answer` string of
/// `internal/answer_query`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PolicyAnalysis {
    pub score: u8,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub weaknesses: Vec<String>,
    #[serde(default)]
    pub recommendations: Vec<String>,
}

/// What an analysis answer decoded to.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisOutcome {
    Structured(PolicyAnalysis),
    /// The answer was not a valid analysis object. Carries a message that
    /// embeds a truncated copy of the raw answer.
    Unparsed { diagnostic: String },
}

impl PolicyAnalysis {
    /// Decode an analysis from an answer string.
    ///
    /// Markdown code fences around the JSON are tolerated. Anything else
    /// that fails to decode degrades to [`AnalysisOutcome::Unparsed`].
    pub fn from_answer(answer: &str) -> AnalysisOutcome {
        let body = strip_code_fence(answer.trim());
        match serde_json::from_str::<PolicyAnalysis>(body) {
            Ok(analysis) => AnalysisOutcome::Structured(analysis),
            Err(e) => {
                tracing::warn!(error = %e, "analysis answer is not a valid analysis object");
                AnalysisOutcome::Unparsed {
                    diagnostic: format!(
                        "No se pudo interpretar el análisis ({e}). Respuesta recibida: {}",
                        truncate_chars(answer, RAW_EXCERPT_CHARS)
                    ),
                }
            }
        }
    }
}

fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    // Drop an info string such as `json` on the opening fence.
    let rest = rest.split_once('\n').map_or("", |(_, body)| body);
    rest.trim_end().strip_suffix("```").unwrap_or(rest).trim()
}

/// Truncate to at most `max` characters, marking the cut with an ellipsis.
pub fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => format!("{}…", &text[..idx]),
        None => text.to_string(),
    }
}
