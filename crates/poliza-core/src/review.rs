//! Accept/reject workflow for AI-suggested policy edits.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::document::{AnnotatedDocument, ChangeSummary};
use crate::error::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewState {
    /// No suggestion is pending.
    Clean,
    /// The live document carries a suggestion awaiting accept or reject.
    Reviewing,
}

/// Owns the live policy document and the single pre-edit baseline.
///
/// Entering review again before resolving the previous suggestion
/// overwrites the baseline with the then-live document: the last
/// suggestion always wins and suggestions never stack.
#[derive(Debug, Clone)]
pub struct ReviewWorkflow {
    live: String,
    baseline: String,
    state: ReviewState,
}

impl ReviewWorkflow {
    pub fn new(initial: impl Into<String>) -> Self {
        let live = initial.into();
        Self {
            baseline: live.clone(),
            live,
            state: ReviewState::Clean,
        }
    }

    pub fn live(&self) -> &str {
        &self.live
    }

    pub fn baseline(&self) -> &str {
        &self.baseline
    }

    pub fn state(&self) -> ReviewState {
        self.state
    }

    pub fn is_reviewing(&self) -> bool {
        self.state == ReviewState::Reviewing
    }

    /// The live document parsed into runs.
    pub fn annotated(&self) -> AnnotatedDocument {
        AnnotatedDocument::parse(&self.live)
    }

    /// Apply an AI result. The current live document becomes the baseline.
    ///
    /// Returns the state afterwards. A result identical to the live
    /// document changes nothing.
    pub fn propose(&mut self, suggestion: impl Into<String>) -> ReviewState {
        let suggestion = suggestion.into();
        if suggestion == self.live {
            debug!("suggestion identical to live document, ignoring");
            return self.state;
        }
        if self.is_reviewing() {
            info!("replacing unresolved suggestion");
        }
        self.baseline = std::mem::replace(&mut self.live, suggestion);
        self.state = ReviewState::Reviewing;
        self.state
    }

    /// Keep the suggestion: drop deleted runs, unwrap inserted runs.
    pub fn accept(&mut self) -> Result<ChangeSummary, CoreError> {
        if !self.is_reviewing() {
            return Err(CoreError::NoPendingSuggestion);
        }
        let doc = self.annotated();
        let summary = doc.summary();
        self.settle(doc.accepted());
        info!(
            insertions = summary.insertions,
            deletions = summary.deletions,
            "suggestion accepted"
        );
        Ok(summary)
    }

    /// Discard the suggestion and restore the baseline byte-for-byte.
    ///
    /// When the baseline itself carries an unresolved suggestion (a second
    /// proposal arrived before the first was resolved), the workflow stays
    /// in review on that earlier suggestion and its rejected form becomes
    /// the new baseline.
    pub fn reject(&mut self) -> Result<(), CoreError> {
        if !self.is_reviewing() {
            return Err(CoreError::NoPendingSuggestion);
        }
        self.live = self.baseline.clone();
        let restored = self.annotated();
        if restored.is_annotated() {
            self.baseline = restored.rejected();
            info!("suggestion rejected, earlier suggestion still pending");
        } else {
            self.state = ReviewState::Clean;
            info!("suggestion rejected");
        }
        Ok(())
    }

    /// Apply a user edit. While reviewing, the pending suggestion is
    /// accepted first and the edit applies to the cleaned text.
    pub fn edit(&mut self, edit: impl FnOnce(&str) -> String) {
        if self.is_reviewing() {
            let cleaned = self.annotated().accepted();
            self.settle(cleaned);
            debug!("user edit during review treated as accept");
        }
        self.live = edit(&self.live);
    }

    /// Replace the whole document as a user edit.
    pub fn replace(&mut self, text: impl Into<String>) {
        let text = text.into();
        self.edit(move |_| text);
    }

    fn settle(&mut self, cleaned: String) {
        self.baseline = cleaned.clone();
        self.live = cleaned;
        self.state = ReviewState::Clean;
    }
}
