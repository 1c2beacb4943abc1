//! Diff-annotated policy documents.
//!
//! The backend marks a proposed edit inline in the policy HTML: inserted
//! fragments are wrapped in `<ins>`, removed fragments in `<del>` (or `<s>`,
//! which some HTML differs emit for strikethrough). [`AnnotatedDocument`]
//! parses that markup into a flat sequence of [`Run`]s so accepting or
//! rejecting a suggestion is a pure transformation rather than string
//! substitution.
//!
//! Markers are paired with a stack. A marker without a partner is kept as
//! literal text in whatever run it falls in, so malformed markup can leave a
//! stray tag behind but never drops text outside a matched pair.

use serde::{Deserialize, Serialize};

/// How a run of text relates to the baseline document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunKind {
    Plain,
    Inserted,
    Deleted,
}

/// A maximal stretch of text with a single [`RunKind`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Run {
    pub kind: RunKind,
    pub text: String,
}

/// Counts of annotated runs in a document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChangeSummary {
    pub insertions: usize,
    pub deletions: usize,
}

/// A policy document split into plain, inserted and deleted runs.
///
/// Adjacent runs of the same kind are merged and empty runs are never
/// stored, so two runs next to each other always differ in kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnnotatedDocument {
    runs: Vec<Run>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MarkerName {
    Ins,
    Del,
    Strike,
}

impl MarkerName {
    fn from_tag(name: &str) -> Option<Self> {
        if name.eq_ignore_ascii_case("ins") {
            Some(MarkerName::Ins)
        } else if name.eq_ignore_ascii_case("del") {
            Some(MarkerName::Del)
        } else if name.eq_ignore_ascii_case("s") {
            Some(MarkerName::Strike)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Marker {
    start: usize,
    end: usize,
    name: MarkerName,
    closing: bool,
}

impl AnnotatedDocument {
    /// Parse policy HTML, recognising `<ins>`, `<del>` and `<s>` markers
    /// (any case, with or without attributes).
    pub fn parse(html: &str) -> Self {
        let markers = scan_markers(html);
        let matched = pair_markers(&markers);

        let mut doc = AnnotatedDocument::default();
        let mut cursor = 0;
        let mut inserted_depth = 0usize;
        let mut deleted_depth = 0usize;

        for (marker, is_matched) in markers.iter().zip(&matched) {
            let kind = current_kind(inserted_depth, deleted_depth);
            doc.push(kind, &html[cursor..marker.start]);

            if *is_matched {
                let depth = match marker.name {
                    MarkerName::Ins => &mut inserted_depth,
                    MarkerName::Del | MarkerName::Strike => &mut deleted_depth,
                };
                if marker.closing {
                    *depth -= 1;
                } else {
                    *depth += 1;
                }
            } else {
                doc.push(kind, &html[marker.start..marker.end]);
            }
            cursor = marker.end;
        }

        let kind = current_kind(inserted_depth, deleted_depth);
        doc.push(kind, &html[cursor..]);
        doc
    }

    pub fn from_runs(runs: impl IntoIterator<Item = Run>) -> Self {
        let mut doc = AnnotatedDocument::default();
        for run in runs {
            doc.push(run.kind, &run.text);
        }
        doc
    }

    pub fn runs(&self) -> &[Run] {
        &self.runs
    }

    /// Whether any inserted or deleted run is present.
    pub fn is_annotated(&self) -> bool {
        self.runs.iter().any(|r| r.kind != RunKind::Plain)
    }

    pub fn summary(&self) -> ChangeSummary {
        let mut summary = ChangeSummary::default();
        for run in &self.runs {
            match run.kind {
                RunKind::Inserted => summary.insertions += 1,
                RunKind::Deleted => summary.deletions += 1,
                RunKind::Plain => {}
            }
        }
        summary
    }

    pub fn insertions(&self) -> impl Iterator<Item = &str> {
        self.texts_of(RunKind::Inserted)
    }

    pub fn deletions(&self) -> impl Iterator<Item = &str> {
        self.texts_of(RunKind::Deleted)
    }

    /// The document with the suggestion applied: inserted text kept,
    /// deleted text dropped, no markers left.
    pub fn accepted(&self) -> String {
        self.collect(|kind| kind != RunKind::Deleted)
    }

    /// The document with the suggestion discarded: deleted text restored,
    /// inserted text dropped, no markers left.
    pub fn rejected(&self) -> String {
        self.collect(|kind| kind != RunKind::Inserted)
    }

    /// Render back to HTML with normalised `<ins>`/`<del>` markers.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        for run in &self.runs {
            match run.kind {
                RunKind::Plain => out.push_str(&run.text),
                RunKind::Inserted => {
                    out.push_str("<ins>");
                    out.push_str(&run.text);
                    out.push_str("</ins>");
                }
                RunKind::Deleted => {
                    out.push_str("<del>");
                    out.push_str(&run.text);
                    out.push_str("</del>");
                }
            }
        }
        out
    }

    fn texts_of(&self, kind: RunKind) -> impl Iterator<Item = &str> {
        self.runs
            .iter()
            .filter(move |r| r.kind == kind)
            .map(|r| r.text.as_str())
    }

    fn collect(&self, keep: impl Fn(RunKind) -> bool) -> String {
        self.runs
            .iter()
            .filter(|r| keep(r.kind))
            .map(|r| r.text.as_str())
            .collect()
    }

    fn push(&mut self, kind: RunKind, text: &str) {
        if text.is_empty() {
            return;
        }
        match self.runs.last_mut() {
            Some(last) if last.kind == kind => last.text.push_str(text),
            _ => self.runs.push(Run {
                kind,
                text: text.to_string(),
            }),
        }
    }
}

fn current_kind(inserted_depth: usize, deleted_depth: usize) -> RunKind {
    if deleted_depth > 0 {
        RunKind::Deleted
    } else if inserted_depth > 0 {
        RunKind::Inserted
    } else {
        RunKind::Plain
    }
}

/// Find every diff marker tag, in document order.
fn scan_markers(html: &str) -> Vec<Marker> {
    let bytes = html.as_bytes();
    let mut markers = Vec::new();
    let mut pos = 0;

    while let Some(offset) = html[pos..].find('<') {
        let start = pos + offset;
        pos = start + 1;

        let mut i = start + 1;
        let closing = bytes.get(i) == Some(&b'/');
        if closing {
            i += 1;
        }
        let name_start = i;
        while bytes.get(i).is_some_and(u8::is_ascii_alphabetic) {
            i += 1;
        }
        let Some(name) = MarkerName::from_tag(&html[name_start..i]) else {
            continue;
        };
        // The name must end the tag or be followed by attributes.
        match bytes.get(i) {
            Some(b'>') => {}
            Some(b) if b.is_ascii_whitespace() => {}
            _ => continue,
        }
        let Some(close) = html[i..].find('>') else {
            break;
        };
        let end = i + close + 1;
        markers.push(Marker {
            start,
            end,
            name,
            closing,
        });
        pos = end;
    }

    markers
}

/// Pair opening and closing markers of the same name. Returns, per marker,
/// whether it belongs to a matched pair.
fn pair_markers(markers: &[Marker]) -> Vec<bool> {
    let mut matched = vec![false; markers.len()];
    let mut open: Vec<usize> = Vec::new();

    for (idx, marker) in markers.iter().enumerate() {
        if !marker.closing {
            open.push(idx);
            continue;
        }
        if let Some(depth) = open
            .iter()
            .rposition(|&o| markers[o].name == marker.name)
        {
            // Openers above the partner were never closed.
            let partner = open[depth];
            open.truncate(depth);
            matched[partner] = true;
            matched[idx] = true;
        }
    }

    matched
}
