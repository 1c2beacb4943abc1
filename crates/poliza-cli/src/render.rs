//! Plain-text rendering for terminal output.

use poliza_core::document::{AnnotatedDocument, RunKind};
use poliza_core::models::analysis::AnalysisOutcome;
use poliza_core::models::chat::{ChatMessage, ChatRole};
use poliza_core::models::policy::PolicySummary;
use poliza_core::models::template::PolicyTemplate;

/// Show a suggestion inline: `[+added+]` and `[-removed-]`.
pub fn annotated(doc: &AnnotatedDocument) -> String {
    let mut out = String::new();
    for run in doc.runs() {
        match run.kind {
            RunKind::Plain => out.push_str(&run.text),
            RunKind::Inserted => {
                out.push_str("[+");
                out.push_str(&run.text);
                out.push_str("+]");
            }
            RunKind::Deleted => {
                out.push_str("[-");
                out.push_str(&run.text);
                out.push_str("-]");
            }
        }
    }
    out
}

pub fn message(message: &ChatMessage) -> String {
    let who = match message.role {
        ChatRole::User => "tú",
        ChatRole::Assistant => "asistente",
    };
    format!("{who}> {}", message.text)
}

pub fn portfolio(policies: &[PolicySummary]) -> String {
    let mut out = String::new();
    for p in policies {
        out.push_str(&format!(
            "{:<8} {:<36} {:<12} {:<12} {}\n",
            p.id,
            p.title,
            p.kind,
            p.status.label(),
            p.last_updated
        ));
    }
    out
}

pub fn templates(templates: &[&PolicyTemplate]) -> String {
    if templates.is_empty() {
        return "No se encontraron plantillas.\n".to_string();
    }
    let mut out = String::new();
    for t in templates {
        let star = if t.featured { "★ " } else { "" };
        out.push_str(&format!(
            "{star}{} [{}] {:.1}/5, {} descargas\n    {}\n",
            t.title, t.category, t.rating, t.downloads, t.description
        ));
    }
    out
}

pub fn analysis(outcome: &AnalysisOutcome) -> String {
    match outcome {
        AnalysisOutcome::Unparsed { diagnostic } => format!("{diagnostic}\n"),
        AnalysisOutcome::Structured(a) => {
            let mut out = format!("Puntuación: {}/100\n", a.score);
            for (heading, items) in [
                ("Fortalezas", &a.strengths),
                ("Debilidades", &a.weaknesses),
                ("Recomendaciones", &a.recommendations),
            ] {
                out.push_str(&format!("\n{heading}:\n"));
                if items.is_empty() {
                    out.push_str("  (ninguna)\n");
                }
                for item in items {
                    out.push_str(&format!("  - {item}\n"));
                }
            }
            out
        }
    }
}
