//! Intent classification for chat messages.
//!
//! A message is routed to one of three handlers: draft a new policy, edit
//! the policy being worked on, or answer a question. Classification is a
//! keyword heuristic held in an explicit rule table. Rules are evaluated in
//! ascending priority and the first match wins, so precedence between
//! overlapping phrases is data rather than code order.
//!
//! Messages are lower-cased and accent-folded before matching, so the
//! patterns below are written without accents (`poliza`, `seccion`).
//!
//! Edit rules skip questions ("¿La póliza incluye...?") unless the question
//! is a request addressed to the assistant ("¿Puedes cambiar...?").

use regex::Regex;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;

/// What the user wants done with their message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Intent {
    /// Produce a whole new policy document.
    Generate,
    /// Modify the existing policy document.
    Edit,
    /// Answer a question; the document is not touched.
    Qa,
}

// ── Vocabulary ───────────────────────────────────────────────────────────────

const CREATE_VERB: &str = r"\b(?:crea|crear|creame|creemos|genera|generar|generame|redacta|redactar|redactame|elabora|elaborar|elaborame|escribe|escribir|escribeme|haz|hazme|hacer|prepara|preparar|preparame|arma|armar|create|generate|draft|write|make)\b";

const NEW_QUALIFIER: &str = r"(?:nueva|nuevo|nuevas|nuevos|new)";

const DOCUMENT_NOUN: &str =
    r"\b(?:poliza|polizas|documento|documentos|contrato|contratos|seguro|policy|document|contract)\b";

const SUBPART_NOUN: &str = r"\b(?:seccion|secciones|clausula|clausulas|articulo|articulos|parrafo|parrafos|apartado|apartados|inciso|incisos|anexo|anexos|section|sections|clause|clauses|article|articles|paragraph|paragraphs)\b";

const EDIT_VERB: &str = r"\b(?:edita|editar|editame|edites|cambia|cambiar|cambiame|cambies|modifica|modificar|modificame|modifiques|actualiza|actualizar|actualices|corrige|corregir|corrijas|ajusta|ajustar|ajustes|agrega|agregar|agregale|anade|anadir|anadele|incluye|incluir|incluyas|elimina|eliminar|elimines|quita|quitar|quites|borra|borrar|borres|reemplaza|reemplazar|sustituye|sustituir|reescribe|reescribir|mejora|mejorar|amplia|ampliar|reduce|reducir|aumenta|aumentar|edit|change|modify|update|fix|adjust|add|remove|delete|replace|rewrite)\b";

const CONTEXT_WORD: &str = r"\b(?:esto|esta|este|eso|esa|ese|aquello|aqui|ahi|lo siguiente|la siguiente|el siguiente|lo anterior|esa parte|esta parte|this|that|the following|that part)\b";

/// A leading imperative or infinitive, optionally with a clitic pronoun
/// (`corrigelo`, `mejoralo`, `actualizar`). A bare root such as the
/// adjective `mejor` or the participle `incluido` does not qualify.
const TERSE_COMMAND: &str = r"^(?:(?:edit|cambi|modific|actualiz|corrig|correg|ajust|agreg|anad|inclu|elimin|quit|borr|reemplaz|sustitu|reescrib|mejor|ampli|aument)(?:a|e|ye|ar|er|ir)(?:lo|la|los|las|le|les|me|melo|mela|selo|sela)?|edit|fix|update|change|remove|delete|rewrite)(?:\s|$)";

/// Questions are answered, never applied to the document.
const QUESTION: &str = r"^¿|\?$|^(?:que|cual|cuales|como|cuanto|cuanta|cuantos|cuantas|por que|porque|donde|cuando|quien|what|which|how|why|does|do|is|are)\b";

/// A request phrased as a question ("¿puedes cambiar la sección 2?").
const POLITE_REQUEST: &str = r"^¿?(?:puedes|podrias|me puedes|me podrias|quisiera que|can you|could you|would you|please)\b";

// ── Rules ────────────────────────────────────────────────────────────────────

/// One row of the classification table.
#[derive(Debug, Clone)]
pub struct IntentRule {
    name: &'static str,
    priority: u16,
    intent: Intent,
    required: Vec<Regex>,
    excluded: Vec<Regex>,
    max_tokens: Option<usize>,
}

impl IntentRule {
    pub fn new(name: &'static str, priority: u16, intent: Intent) -> Self {
        Self {
            name,
            priority,
            intent,
            required: Vec::new(),
            excluded: Vec::new(),
            max_tokens: None,
        }
    }

    /// The message must match `pattern`.
    pub fn require(mut self, pattern: &str) -> Result<Self, CoreError> {
        self.required.push(compile(pattern)?);
        Ok(self)
    }

    /// The message must not match `pattern`.
    pub fn exclude(mut self, pattern: &str) -> Result<Self, CoreError> {
        self.excluded.push(compile(pattern)?);
        Ok(self)
    }

    /// The message must have at most `n` whitespace-separated tokens.
    pub fn max_tokens(mut self, n: usize) -> Self {
        self.max_tokens = Some(n);
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn priority(&self) -> u16 {
        self.priority
    }

    pub fn intent(&self) -> Intent {
        self.intent
    }

    /// Test the rule against an already normalized message.
    pub fn matches(&self, normalized: &str) -> bool {
        if let Some(max) = self.max_tokens
            && normalized.split_whitespace().count() > max
        {
            return false;
        }
        self.required.iter().all(|re| re.is_match(normalized))
            && !self.excluded.iter().any(|re| re.is_match(normalized))
    }
}

fn compile(pattern: &str) -> Result<Regex, CoreError> {
    Regex::new(pattern).map_err(|source| CoreError::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })
}

/// The outcome of classifying one message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub intent: Intent,
    /// Name of the rule that fired, `None` when the default applied.
    pub rule: Option<&'static str>,
}

/// An ordered rule table with `qa` as the fallback.
#[derive(Debug, Clone)]
pub struct IntentClassifier {
    rules: Vec<IntentRule>,
}

impl IntentClassifier {
    /// Build a classifier from rules in any order; they are sorted by
    /// priority. Rules with equal priority keep their given order.
    pub fn new(mut rules: Vec<IntentRule>) -> Self {
        rules.sort_by_key(|r| r.priority);
        Self { rules }
    }

    /// The built-in Spanish rule table.
    pub fn spanish() -> Result<Self, CoreError> {
        let new_document = format!(
            r"{CREATE_VERB}\s+(?:(?:un|una|unos|unas|a|an)\s+)?{NEW_QUALIFIER}\s+{DOCUMENT_NOUN}"
        );

        let rules = vec![
            // Generate tier.
            IntentRule::new("generate.new-document", 10, Intent::Generate).require(&new_document)?,
            IntentRule::new("generate.loose", 20, Intent::Generate)
                .require(CREATE_VERB)?
                .require(DOCUMENT_NOUN)?
                .exclude(SUBPART_NOUN)?
                .exclude(EDIT_VERB)?,
            // Edit tier.
            IntentRule::new("edit.create-subpart", 30, Intent::Edit)
                .require(CREATE_VERB)?
                .require(SUBPART_NOUN)?
                .require(DOCUMENT_NOUN)?
                .exclude(QUESTION)?,
            IntentRule::new("edit.request", 35, Intent::Edit)
                .require(POLITE_REQUEST)?
                .require(&format!("{EDIT_VERB}|{CREATE_VERB}"))?
                .require(&format!("{DOCUMENT_NOUN}|{SUBPART_NOUN}|{CONTEXT_WORD}"))?,
            IntentRule::new("edit.targeted", 40, Intent::Edit)
                .require(EDIT_VERB)?
                .require(&format!("{DOCUMENT_NOUN}|{SUBPART_NOUN}"))?
                .exclude(QUESTION)?,
            IntentRule::new("edit.contextual", 50, Intent::Edit)
                .require(EDIT_VERB)?
                .require(CONTEXT_WORD)?
                .exclude(QUESTION)?,
            IntentRule::new("edit.terse", 60, Intent::Edit)
                .require(TERSE_COMMAND)?
                .exclude(QUESTION)?
                .max_tokens(3),
        ];

        Ok(Self::new(rules))
    }

    pub fn rules(&self) -> &[IntentRule] {
        &self.rules
    }

    pub fn classify(&self, message: &str) -> Intent {
        self.explain(message).intent
    }

    /// Classify and report which rule decided.
    pub fn explain(&self, message: &str) -> Classification {
        let normalized = normalize(message);
        let classification = self
            .rules
            .iter()
            .find(|rule| rule.matches(&normalized))
            .map(|rule| Classification {
                intent: rule.intent,
                rule: Some(rule.name),
            })
            .unwrap_or(Classification {
                intent: Intent::Qa,
                rule: None,
            });

        tracing::debug!(
            intent = ?classification.intent,
            rule = classification.rule.unwrap_or("default"),
            "classified message"
        );
        classification
    }
}

/// Lower-case, fold Spanish accents, and collapse whitespace.
pub fn normalize(message: &str) -> String {
    let folded: String = message
        .chars()
        .flat_map(char::to_lowercase)
        .map(|c| match c {
            'á' | 'à' | 'ä' | 'â' => 'a',
            'é' | 'è' | 'ë' | 'ê' => 'e',
            'í' | 'ì' | 'ï' | 'î' => 'i',
            'ó' | 'ò' | 'ö' | 'ô' => 'o',
            'ú' | 'ù' | 'ü' | 'û' => 'u',
            'ñ' => 'n',
            other => other,
        })
        .collect();
    folded.split_whitespace().collect::<Vec<_>>().join(" ")
}
