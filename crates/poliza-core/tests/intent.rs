use poliza_core::intent::{Intent, IntentClassifier, IntentRule, normalize};

fn classifier() -> IntentClassifier {
    IntentClassifier::spanish().expect("built-in rules compile")
}

#[test]
fn new_policy_requests_generate() {
    let c = classifier();
    for msg in [
        "Quiero crear una nueva póliza de seguro de hogar",
        "crear una nueva póliza",
        "Genera un nuevo contrato para mi empresa",
        "REDACTA UNA NUEVA PÓLIZA de responsabilidad civil",
        "Create a new policy for my bakery",
    ] {
        let result = c.explain(msg);
        assert_eq!(result.intent, Intent::Generate, "{msg}");
        assert_eq!(result.rule, Some("generate.new-document"), "{msg}");
    }
}

#[test]
fn creation_verb_and_document_noun_generate() {
    let c = classifier();
    let result = c.explain("Redacta una póliza de seguro de auto comercial");
    assert_eq!(result.intent, Intent::Generate);
    assert_eq!(result.rule, Some("generate.loose"));
}

#[test]
fn edit_verb_with_section_is_edit() {
    let c = classifier();
    for msg in [
        "Modifica la sección 2 para incluir inundaciones",
        "cambia la sección de exclusiones",
        "Actualiza la SECCIÓN 3 con un límite de $2,000,000",
        "elimina la sección de prima y pagos",
        "Añade una sección sobre asistencia legal",
    ] {
        assert_eq!(c.classify(msg), Intent::Edit, "{msg}");
    }
}

#[test]
fn creating_a_section_in_the_policy_is_edit() {
    let c = classifier();
    let result = c.explain("Crea una nueva sección de exclusiones en la póliza");
    assert_eq!(result.intent, Intent::Edit);
    assert_eq!(result.rule, Some("edit.create-subpart"));
}

#[test]
fn loose_generate_is_blocked_by_subpart_words() {
    let c = classifier();
    // Creation verb and document noun, but the clause word excludes the
    // loose generate rule.
    let result = c.explain("escribe una cláusula para el contrato");
    assert_eq!(result.intent, Intent::Edit);
    assert_eq!(result.rule, Some("edit.create-subpart"));
}

#[test]
fn edit_verb_with_document_is_edit() {
    let c = classifier();
    let result = c.explain("Por favor corrige la póliza");
    assert_eq!(result.intent, Intent::Edit);
    assert_eq!(result.rule, Some("edit.targeted"));
}

#[test]
fn edit_verb_with_context_word_is_edit() {
    let c = classifier();
    let result = c.explain("cambia esto para que sea más claro");
    assert_eq!(result.intent, Intent::Edit);
    assert_eq!(result.rule, Some("edit.contextual"));

    assert_eq!(c.classify("reemplaza lo siguiente por texto formal"), Intent::Edit);
}

#[test]
fn short_command_starting_with_edit_root_is_edit() {
    let c = classifier();
    for msg in ["corrígelo", "Actualizar todo", "mejóralo por favor"] {
        let result = c.explain(msg);
        assert_eq!(result.intent, Intent::Edit, "{msg}");
        assert_eq!(result.rule, Some("edit.terse"), "{msg}");
    }
}

#[test]
fn long_message_with_bare_edit_root_is_not_terse() {
    let c = classifier();
    assert_eq!(
        c.classify("modificaciones recientes en la ley de seguros de vida"),
        Intent::Qa
    );
}

#[test]
fn unrecognized_messages_are_questions() {
    let c = classifier();
    for msg in [
        "hola",
        "¿Qué cubre mi póliza en caso de inundación?",
        "¿Cuál es el deducible?",
        "",
        "   ",
    ] {
        let result = c.explain(msg);
        assert_eq!(result.intent, Intent::Qa, "{msg:?}");
        assert_eq!(result.rule, None, "{msg:?}");
    }
}

#[test]
fn new_document_phrase_outranks_section_edit() {
    // Both a new-policy phrase and an edit of a section: the lower
    // priority value wins.
    let c = classifier();
    assert_eq!(
        c.classify("Crea una nueva póliza y modifica la sección 2"),
        Intent::Generate
    );
}

#[test]
fn rules_are_sorted_by_priority() {
    let c = classifier();
    let priorities: Vec<u16> = c.rules().iter().map(|r| r.priority()).collect();
    let mut sorted = priorities.clone();
    sorted.sort();
    assert_eq!(priorities, sorted);
    assert_eq!(c.rules()[0].name(), "generate.new-document");
}

#[test]
fn custom_table_precedence_is_data() {
    let rules = vec![
        IntentRule::new("late", 50, Intent::Generate)
            .require(r"\bpoliza\b")
            .unwrap(),
        IntentRule::new("early", 5, Intent::Edit)
            .require(r"\bpoliza\b")
            .unwrap(),
    ];
    let c = IntentClassifier::new(rules);
    let result = c.explain("la póliza");
    assert_eq!(result.intent, Intent::Edit);
    assert_eq!(result.rule, Some("early"));
}

#[test]
fn invalid_pattern_is_reported() {
    let err = IntentRule::new("broken", 1, Intent::Qa)
        .require("(unclosed")
        .unwrap_err();
    assert!(err.to_string().contains("(unclosed"));
}

#[test]
fn normalize_folds_accents_and_whitespace() {
    assert_eq!(normalize("  Añadir   CLÁUSULA\tÚnica "), "anadir clausula unica");
}

#[test]
fn questions_using_edit_verbs_are_answered() {
    let c = classifier();
    for msg in [
        "¿La póliza incluye cobertura de inundación?",
        "¿Aumenta la prima de la póliza cada año?",
        "¿Se puede reducir el deducible de la sección 4?",
        "Qué cláusula del contrato incluye robo",
        "¿Incluye robo?",
        "la póliza cubre esto?",
    ] {
        let result = c.explain(msg);
        assert_eq!(result.intent, Intent::Qa, "{msg}");
        assert_eq!(result.rule, None, "{msg}");
    }
}

#[test]
fn requests_phrased_as_questions_are_edits() {
    let c = classifier();
    for msg in [
        "¿Puedes cambiar la sección 2?",
        "¿Me podrías agregar una cláusula de mascotas a la póliza?",
        "Could you update this?",
    ] {
        let result = c.explain(msg);
        assert_eq!(result.intent, Intent::Edit, "{msg}");
        assert_eq!(result.rule, Some("edit.request"), "{msg}");
    }
    // A new document still outranks the request form.
    assert_eq!(c.classify("¿Puedes crear una nueva póliza?"), Intent::Generate);
}

#[test]
fn adjectives_and_participles_are_not_terse_commands() {
    let c = classifier();
    for msg in ["Mejor cobertura disponible", "incluido en precio", "mejor así"] {
        assert_eq!(c.classify(msg), Intent::Qa, "{msg}");
    }
    assert_eq!(c.explain("amplíala").rule, Some("edit.terse"));
    assert_eq!(c.explain("fix it").rule, Some("edit.terse"));
}
