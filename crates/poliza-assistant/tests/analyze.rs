mod common;

use std::sync::Arc;

use poliza_assistant::analyze::{ANALYSIS_PROMPT, PolicyAnalyzer};
use poliza_assistant::error::AssistantError;
use poliza_backend::upload::UploadFile;
use poliza_core::models::analysis::AnalysisOutcome;
use poliza_core::models::chat::ConversationThread;
use poliza_core::models::upload::DocumentType;

use common::{MockBackend, Reply};

fn pdf(name: &str) -> UploadFile {
    UploadFile {
        filename: name.to_string(),
        bytes: b"%PDF-1.7".to_vec(),
    }
}

fn analyzer(backend: MockBackend) -> (Arc<MockBackend>, PolicyAnalyzer<MockBackend>) {
    let backend = Arc::new(backend);
    let analyzer = PolicyAnalyzer::new(backend.clone(), Some(ConversationThread::generate()));
    (backend, analyzer)
}

#[tokio::test]
async fn analysis_requires_an_upload() {
    let (backend, analyzer) = analyzer(MockBackend::default());
    assert!(matches!(
        analyzer.analyze().await,
        Err(AssistantError::NoDocument)
    ));
    assert_eq!(backend.requests(), 0);
}

#[tokio::test]
async fn structured_answer_is_decoded() {
    let (backend, mut analyzer) = analyzer(MockBackend {
        answer: Reply::Ok(
            "```json\n{\"score\": 78, \"strengths\": [\"Cobertura amplia\"], \"weaknesses\": [], \"recommendations\": [\"Revisar deducible\"]}\n```",
        ),
        ..MockBackend::default()
    });

    let document = analyzer
        .upload(pdf("poliza.pdf"), DocumentType::Policy, None)
        .await
        .unwrap()
        .clone();
    let outcome = analyzer.analyze().await.unwrap();

    match outcome {
        AnalysisOutcome::Structured(analysis) => {
            assert_eq!(analysis.score, 78);
            assert_eq!(analysis.recommendations, ["Revisar deducible"]);
        }
        other => panic!("expected structured analysis, got {other:?}"),
    }
    let sent = backend.last_query();
    assert_eq!(sent.query, ANALYSIS_PROMPT);
    assert_eq!(sent.document_url.as_deref(), Some(document.url.as_str()));
}

#[tokio::test]
async fn prose_answer_degrades_to_a_diagnostic() {
    let long = "La póliza parece razonable. ".repeat(40);
    let answer: &'static str = Box::leak(long.into_boxed_str());
    let (_, mut analyzer) = analyzer(MockBackend {
        answer: Reply::Ok(answer),
        ..MockBackend::default()
    });

    analyzer
        .upload(pdf("poliza.pdf"), DocumentType::Policy, None)
        .await
        .unwrap();
    match analyzer.analyze().await.unwrap() {
        AnalysisOutcome::Unparsed { diagnostic } => {
            assert!(diagnostic.contains("La póliza parece razonable."));
            assert!(diagnostic.ends_with('…'));
        }
        other => panic!("expected diagnostic, got {other:?}"),
    }
}

#[tokio::test]
async fn failed_upload_keeps_previous_document() {
    let (_, mut analyzer) = analyzer(MockBackend::default());
    analyzer
        .upload(pdf("primera.pdf"), DocumentType::Policy, None)
        .await
        .unwrap();

    let empty = UploadFile {
        filename: "vacia.pdf".to_string(),
        bytes: Vec::new(),
    };
    let err = analyzer
        .upload(empty, DocumentType::Policy, None)
        .await
        .unwrap_err();
    assert!(matches!(err, AssistantError::Backend(_)));
    assert_eq!(analyzer.document().unwrap().filename, "primera.pdf");

    analyzer
        .upload(pdf("segunda.pdf"), DocumentType::Claim, Some("siniestro"))
        .await
        .unwrap();
    assert_eq!(analyzer.document().unwrap().filename, "segunda.pdf");
}

#[tokio::test]
async fn questions_about_the_document_use_fallback_text() {
    let (_, mut analyzer) = analyzer(MockBackend {
        answer: Reply::Missing,
        ..MockBackend::default()
    });
    analyzer
        .upload(pdf("poliza.pdf"), DocumentType::Policy, None)
        .await
        .unwrap();
    assert_eq!(
        analyzer.ask("¿Tiene deducible?").await.unwrap(),
        "No se recibió respuesta del asistente."
    );
}

#[tokio::test]
async fn pasted_text_is_analyzed_without_an_upload() {
    let (backend, analyzer) = analyzer(MockBackend {
        answer: Reply::Ok(
            "{\"score\": 64, \"strengths\": [], \"weaknesses\": [\"Sin cobertura de robo\"], \"recommendations\": []}",
        ),
        ..MockBackend::default()
    });

    let text = "<h3>Sección 1</h3><p>Cubre incendio.</p>";
    match analyzer.analyze_text(text).await.unwrap() {
        AnalysisOutcome::Structured(analysis) => {
            assert_eq!(analysis.score, 64);
            assert_eq!(analysis.weaknesses, ["Sin cobertura de robo"]);
        }
        other => panic!("expected structured analysis, got {other:?}"),
    }

    let sent = backend.last_query();
    assert_eq!(sent.query, ANALYSIS_PROMPT);
    assert_eq!(sent.current_policy_text.as_deref(), Some(text));
    assert_eq!(sent.document_url, None);
    assert!(backend.uploads.lock().unwrap().is_empty());
}

#[tokio::test]
async fn pasted_text_leaves_out_an_uploaded_document() {
    let (backend, mut analyzer) = analyzer(MockBackend::default());
    analyzer
        .upload(pdf("poliza.pdf"), DocumentType::Policy, None)
        .await
        .unwrap();

    let answer = analyzer
        .ask_about_text("<p>Deducible: $500</p>", "¿Cuál es el deducible?")
        .await
        .unwrap();
    assert_eq!(answer, "respuesta");

    let sent = backend.last_query();
    assert_eq!(sent.query, "¿Cuál es el deducible?");
    assert_eq!(sent.document_url, None);
    assert_eq!(sent.current_policy_text.as_deref(), Some("<p>Deducible: $500</p>"));
}

#[tokio::test]
async fn blank_pasted_text_is_rejected_locally() {
    let (backend, analyzer) = analyzer(MockBackend::default());
    assert!(matches!(
        analyzer.analyze_text("  \n ").await,
        Err(AssistantError::EmptyPolicyText)
    ));
    assert_eq!(backend.requests(), 0);
}
