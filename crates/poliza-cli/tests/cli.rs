use clap::Parser;
use poliza_cli::cli::{Cli, Command, DocumentKind};

fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
    Cli::try_parse_from(std::iter::once("poliza").chain(args.iter().copied()))
}

#[test]
fn only_public_commands_skip_the_session_check() {
    let public = [
        vec!["login", "--email", "a@b.c"],
        vec!["register", "--email", "a@b.c"],
        vec!["templates"],
        vec!["logout"],
    ];
    for args in public {
        assert!(!parse(&args).unwrap().command.is_protected(), "{args:?}");
    }

    let protected = [
        vec!["whoami"],
        vec!["dashboard"],
        vec!["chat"],
        vec!["edit", "--new"],
        vec!["analyze", "poliza.pdf"],
    ];
    for args in protected {
        assert!(parse(&args).unwrap().command.is_protected(), "{args:?}");
    }
}

#[test]
fn global_flags_apply_after_the_subcommand() {
    let cli = parse(&["dashboard", "--json", "--backend-url", "http://x/api"]).unwrap();
    assert!(cli.json);
    assert_eq!(cli.backend_url.as_deref(), Some("http://x/api"));
}

#[test]
fn edit_sources_are_exclusive() {
    assert!(parse(&["edit", "--policy", "pol-001", "--new"]).is_err());
    assert!(parse(&["edit", "--file", "p.html", "--policy", "pol-001"]).is_err());
}

#[test]
fn analyze_defaults_to_policy_documents() {
    match parse(&["analyze", "siniestro.pdf", "-t", "claim"]).unwrap().command {
        Command::Analyze { document_type, .. } => assert_eq!(document_type, DocumentKind::Claim),
        other => panic!("unexpected command {other:?}"),
    }
    match parse(&["analyze", "poliza.pdf"]).unwrap().command {
        Command::Analyze { document_type, .. } => assert_eq!(document_type, DocumentKind::Policy),
        other => panic!("unexpected command {other:?}"),
    }
}

#[test]
fn analyze_takes_a_pdf_or_pasted_text() {
    match parse(&["analyze", "--text", "-", "-q", "¿Qué cubre?"]).unwrap().command {
        Command::Analyze {
            path,
            text,
            question,
            ..
        } => {
            assert_eq!(path, None);
            assert_eq!(text.as_deref(), Some(std::path::Path::new("-")));
            assert_eq!(question.as_deref(), Some("¿Qué cubre?"));
        }
        other => panic!("unexpected command {other:?}"),
    }
    assert!(parse(&["analyze", "--text", "-"]).unwrap().command.is_protected());

    assert!(parse(&["analyze"]).is_err());
    assert!(parse(&["analyze", "poliza.pdf", "--text", "poliza.txt"]).is_err());
}
