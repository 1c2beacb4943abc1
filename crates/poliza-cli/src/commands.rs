use std::io::Write;
use std::path::{Path, PathBuf};

use eyre::{Result, WrapErr};
use poliza_assistant::analyze::PolicyAnalyzer;
use poliza_assistant::chat::{ChatSession, Welcome};
use poliza_assistant::editor::{Opening, PolicyEditor};
use poliza_auth::flows;
use poliza_backend::auth::RegisterRequest;
use poliza_backend::upload::UploadFile;
use poliza_cli::cli::DocumentKind;
use poliza_cli::render;
use poliza_cli::state::CliState;
use poliza_core::intent::IntentClassifier;
use poliza_core::models::policy::{find_policy, starter_portfolio};
use poliza_core::models::template::{TemplateQuery, catalog, categories, featured};
use tokio::io::{AsyncBufReadExt, AsyncReadExt, BufReader, Lines, Stdin};

type Input = Lines<BufReader<Stdin>>;

fn stdin_lines() -> Input {
    BufReader::new(tokio::io::stdin()).lines()
}

async fn prompt(input: &mut Input, label: &str) -> Result<Option<String>> {
    print!("{label}");
    std::io::stdout().flush()?;
    Ok(input.next_line().await?)
}

async fn password_or_prompt(password: Option<String>) -> Result<String> {
    match password {
        Some(p) => Ok(p),
        None => {
            let mut input = stdin_lines();
            prompt(&mut input, "Contraseña: ")
                .await?
                .ok_or_else(|| eyre::eyre!("no password given"))
        }
    }
}

pub async fn login(state: &mut CliState, email: String, password: Option<String>) -> Result<()> {
    let password = password_or_prompt(password).await?;
    let client = state.backend()?;
    let tokens = flows::sign_in(&client, &email, &password).await?;
    state.session.establish(tokens)?;
    let user = state.require_user()?;
    println!("Sesión iniciada como {}.", user.display_name());
    Ok(())
}

pub async fn register(
    state: &mut CliState,
    email: String,
    password: Option<String>,
    first_name: Option<String>,
    last_name: Option<String>,
    phone: Option<String>,
) -> Result<()> {
    let password = password_or_prompt(password).await?;
    let client = state.backend()?;
    let tokens = flows::sign_up(
        &client,
        RegisterRequest {
            email,
            password,
            first_name,
            last_name,
            phone,
        },
    )
    .await?;
    state.session.establish(tokens)?;
    let user = state.require_user()?;
    println!("Cuenta creada. Bienvenido, {}.", user.display_name());
    Ok(())
}

pub fn logout(state: &mut CliState) -> Result<()> {
    state.session.teardown()?;
    println!("Sesión cerrada.");
    Ok(())
}

pub fn whoami(state: &CliState) -> Result<()> {
    let user = state.require_user()?;
    println!("{} <{}>", user.display_name(), user.email);
    if let Some(thread) = state.session.thread() {
        println!("Conversación: {thread}");
    }
    Ok(())
}

pub fn dashboard(state: &CliState) -> Result<()> {
    let user = state.require_user()?;
    println!("Hola, {}. Tus pólizas:\n", user.display_name());
    print!("{}", render::portfolio(&starter_portfolio()));
    Ok(())
}

pub fn templates(
    search: Option<String>,
    category: Option<String>,
    only_featured: bool,
) -> Result<()> {
    let all = catalog();
    if only_featured {
        print!("{}", render::templates(&featured(&all)));
        return Ok(());
    }
    if let Some(category) = &category
        && !categories(&all).contains(&category.as_str())
    {
        eyre::bail!(
            "unknown category {category:?}; choose one of: {}",
            categories(&all).join(", ")
        );
    }
    let query = TemplateQuery { search, category };
    print!("{}", render::templates(&query.apply(&all)));
    Ok(())
}

pub async fn chat(state: &mut CliState, message: Option<String>, new_thread: bool) -> Result<()> {
    let thread = if new_thread {
        state.session.reset_thread()?
    } else {
        state.session.ensure_thread()?
    };
    let session = ChatSession::new(state.shared_backend()?, Some(thread), Welcome::General);

    if let Some(message) = message {
        if let Some(reply) = session.send(&message).await {
            println!("{}", reply.text);
        }
        return Ok(());
    }

    for greeting in session.messages().await {
        println!("{}", render::message(&greeting));
    }
    let mut input = stdin_lines();
    while let Some(line) = prompt(&mut input, "tú> ").await? {
        if is_exit(&line) {
            break;
        }
        if let Some(reply) = session.send(&line).await {
            println!("{}", render::message(&reply));
        }
    }
    Ok(())
}

pub async fn edit(
    state: &mut CliState,
    policy: Option<String>,
    new: bool,
    file: Option<&Path>,
) -> Result<()> {
    let opening = match (policy, file) {
        (Some(id), _) => {
            let summary = find_policy(&id).ok_or_else(|| eyre::eyre!("no policy with id {id}"))?;
            Opening::policy(&summary)
        }
        (None, Some(path)) => Opening::Existing {
            title: path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "documento".to_string()),
            text: std::fs::read_to_string(path)
                .wrap_err_with(|| format!("failed to read {}", path.display()))?,
        },
        (None, None) => {
            if !new {
                tracing::debug!("no policy given, starting a new one");
            }
            Opening::NewPolicy
        }
    };

    let thread = state.session.ensure_thread()?;
    let mut editor = PolicyEditor::open(
        state.shared_backend()?,
        IntentClassifier::spanish()?,
        Some(thread),
        opening,
    );

    for greeting in editor.messages().await {
        println!("{}", render::message(&greeting));
    }
    println!("Comandos: /ver, /aceptar, /rechazar, /guardar <archivo>, /salir\n");

    let mut input = stdin_lines();
    while let Some(line) = prompt(&mut input, "tú> ").await? {
        let line = line.trim();
        if is_exit(line) {
            break;
        }
        match line.split_once(' ').map_or((line, ""), |(c, rest)| (c, rest.trim())) {
            ("/ver", _) => println!("{}\n", render::annotated(&editor.annotated())),
            ("/aceptar", _) => match editor.accept() {
                Ok(summary) => println!(
                    "Cambios aceptados ({} adiciones, {} eliminaciones).",
                    summary.insertions, summary.deletions
                ),
                Err(e) => println!("{e}"),
            },
            ("/rechazar", _) => match editor.reject() {
                Ok(()) if editor.review().is_reviewing() => {
                    println!("Cambios rechazados. Queda pendiente la sugerencia anterior.");
                    println!("\n{}\n", render::annotated(&editor.annotated()));
                }
                Ok(()) => println!("Cambios rechazados."),
                Err(e) => println!("{e}"),
            },
            ("/guardar", _) if editor.review().is_reviewing() => {
                println!("Hay cambios pendientes. Usa /aceptar o /rechazar antes de guardar.");
            }
            ("/guardar", path) if !path.is_empty() => {
                std::fs::write(path, editor.document())
                    .wrap_err_with(|| format!("failed to write {path}"))?;
                println!("Guardado en {path}.");
            }
            _ => {
                if let Some(reply) = editor.submit(line).await {
                    println!("{}", render::message(&reply.message));
                    if editor.review().is_reviewing() {
                        println!("\n{}\n", render::annotated(&editor.annotated()));
                    }
                }
            }
        }
    }
    Ok(())
}

/// What `poliza analyze` reads the policy from.
pub enum AnalysisSource {
    Upload {
        path: PathBuf,
        kind: DocumentKind,
        description: Option<String>,
    },
    /// A text file, or stdin for `-`.
    Text(PathBuf),
}

pub async fn analyze(
    state: &mut CliState,
    source: AnalysisSource,
    question: Option<String>,
) -> Result<()> {
    let thread = state.session.ensure_thread()?;
    let mut analyzer = PolicyAnalyzer::new(state.shared_backend()?, Some(thread));

    match source {
        AnalysisSource::Upload {
            path,
            kind,
            description,
        } => {
            let file = UploadFile::from_path(&path)
                .await
                .wrap_err_with(|| format!("failed to read {}", path.display()))?;
            let document = analyzer
                .upload(file, kind.into(), description.as_deref())
                .await?;
            println!("Documento subido: {}", document.filename);

            match question {
                Some(question) => println!("{}", analyzer.ask(&question).await?),
                None => print!("{}", render::analysis(&analyzer.analyze().await?)),
            }
        }
        AnalysisSource::Text(path) => {
            let text = read_policy_text(&path).await?;
            match question {
                Some(question) => {
                    println!("{}", analyzer.ask_about_text(&text, &question).await?)
                }
                None => print!("{}", render::analysis(&analyzer.analyze_text(&text).await?)),
            }
        }
    }
    Ok(())
}

async fn read_policy_text(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut text = String::new();
        tokio::io::stdin().read_to_string(&mut text).await?;
        return Ok(text);
    }
    tokio::fs::read_to_string(path)
        .await
        .wrap_err_with(|| format!("failed to read {}", path.display()))
}

fn is_exit(line: &str) -> bool {
    matches!(line.trim(), "/salir" | "/exit")
}
