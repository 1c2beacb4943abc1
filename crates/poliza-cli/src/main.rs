use clap::Parser;
use eyre::Result;
use poliza_cli::cli::{Cli, Command};
use poliza_cli::state::CliState;
use tracing_subscriber::EnvFilter;

mod commands;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    if cli.json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }

    let mut state = CliState::load(cli.backend_url)?;

    if cli.command.is_protected() && !state.session.is_authenticated() {
        eyre::bail!(
            "no hay una sesión activa; inicia sesión con `poliza login --email <correo>`"
        );
    }

    match cli.command {
        Command::Login { email, password } => commands::login(&mut state, email, password).await,
        Command::Register {
            email,
            password,
            first_name,
            last_name,
            phone,
        } => {
            commands::register(&mut state, email, password, first_name, last_name, phone).await
        }
        Command::Logout => commands::logout(&mut state),
        Command::Whoami => commands::whoami(&state),
        Command::Dashboard => commands::dashboard(&state),
        Command::Templates {
            search,
            category,
            featured,
        } => commands::templates(search, category, featured),
        Command::Chat {
            message,
            new_thread,
        } => commands::chat(&mut state, message, new_thread).await,
        Command::Edit { policy, new, file } => {
            commands::edit(&mut state, policy, new, file.as_deref()).await
        }
        Command::Analyze {
            path,
            text,
            document_type,
            description,
            question,
        } => {
            let source = match (path, text) {
                (_, Some(text)) => commands::AnalysisSource::Text(text),
                (Some(path), None) => commands::AnalysisSource::Upload {
                    path,
                    kind: document_type,
                    description,
                },
                (None, None) => eyre::bail!("indica un archivo PDF o --text"),
            };
            commands::analyze(&mut state, source, question).await
        }
    }
}
