use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use poliza_core::models::upload::DocumentType;

#[derive(Parser, Debug)]
#[command(name = "poliza")]
#[command(about = "Asistente de pólizas de seguro")]
#[command(version)]
pub struct Cli {
    /// Backend base URL (overrides config.json)
    #[arg(long, global = true, env = "POLIZA_BACKEND_URL")]
    pub backend_url: Option<String>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Sign in and store the session
    Login {
        #[arg(short, long)]
        email: String,

        /// Read from stdin when omitted
        #[arg(short, long, env = "POLIZA_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Create an account and sign in
    Register {
        #[arg(short, long)]
        email: String,

        #[arg(short, long, env = "POLIZA_PASSWORD", hide_env_values = true)]
        password: Option<String>,

        #[arg(long)]
        first_name: Option<String>,

        #[arg(long)]
        last_name: Option<String>,

        #[arg(long)]
        phone: Option<String>,
    },

    /// Sign out and forget the stored session
    Logout,

    /// Show the signed-in user
    Whoami,

    /// List your policies
    Dashboard,

    /// Browse the template catalog
    Templates {
        /// Match title, description, or tags
        #[arg(short, long)]
        search: Option<String>,

        #[arg(short, long)]
        category: Option<String>,

        /// Only featured templates
        #[arg(long)]
        featured: bool,
    },

    /// Chat with the assistant
    Chat {
        /// Send one message and exit instead of starting a conversation
        message: Option<String>,

        /// Start a new conversation thread
        #[arg(long)]
        new_thread: bool,
    },

    /// Draft or edit a policy with the assistant
    Edit {
        /// Policy id from the dashboard (e.g. pol-001)
        #[arg(long, conflicts_with = "new")]
        policy: Option<String>,

        /// Start from the blank new-policy template
        #[arg(long)]
        new: bool,

        /// Open an HTML file instead of a stored policy
        #[arg(long, conflicts_with_all = ["policy", "new"])]
        file: Option<PathBuf>,
    },

    /// Upload a PDF, or read pasted policy text, and analyze it
    Analyze {
        /// PDF to upload
        #[arg(required_unless_present = "text", conflicts_with = "text")]
        path: Option<PathBuf>,

        /// Analyze policy text from this file (`-` reads stdin) instead of
        /// uploading a document
        #[arg(long, value_name = "FILE|-")]
        text: Option<PathBuf>,

        #[arg(short = 't', long, value_enum, default_value_t = DocumentKind::Policy)]
        document_type: DocumentKind,

        #[arg(short, long)]
        description: Option<String>,

        /// Ask this question about the document instead of a full analysis
        #[arg(short, long)]
        question: Option<String>,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Policy,
    Claim,
    Contract,
    Other,
}

impl From<DocumentKind> for DocumentType {
    fn from(kind: DocumentKind) -> Self {
        match kind {
            DocumentKind::Policy => DocumentType::Policy,
            DocumentKind::Claim => DocumentType::Claim,
            DocumentKind::Contract => DocumentType::Contract,
            DocumentKind::Other => DocumentType::Other,
        }
    }
}

impl Command {
    /// Commands that need a signed-in session.
    pub fn is_protected(&self) -> bool {
        !matches!(
            self,
            Command::Login { .. }
                | Command::Register { .. }
                | Command::Templates { .. }
                | Command::Logout
        )
    }
}
