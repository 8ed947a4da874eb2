use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use taskdeck_client::{HttpTransport, SessionStore};
use taskdeck_core::api::ApiTransport;
use taskdeck_infrastructure::{FileKeyValueStore, default_data_dir};

mod commands;

#[derive(Parser)]
#[command(name = "taskdeck")]
#[command(about = "Taskdeck CLI - task list client for a REST backend", long_about = None)]
struct Cli {
    /// Base URL of the task-list API server
    #[arg(long, env = "TASKDECK_API_URL", default_value = "http://127.0.0.1:8000")]
    api_url: String,

    /// Directory for the persisted session (defaults to ~/.taskdeck)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new account and sign in
    Register {
        username: String,
        email: String,
        password: String,
        /// Confirmation sent to the server's equality check; defaults to the password
        #[arg(long)]
        password_confirm: Option<String>,
    },
    /// Sign in with existing credentials
    Login { username: String, password: String },
    /// Sign out and clear the persisted session
    Logout,
    /// Show the signed-in user
    Whoami,
    /// List tasks (newest first)
    List,
    /// Add a task
    Add {
        title: String,
        #[arg(long, default_value = "")]
        description: String,
    },
    /// Edit a task's title or description
    Edit {
        id: i64,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    /// Toggle a task's completed state
    Done { id: i64 },
    /// Delete a task
    Rm { id: i64 },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let data_dir = match cli.data_dir {
        Some(dir) => dir,
        None => default_data_dir()?,
    };
    let storage = Arc::new(FileKeyValueStore::new(&data_dir)?);
    let transport: Arc<dyn ApiTransport> = Arc::new(HttpTransport::new(&cli.api_url));
    let session = Arc::new(SessionStore::new(transport.clone(), storage));
    session.restore().await;

    match cli.command {
        Commands::Register {
            username,
            email,
            password,
            password_confirm,
        } => {
            let confirm = password_confirm.unwrap_or_else(|| password.clone());
            commands::auth::register(&session, &username, &email, &password, &confirm).await
        }
        Commands::Login { username, password } => {
            commands::auth::login(&session, &username, &password).await
        }
        Commands::Logout => commands::auth::logout(&session).await,
        Commands::Whoami => commands::auth::whoami(&session),
        Commands::List => commands::tasks::list(transport, session).await,
        Commands::Add { title, description } => {
            commands::tasks::add(transport, session, &title, &description).await
        }
        Commands::Edit {
            id,
            title,
            description,
        } => commands::tasks::edit(transport, session, id, title, description).await,
        Commands::Done { id } => commands::tasks::done(transport, session, id).await,
        Commands::Rm { id } => commands::tasks::remove(transport, session, id).await,
    }
}
