//! ProBem client shell - browse the volunteer platform from a terminal.
//!
//! Stands in for the mobile app shell: hydrates the session on start and
//! dispatches to the auth flows.

mod commands;

use std::path::PathBuf;
use std::sync::Arc;

use api_gateway::ApiClient;
use app_core::{init_logging, Config, Paths};
use clap::{Parser, Subcommand};
use credential_store::{CredentialStore, FileBackend};
use session_engine::SessionManager;

use commands::AppContext;

/// ProBem client command-line interface.
#[derive(Parser)]
#[command(name = "probem")]
#[command(about = "ProBem volunteer platform client")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info", global = true)]
    log_level: String,

    /// Base directory for runtime files (credentials, config, logs). Defaults to ~/.probem
    #[arg(long, global = true)]
    base_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the current session
    Status,
    /// Sign in with e-mail and password
    Login {
        email: String,
        #[arg(long)]
        senha: String,
    },
    /// Sign in with a one-time code sent by e-mail
    LoginOtp { email: String },
    /// Register a new account
    Register {
        nome: String,
        email: String,
        #[arg(long)]
        senha: String,
    },
    /// Confirm the e-mail verification code and sign in
    VerifyEmail { email: String, codigo: String },
    /// Request a password recovery e-mail
    Recover { email: String },
    /// Set a new password using the recovery token
    ResetPassword {
        email: String,
        token: String,
        #[arg(long)]
        nova_senha: String,
    },
    /// Sign in with Google through the external browser
    GoogleLogin,
    /// Sign out and clear stored credentials
    Logout,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(&cli.log_level);

    let paths = match cli.base_dir {
        Some(base) => Paths::with_base_dir(base),
        None => Paths::new()?,
    };
    paths.ensure_dirs()?;
    let config = Config::load(&paths)?;

    let store = Arc::new(CredentialStore::new(Box::new(FileBackend::new(
        paths.credentials_file(),
    ))));
    let session = Arc::new(SessionManager::new(store.clone()));
    session.initialize();

    let client = ApiClient::new(config.api_url(), store.clone());

    let ctx = AppContext {
        config,
        store,
        session,
        client,
    };

    match cli.command {
        Commands::Status => commands::status::run(&ctx).await?,
        Commands::Login { email, senha } => commands::login::password(&ctx, &email, &senha).await?,
        Commands::LoginOtp { email } => commands::login::one_time_code(&ctx, &email).await?,
        Commands::Register { nome, email, senha } => {
            commands::account::register(&ctx, &nome, &email, &senha).await?
        }
        Commands::VerifyEmail { email, codigo } => {
            commands::account::verify_email(&ctx, &email, &codigo).await?
        }
        Commands::Recover { email } => commands::account::recover(&ctx, &email).await?,
        Commands::ResetPassword {
            email,
            token,
            nova_senha,
        } => commands::account::reset_password(&ctx, &email, &token, &nova_senha).await?,
        Commands::GoogleLogin => commands::google::run(&ctx).await?,
        Commands::Logout => commands::logout::run(&ctx)?,
    }

    Ok(())
}
