//! CLI command definitions and dispatch.

pub mod auth;
pub mod notifications;
pub mod wallet;

use clap::{Parser, Subcommand};

use mentorlink_api::ApiClient;
use mentorlink_auth::SessionStore;
use mentorlink_core::config::AppConfig;
use mentorlink_core::error::AppError;
use mentorlink_entity::user::UserProfile;
use mentorlink_store::CredentialVault;

use crate::output::OutputFormat;

/// MentorLink — freelance challenge and mentorship marketplace client
#[derive(Debug, Parser)]
#[command(name = "mentorlink-cli", version, about, long_about = None)]
pub struct Cli {
    /// Configuration environment (merged over config/default.toml)
    #[arg(short, long, default_value = "development")]
    pub env: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Log in and persist the session
    Login(auth::LoginArgs),
    /// Create an account and persist the session
    Signup(auth::SignupArgs),
    /// Clear the persisted session
    Logout,
    /// Show the current profile
    Profile(auth::ProfileArgs),
    /// Notification management
    Notifications(notifications::NotificationArgs),
    /// Wallet management
    Wallet(wallet::WalletArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        let config = AppConfig::load(&self.env)?;
        let context = ClientContext::new(&config)?;

        match &self.command {
            Commands::Login(args) => auth::login(args, &context).await,
            Commands::Signup(args) => auth::signup(args, &context).await,
            Commands::Logout => auth::logout(&context).await,
            Commands::Profile(args) => auth::profile(args, &context, self.format).await,
            Commands::Notifications(args) => {
                notifications::execute(args, &context, self.format).await
            }
            Commands::Wallet(args) => wallet::execute(args, &context, self.format).await,
        }
    }
}

/// Wired client components shared by every command.
pub struct ClientContext {
    /// REST client.
    pub api: ApiClient,
    /// The authoritative session store.
    pub session: SessionStore,
}

impl ClientContext {
    /// Build the API client, credential vault, and session store.
    pub fn new(config: &AppConfig) -> Result<Self, AppError> {
        let api = ApiClient::new(&config.api)?;
        let vault = CredentialVault::new(&config.credentials)?;
        let session = SessionStore::new(api.clone(), vault, config.session.clone());
        Ok(Self { api, session })
    }

    /// Restore the persisted session and require it to be valid.
    pub async fn require_session(&self) -> Result<UserProfile, AppError> {
        let state = self.session.bootstrap().await;
        state.profile().cloned().ok_or_else(|| {
            AppError::authentication("Not logged in. Run `mentorlink-cli login` first.")
        })
    }
}
