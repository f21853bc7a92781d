//! Wallet CLI commands.

use clap::{Args, Subcommand};

use mentorlink_core::error::AppError;
use mentorlink_entity::wallet::Wallet;

use crate::output::{self, OutputFormat};

use super::ClientContext;

/// Arguments for wallet commands
#[derive(Debug, Args)]
pub struct WalletArgs {
    /// Wallet subcommand
    #[command(subcommand)]
    pub command: WalletCommand,
}

/// Wallet subcommands
#[derive(Debug, Subcommand)]
pub enum WalletCommand {
    /// Show current balances
    Show,
    /// Add funds
    Topup {
        /// Amount in minor currency units
        amount: i64,
    },
}

/// Execute wallet commands
pub async fn execute(
    args: &WalletArgs,
    context: &ClientContext,
    format: OutputFormat,
) -> Result<(), AppError> {
    context.require_session().await?;

    match &args.command {
        WalletCommand::Show => {
            let wallet = context.api.wallet().await?;
            print_wallet(&wallet, format);
        }
        WalletCommand::Topup { amount } => {
            if *amount <= 0 {
                return Err(AppError::validation("Top-up amount must be positive"));
            }
            let wallet = context.api.topup(*amount).await?;
            output::print_success(&format!("Topped up by {}", amount));
            print_wallet(&wallet, format);
        }
    }

    Ok(())
}

fn print_wallet(wallet: &Wallet, format: OutputFormat) {
    match format {
        OutputFormat::Json => output::print_item(wallet, format),
        OutputFormat::Table => {
            output::print_kv("Available", &wallet.available_balance.to_string());
            output::print_kv("Locked", &wallet.locked_balance.to_string());
            output::print_kv("Total", &wallet.total().to_string());
        }
    }
}
