//! Notification CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;
use uuid::Uuid;

use mentorlink_core::error::AppError;
use mentorlink_entity::notification::{CategoryPreference, NotificationPreferences};

use crate::output::{self, OutputFormat};

use super::ClientContext;

/// Arguments for notification commands
#[derive(Debug, Args)]
pub struct NotificationArgs {
    /// Notification subcommand
    #[command(subcommand)]
    pub command: NotificationCommand,
}

/// Notification subcommands
#[derive(Debug, Subcommand)]
pub enum NotificationCommand {
    /// List notifications with the unread count
    List,
    /// Mark one notification as read
    Read {
        /// Notification ID
        id: Uuid,
    },
    /// Mark every notification as read
    ReadAll,
    /// Delete a notification
    Delete {
        /// Notification ID
        id: Uuid,
    },
    /// Show delivery preferences
    Preferences,
    /// Update delivery preferences for one category
    SetPreference {
        /// Category: session, challenge, chat, wallet, or system
        category: String,
        /// Enable or disable the category entirely
        #[arg(long)]
        enabled: Option<bool>,
        /// Deliver via the realtime channel
        #[arg(long)]
        realtime: Option<bool>,
        /// Deliver via email
        #[arg(long)]
        email: Option<bool>,
    },
}

/// Notification display row for table output
#[derive(Debug, Serialize, Tabled)]
struct NotificationRow {
    /// Notification ID
    id: String,
    /// Title
    title: String,
    /// Kind
    kind: String,
    /// Read marker
    read: String,
    /// Created at
    created_at: String,
}

/// Execute notification commands
pub async fn execute(
    args: &NotificationArgs,
    context: &ClientContext,
    format: OutputFormat,
) -> Result<(), AppError> {
    let profile = context.require_session().await?;

    match &args.command {
        NotificationCommand::List => {
            let list = context.api.list_notifications(profile.role).await?;

            let rows: Vec<NotificationRow> = list
                .notifications
                .iter()
                .map(|n| NotificationRow {
                    id: n.id.to_string(),
                    title: n.title.clone(),
                    kind: n.kind.clone(),
                    read: (if n.is_read { "yes" } else { "no" }).to_string(),
                    created_at: n.created_at.format("%Y-%m-%d %H:%M").to_string(),
                })
                .collect();

            output::print_list(&rows, format);
            println!("{} unread", list.unread_count);
        }
        NotificationCommand::Read { id } => {
            context.api.mark_notification_read(*id).await?;
            output::print_success(&format!("Notification {} marked read", id));
        }
        NotificationCommand::ReadAll => {
            context.api.mark_all_notifications_read().await?;
            output::print_success("All notifications marked read");
        }
        NotificationCommand::Delete { id } => {
            context.api.delete_notification(*id).await?;
            output::print_success(&format!("Notification {} deleted", id));
        }
        NotificationCommand::Preferences => {
            let preferences = context.api.notification_preferences().await?;
            print_preferences(&preferences, format);
        }
        NotificationCommand::SetPreference {
            category,
            enabled,
            realtime,
            email,
        } => {
            let mut preferences = context.api.notification_preferences().await?;
            let slot = category_slot(&mut preferences, category)?;
            if let Some(enabled) = enabled {
                slot.enabled = *enabled;
            }
            if let Some(realtime) = realtime {
                slot.realtime = *realtime;
            }
            if let Some(email) = email {
                slot.email = *email;
            }

            let updated = context
                .api
                .update_notification_preferences(&preferences)
                .await?;
            output::print_success(&format!("Preferences for '{}' updated", category));
            print_preferences(&updated, format);
        }
    }

    Ok(())
}

/// Resolve a category name to its preference slot.
fn category_slot<'a>(
    preferences: &'a mut NotificationPreferences,
    category: &str,
) -> Result<&'a mut CategoryPreference, AppError> {
    match category {
        "session" => Ok(&mut preferences.session),
        "challenge" => Ok(&mut preferences.challenge),
        "chat" => Ok(&mut preferences.chat),
        "wallet" => Ok(&mut preferences.wallet),
        "system" => Ok(&mut preferences.system),
        other => Err(AppError::validation(format!(
            "Unknown category '{other}'. Expected one of: session, challenge, chat, wallet, system"
        ))),
    }
}

/// Preference display row for table output
#[derive(Debug, Serialize, Tabled)]
struct PreferenceRow {
    /// Category name
    category: String,
    /// Enabled marker
    enabled: bool,
    /// Realtime delivery marker
    realtime: bool,
    /// Email delivery marker
    email: bool,
}

fn print_preferences(preferences: &NotificationPreferences, format: OutputFormat) {
    let rows = [
        ("session", &preferences.session),
        ("challenge", &preferences.challenge),
        ("chat", &preferences.chat),
        ("wallet", &preferences.wallet),
        ("system", &preferences.system),
    ]
    .into_iter()
    .map(|(name, pref)| PreferenceRow {
        category: name.to_string(),
        enabled: pref.enabled,
        realtime: pref.realtime,
        email: pref.email,
    })
    .collect::<Vec<_>>();

    output::print_list(&rows, format);
}
