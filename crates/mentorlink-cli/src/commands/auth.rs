//! Login, signup, logout, and profile commands.

use clap::Args;
use dialoguer::{Input, Password};

use mentorlink_auth::AuthOutcome;
use mentorlink_core::error::AppError;
use mentorlink_entity::user::UserRole;

use crate::output::{self, OutputFormat};

use super::ClientContext;

/// Arguments for `login`
#[derive(Debug, Args)]
pub struct LoginArgs {
    /// Login email (prompted when omitted)
    #[arg(short, long)]
    pub email: Option<String>,
}

/// Arguments for `signup`
#[derive(Debug, Args)]
pub struct SignupArgs {
    /// Display name
    #[arg(short, long)]
    pub name: String,
    /// Login email
    #[arg(short, long)]
    pub email: String,
    /// Role: innovator, solver, mentor, or mentee
    #[arg(short, long)]
    pub role: String,
}

/// Arguments for `profile`
#[derive(Debug, Args)]
pub struct ProfileArgs {
    /// Re-fetch the profile from the server instead of showing the
    /// bootstrap result
    #[arg(long)]
    pub refresh: bool,
}

/// Execute `login`
pub async fn login(args: &LoginArgs, context: &ClientContext) -> Result<(), AppError> {
    let email = match &args.email {
        Some(email) => email.clone(),
        None => Input::new()
            .with_prompt("Email")
            .interact_text()
            .map_err(|e| AppError::internal(format!("Failed to read email: {e}")))?,
    };
    let password = Password::new()
        .with_prompt("Password")
        .interact()
        .map_err(|e| AppError::internal(format!("Failed to read password: {e}")))?;

    match context.session.login(&email, &password).await {
        AuthOutcome::Success(profile) => {
            output::print_success(&format!(
                "Logged in as {} ({})",
                profile.name, profile.role
            ));
            Ok(())
        }
        AuthOutcome::Rejected { message } => Err(AppError::authentication(message)),
    }
}

/// Execute `signup`
pub async fn signup(args: &SignupArgs, context: &ClientContext) -> Result<(), AppError> {
    let role: UserRole = args.role.parse()?;
    let password = Password::new()
        .with_prompt("Password")
        .with_confirmation("Confirm password", "Passwords do not match")
        .interact()
        .map_err(|e| AppError::internal(format!("Failed to read password: {e}")))?;

    match context
        .session
        .signup(&args.name, &args.email, &password, role)
        .await
    {
        AuthOutcome::Success(profile) => {
            output::print_success(&format!(
                "Account created; logged in as {} ({})",
                profile.name, profile.role
            ));
            Ok(())
        }
        AuthOutcome::Rejected { message } => Err(AppError::validation(message)),
    }
}

/// Execute `logout`
pub async fn logout(context: &ClientContext) -> Result<(), AppError> {
    // Bootstrap first so the server notification carries the token.
    context.session.bootstrap().await;
    context.session.logout().await;
    output::print_success("Logged out");
    Ok(())
}

/// Execute `profile`
pub async fn profile(
    args: &ProfileArgs,
    context: &ClientContext,
    format: OutputFormat,
) -> Result<(), AppError> {
    let profile = context.require_session().await?;
    let profile = if args.refresh {
        context.session.refresh_profile().await?
    } else {
        profile
    };

    match format {
        OutputFormat::Json => output::print_item(&profile, format),
        OutputFormat::Table => {
            output::print_kv("Name", &profile.name);
            output::print_kv("Email", &profile.email);
            output::print_kv("Role", profile.role.as_str());
            output::print_kv("User ID", &profile.id.to_string());
            if let Some(bio) = &profile.bio {
                output::print_kv("Bio", bio);
            }
            output::print_kv(
                "Member since",
                &profile.created_at.format("%Y-%m-%d").to_string(),
            );
        }
    }
    Ok(())
}
