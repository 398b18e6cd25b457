//! Handlers for the conversational basics: launch, help, goodbye, fallback
//! and the error apology

use tracing::{debug, error, info};

use super::context::TurnContext;
use crate::i18n::Translator;
use crate::models::response::{ResponseBuilder, SessionContinuation};
use crate::utils::errors::{Result, SkillError};

/// Welcome the user, long form on their first run
pub async fn handle_launch(ctx: &mut TurnContext<'_>) -> Result<ResponseBuilder> {
    ctx.attributes.return_to_menu();

    let welcome = if ctx.attributes.first_run {
        ctx.translator.t("WELCOME_LONG")
    } else {
        ctx.translator.t("WELCOME_BACK")
    };
    debug!(first_run = ctx.attributes.first_run, "Launching skill");

    Ok(ResponseBuilder::new()
        .speak(ctx.with_main_menu(&welcome))
        .reprompt(ctx.translator.t("MAIN_MENU")))
}

/// Save the user durably, then say goodbye and end the session
pub async fn handle_cancel_and_stop(ctx: &mut TurnContext<'_>) -> Result<ResponseBuilder> {
    ctx.attributes.mark_returning();
    ctx.persist().await?;
    info!(user_id = ctx.user_id()?, "User saved on exit");

    Ok(ResponseBuilder::new()
        .speak(ctx.translator.t("GOODBYE"))
        .with_continuation(SessionContinuation::End))
}

pub async fn handle_help(ctx: &mut TurnContext<'_>) -> Result<ResponseBuilder> {
    Ok(ResponseBuilder::new()
        .speak(ctx.translator.t("HELP"))
        .reprompt(ctx.translator.t("MAIN_MENU")))
}

/// Save the user durably; the platform expects no speech here
pub async fn handle_session_ended(ctx: &mut TurnContext<'_>) -> Result<ResponseBuilder> {
    let reason = ctx.envelope.request.reason.as_deref().unwrap_or("unknown");
    info!(reason = reason, "Session ended");

    ctx.attributes.mark_returning();
    ctx.persist().await?;

    Ok(ResponseBuilder::new().with_continuation(SessionContinuation::End))
}

/// Anything no other route claims
pub async fn handle_unhandled(ctx: &mut TurnContext<'_>) -> Result<ResponseBuilder> {
    debug!(intent = ctx.intent, state = %ctx.attributes.state, "No route matched");
    Ok(fallback(ctx))
}

pub(crate) fn fallback(ctx: &TurnContext<'_>) -> ResponseBuilder {
    ResponseBuilder::new()
        .speak(ctx.with_main_menu(&ctx.translator.t("FALLBACK")))
        .reprompt(ctx.translator.t("MAIN_MENU"))
}

/// Generic apology for a failed turn. The cause is logged, never spoken.
pub fn error_response(translator: &Translator<'_>, err: &SkillError) -> ResponseBuilder {
    error!(
        error = %err,
        severity = %err.severity(),
        recoverable = err.is_recoverable(),
        "Turn failed"
    );

    let menu = translator.t("MAIN_MENU");
    ResponseBuilder::new()
        .speak(format!("{} {}", translator.t("ERROR"), menu))
        .reprompt(menu)
}
