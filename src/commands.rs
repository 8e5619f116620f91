//! Slash and `\`-prefixed commands, and the user-facing error mapping.

use crate::discord_bot::{lookup, to_embed, BotContext, Origin, Reply};
use poise::{CreateReply, FrameworkError};
use tracing::{debug, error};

pub type Error = anyhow::Error;
pub type Context<'a> = poise::Context<'a, BotContext, Error>;

pub const COMMAND_PREFIX: &str = "\\";

pub const MISSING_ARGUMENT_TEXT: &str =
    "It looks like you missed something! Please check your command and try again.";
pub const UNKNOWN_COMMAND_TEXT: &str =
    "I don't recognize that command. Use `\\help` to see what I can do!";
pub const GENERIC_ERROR_TEXT: &str = "An error occurred. Please try again later.";

const HELP_FOOTER: &str = "You can also just say `tell me about <character>`.";

pub fn commands() -> Vec<poise::Command<BotContext, Error>> {
    vec![lore(), help()]
}

pub fn prefix_options() -> poise::PrefixFrameworkOptions<BotContext, Error> {
    poise::PrefixFrameworkOptions {
        prefix: Some(COMMAND_PREFIX.into()),
        ..Default::default()
    }
}

/// Fetch lore for a specific character!
#[poise::command(slash_command, prefix_command)]
pub async fn lore(
    ctx: Context<'_>,
    #[description = "Name of the character"]
    #[rest]
    character_name: String,
) -> Result<(), Error> {
    let origin = match ctx {
        poise::Context::Application(_) => Origin::Slash,
        poise::Context::Prefix(_) => Origin::Message,
    };

    let reply = match lookup(&character_name, &ctx.data().knowledge_base, origin) {
        Reply::Embed(rendered) => CreateReply::default().embed(to_embed(&rendered)),
        Reply::Text(text) => CreateReply::default().content(text),
    };
    ctx.send(reply).await?;
    Ok(())
}

/// Show what I can do
#[poise::command(prefix_command)]
pub async fn help(
    ctx: Context<'_>,
    #[description = "Command to show help about"] command: Option<String>,
) -> Result<(), Error> {
    let config = poise::builtins::HelpConfiguration {
        extra_text_at_bottom: HELP_FOOTER,
        ..Default::default()
    };
    poise::builtins::help(ctx, command.as_deref(), config).await?;
    Ok(())
}

/// A prefix with no command name right after it, as in `\` or `\ hi`.
pub fn is_empty_invocation(content: &str) -> bool {
    content
        .strip_prefix(COMMAND_PREFIX)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with(char::is_whitespace))
}

pub async fn on_error(error: FrameworkError<'_, BotContext, Error>) {
    match error {
        FrameworkError::ArgumentParse { ctx, error, .. } => {
            debug!("Bad arguments for {}: {}", ctx.command().name, error);
            if let Err(e) = ctx.say(MISSING_ARGUMENT_TEXT).await {
                error!("Failed to send error reply: {}", e);
            }
        }
        FrameworkError::UnknownCommand { ctx, msg, .. } => {
            if is_empty_invocation(&msg.content) {
                return;
            }
            debug!("Unknown command: {}", msg.content);
            if let Err(e) = msg.channel_id.say(&ctx.http, UNKNOWN_COMMAND_TEXT).await {
                error!("Failed to send error reply: {}", e);
            }
        }
        other => {
            error!("Command error: {}", other);
            if let Some(ctx) = other.ctx() {
                if let Err(e) = ctx.say(GENERIC_ERROR_TEXT).await {
                    error!("Failed to send error reply: {}", e);
                }
            }
        }
    }
}
