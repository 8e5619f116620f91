use crate::commands::Error;
use crate::lore::{extract_trigger_query, KnowledgeBase};
use crate::render::{self, Palette, RenderedMessage};
use serenity::all::{
    ActivityData, Colour, Context, CreateEmbed, CreateEmbedFooter, CreateMessage, FullEvent,
    GuildId, Message, OnlineStatus, Ready,
};
use tracing::{error, info};

const PRESENCE: &str = "for lore requests";

/// Everything the handlers need, built once at startup.
pub struct BotContext {
    pub knowledge_base: KnowledgeBase,
    pub guild_id: GuildId,
}

#[derive(Debug, PartialEq)]
pub enum Reply {
    Embed(RenderedMessage),
    Text(String),
}

/// Where a lookup came from. Picks the embed colour and the not-found wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// "tell me about" and `\lore`.
    Message,
    /// `/lore`.
    Slash,
}

impl Origin {
    fn palette(self) -> Palette {
        match self {
            Origin::Message => Palette::Green,
            Origin::Slash => Palette::Blue,
        }
    }

    pub fn not_found(self, query: &str) -> String {
        match self {
            Origin::Message => format!(
                "Sorry, I couldn't find any lore for '{}'. Please check your spelling or try another name!",
                query
            ),
            Origin::Slash => format!(
                "Sorry, I couldn't find any lore for '{}'. Please check your spelling!",
                query
            ),
        }
    }
}

pub fn lookup(query: &str, kb: &KnowledgeBase, origin: Origin) -> Reply {
    let query = query.trim();
    match kb.resolve(query) {
        Some(record) => Reply::Embed(render::render(record, query, origin.palette())),
        None => {
            info!("No lore for '{}'", query);
            Reply::Text(origin.not_found(query))
        }
    }
}

/// Reply to a "tell me about" message. Anything else is left to the command framework.
pub fn reply_to_message(from_self: bool, content: &str, kb: &KnowledgeBase) -> Option<Reply> {
    if from_self {
        return None;
    }
    extract_trigger_query(content).map(|query| lookup(query, kb, Origin::Message))
}

pub fn to_embed(message: &RenderedMessage) -> CreateEmbed {
    let mut embed = CreateEmbed::new()
        .title(&message.title)
        .colour(Colour::new(message.color.rgb()))
        .fields(
            message
                .fields
                .iter()
                .map(|field| (field.name.as_str(), field.value.as_str(), field.inline)),
        );

    if let Some(description) = &message.description {
        embed = embed.description(description);
    }
    if let Some(footer) = &message.footer {
        embed = embed.footer(CreateEmbedFooter::new(footer));
    }
    if let Some(url) = &message.thumbnail {
        embed = embed.thumbnail(url);
    }
    embed
}

/// Guild command sync and presence, run once the gateway is ready.
pub async fn on_ready(
    ctx: &Context,
    ready: &Ready,
    commands: &[poise::Command<BotContext, Error>],
    guild_id: GuildId,
) {
    match poise::builtins::register_in_guild(ctx, commands, guild_id).await {
        Ok(()) => info!("Synced slash commands to guild {}", guild_id),
        Err(e) => error!("Failed to sync slash commands: {}", e),
    }

    ctx.set_presence(Some(ActivityData::watching(PRESENCE)), OnlineStatus::Online);
    info!(
        "{} is online, slash commands are synced, and ready to serve lore!",
        ready.user.name
    );
}

pub async fn event_handler(
    ctx: &Context,
    event: &FullEvent,
    _framework: poise::FrameworkContext<'_, BotContext, Error>,
    data: &BotContext,
) -> Result<(), Error> {
    if let FullEvent::Message { new_message } = event {
        on_message(ctx, new_message, data).await;
    }
    Ok(())
}

async fn on_message(ctx: &Context, msg: &Message, data: &BotContext) {
    let from_self = msg.author.id == ctx.cache.current_user().id;
    let Some(reply) = reply_to_message(from_self, &msg.content, &data.knowledge_base) else {
        return;
    };

    let sent = match reply {
        Reply::Embed(rendered) => {
            let builder = CreateMessage::new().embed(to_embed(&rendered));
            msg.channel_id.send_message(&ctx.http, builder).await
        }
        Reply::Text(text) => msg.channel_id.say(&ctx.http, text).await,
    };

    if let Err(e) = sent {
        error!("Failed to send reply to channel {}: {}", msg.channel_id, e);
    }
}
