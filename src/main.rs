mod commands;
mod config;
mod discord_bot;
mod lore;
mod models;
mod render;

use crate::config::Config;
use crate::discord_bot::BotContext;
use crate::lore::KnowledgeBase;
use anyhow::Context as _;
use dotenv::dotenv;
use serenity::all::{Client, GatewayIntents, GuildId};
use std::process;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Error: {}", e);
            process::exit(1);
        }
    };

    let knowledge_base = match KnowledgeBase::load(&config.lore_path) {
        Ok(kb) => kb,
        Err(e) => {
            error!("Error: {}", e);
            process::exit(1);
        }
    };

    if knowledge_base.is_empty() {
        warn!("Lore file is empty, every lookup will miss");
    }

    let context = BotContext {
        knowledge_base,
        guild_id: GuildId::new(config.guild_id),
    };

    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: commands::commands(),
            prefix_options: commands::prefix_options(),
            on_error: |error| Box::pin(commands::on_error(error)),
            event_handler: |ctx, event, framework, data| {
                Box::pin(discord_bot::event_handler(ctx, event, framework, data))
            },
            ..Default::default()
        })
        .setup(move |ctx, ready, framework| {
            Box::pin(async move {
                discord_bot::on_ready(ctx, ready, &framework.options().commands, context.guild_id)
                    .await;
                Ok(context)
            })
        })
        .build();

    let intents = GatewayIntents::non_privileged() | GatewayIntents::MESSAGE_CONTENT;
    let mut client = Client::builder(&config.bot_token, intents)
        .framework(framework)
        .await
        .context("Failed to build Discord client")?;

    info!("Connecting to Discord...");
    client
        .start()
        .await
        .context("Discord client stopped with an error")?;

    Ok(())
}
