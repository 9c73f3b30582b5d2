//! Bot layer - Discord-specific interface and interaction handlers.
//!
//! This module provides the Discord interface for the `StockVend` application:
//! the `!menu1`/`!menu2` prefix commands that post select menus, the component
//! handlers that run the dispense flow, and bot context management.

/// Discord command implementations (menu posting, general utilities)
pub mod commands;
/// Discord component handlers (select menus, refresh buttons)
pub mod handlers;

use crate::core::cooldown::CooldownTracker;
use crate::errors::{Error, Result};
use poise::serenity_prelude as serenity;
use sea_orm::DatabaseConnection;
use tracing::info;

/// Shared data available to all bot commands and handlers.
/// Holds the database connection and the process-wide cooldown tracker.
pub struct BotData {
    /// Database connection for all database operations
    pub database: DatabaseConnection,
    /// In-memory per-user/per-menu cooldown state
    pub cooldowns: CooldownTracker,
}

impl BotData {
    /// Creates a new `BotData` instance with the given database connection
    /// and a fresh cooldown tracker.
    #[must_use]
    pub fn new(database: DatabaseConnection) -> Self {
        Self {
            database,
            cooldowns: CooldownTracker::new(),
        }
    }
}

/// Context alias used by all commands
pub type Context<'a> = poise::Context<'a, BotData, Error>;

#[allow(clippy::panic)] // Failing setup means the bot cannot run at all
async fn on_error(error: poise::FrameworkError<'_, BotData, Error>) {
    match error {
        poise::FrameworkError::Setup { error, .. } => {
            panic!("Failed to start bot: {error:?}");
        }
        poise::FrameworkError::Command { error, ctx, .. } => {
            tracing::error!("Error in command `{}`: {:?}", ctx.command().name, error);
            if let Err(e) = ctx.say("Something went wrong running that command.").await {
                tracing::error!("Failed to send error message: {e}");
            }
        }
        error => {
            if let Err(e) = poise::builtins::on_error(error).await {
                tracing::error!("Error while handling error: {e}");
            }
        }
    }
}

/// Builds the Poise framework and runs the Discord client until it stops.
pub async fn run_bot(token: String, database: DatabaseConnection) -> Result<()> {
    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: vec![commands::menu1(), commands::menu2(), commands::ping()],
            prefix_options: poise::PrefixFrameworkOptions {
                prefix: Some("!".to_string()),
                ..Default::default()
            },
            on_error: |error| Box::pin(on_error(error)),
            event_handler: |ctx, event, framework, data| {
                Box::pin(handlers::handle_event(ctx, event, framework, data))
            },
            ..Default::default()
        })
        .setup(move |ctx, ready, framework| {
            Box::pin(async move {
                info!("Logged in as {}", ready.user.name);
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                Ok(BotData::new(database))
            })
        })
        .build();

    // The bot needs guild + message events and message content for the
    // `!menu1`/`!menu2` prefix commands.
    let intents = serenity::GatewayIntents::GUILDS
        | serenity::GatewayIntents::GUILD_MESSAGES
        | serenity::GatewayIntents::MESSAGE_CONTENT;

    info!("Setting up Serenity client for Poise framework...");
    let mut client = serenity::Client::builder(&token, intents)
        .framework(framework)
        .await
        .map_err(Error::from)?;

    client.start().await.map_err(Error::from)
}
