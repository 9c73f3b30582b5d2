//! Discord interaction handlers
//!
//! This module provides handlers for Discord interactions that arrive outside
//! the command framework: select-menu picks and refresh-button clicks.

/// Component handlers for the stock select menus and refresh buttons
pub mod components;

use crate::bot::BotData;
use crate::errors::{Error, Result};
use poise::serenity_prelude as serenity;
use tracing::info;

/// Dispatches raw gateway events to the component handlers.
pub async fn handle_event(
    ctx: &serenity::Context,
    event: &serenity::FullEvent,
    _framework: poise::FrameworkContext<'_, BotData, Error>,
    data: &BotData,
) -> Result<()> {
    match event {
        serenity::FullEvent::Ready { data_about_bot } => {
            info!("Bot is ready as {}", data_about_bot.user.name);
        }
        serenity::FullEvent::InteractionCreate { interaction } => {
            if let serenity::Interaction::Component(component) = interaction {
                components::handle_component(ctx, component, data).await;
            }
        }
        _ => {}
    }
    Ok(())
}
