//! Component handlers - the select-menu dispense flow and the refresh button.
//!
//! Custom ids follow the dashboard's scheme: `select-stock-{menu}` for the
//! string select and `refresh-menu-{menu}` for the button. Every failure is
//! logged in full server-side and answered with a generic ephemeral reply.

use crate::bot::BotData;
use crate::core::{
    dispense::{DispenseOutcome, dispense},
    options,
};
use crate::entities::menu_option;
use crate::errors::Result;
use poise::serenity_prelude as serenity;
use tracing::error;

/// Custom id prefix for the stock select menu
const SELECT_PREFIX: &str = "select-stock-";
/// Custom id prefix for the refresh button
const REFRESH_PREFIX: &str = "refresh-menu-";

/// Builds the two component rows for a menu: the string select over the first
/// 25 options, and the refresh button beneath it.
#[must_use]
pub fn build_menu_components(
    options: &[menu_option::Model],
    menu_number: i32,
) -> Vec<serenity::CreateActionRow> {
    let entries: Vec<serenity::CreateSelectMenuOption> = options
        .iter()
        .take(options::MAX_OPTIONS_PER_MENU)
        .map(|option| {
            serenity::CreateSelectMenuOption::new(option.name.clone(), option.id.to_string())
                .description(format!("Option: {}", option.name))
        })
        .collect();

    let select = serenity::CreateSelectMenu::new(
        format!("{SELECT_PREFIX}{menu_number}"),
        serenity::CreateSelectMenuKind::String { options: entries },
    )
    .placeholder(format!("Pick an option from menu {menu_number}"));

    let refresh = serenity::CreateButton::new(format!("{REFRESH_PREFIX}{menu_number}"))
        .label("Refresh")
        .style(serenity::ButtonStyle::Secondary);

    vec![
        serenity::CreateActionRow::SelectMenu(select),
        serenity::CreateActionRow::Buttons(vec![refresh]),
    ]
}

/// Entry point for component interactions; routes by custom id and converts
/// any failure into a generic ephemeral error reply.
pub async fn handle_component(
    ctx: &serenity::Context,
    component: &serenity::ComponentInteraction,
    data: &BotData,
) {
    let custom_id = component.data.custom_id.clone();

    let result = if let Some(menu_number) = parse_menu_custom_id(&custom_id, SELECT_PREFIX) {
        handle_select(ctx, component, data, menu_number).await
    } else if let Some(menu_number) = parse_menu_custom_id(&custom_id, REFRESH_PREFIX) {
        handle_refresh(ctx, component, data, menu_number).await
    } else {
        Ok(())
    };

    if let Err(e) = result {
        error!("Error handling component `{custom_id}`: {e:?}");
        let reply = serenity::CreateInteractionResponseMessage::new()
            .content("Something went wrong processing your selection.")
            .ephemeral(true);
        if let Err(e) = component
            .create_response(&ctx.http, serenity::CreateInteractionResponse::Message(reply))
            .await
        {
            error!("Failed to send error reply: {e}");
        }
    }
}

/// Runs the dispense flow for a select-menu pick and renders the outcome.
async fn handle_select(
    ctx: &serenity::Context,
    component: &serenity::ComponentInteraction,
    data: &BotData,
    menu_number: i32,
) -> Result<()> {
    let Some(guild_id) = component.guild_id else {
        return Ok(());
    };

    let serenity::ComponentInteractionDataKind::StringSelect { values } = &component.data.kind
    else {
        return Ok(());
    };

    let Some(option_id) = values.first().and_then(|v| v.parse::<i64>().ok()) else {
        return reply_ephemeral(
            ctx,
            component,
            "Something went wrong processing your selection.",
        )
        .await;
    };

    let server_id = guild_id.to_string();
    let user_id = component.user.id.to_string();

    let outcome = dispense(
        &data.database,
        &data.cooldowns,
        &server_id,
        &user_id,
        option_id,
        menu_number,
    )
    .await?;

    let content = match outcome {
        DispenseOutcome::NoStock => {
            format!("No stock is available for this option on menu {menu_number}.")
        }
        DispenseOutcome::OnCooldown { seconds_remaining } => format!(
            "Please wait {seconds_remaining} seconds before pulling from menu {menu_number} again."
        ),
        DispenseOutcome::ClaimFailed => {
            "Something went wrong processing your request. Please try again.".to_string()
        }
        DispenseOutcome::Dispensed { data } => {
            format!("🎉 Here is your stock from menu {menu_number}:\n```\n{data}\n```")
        }
    };

    reply_ephemeral(ctx, component, &content).await
}

/// Rebuilds the select menu from current options and updates the message in
/// place.
async fn handle_refresh(
    ctx: &serenity::Context,
    component: &serenity::ComponentInteraction,
    data: &BotData,
    menu_number: i32,
) -> Result<()> {
    let Some(guild_id) = component.guild_id else {
        return Ok(());
    };
    let server_id = guild_id.to_string();

    let options = options::get_server_options(&data.database, &server_id, menu_number).await?;

    if options.is_empty() {
        return reply_ephemeral(
            ctx,
            component,
            &format!("No options are available for menu {menu_number} on this server."),
        )
        .await;
    }

    let update = serenity::CreateInteractionResponseMessage::new()
        .components(build_menu_components(&options, menu_number));
    component
        .create_response(
            &ctx.http,
            serenity::CreateInteractionResponse::UpdateMessage(update),
        )
        .await?;

    Ok(())
}

/// Extracts the menu number from a prefixed custom id, accepting only the two
/// real menu slots.
fn parse_menu_custom_id(custom_id: &str, prefix: &str) -> Option<i32> {
    let menu_number: i32 = custom_id.strip_prefix(prefix)?.parse().ok()?;
    (menu_number == 1 || menu_number == 2).then_some(menu_number)
}

/// Sends an ephemeral text reply to a component interaction.
async fn reply_ephemeral(
    ctx: &serenity::Context,
    component: &serenity::ComponentInteraction,
    content: &str,
) -> Result<()> {
    let reply = serenity::CreateInteractionResponseMessage::new()
        .content(content)
        .ephemeral(true);
    component
        .create_response(&ctx.http, serenity::CreateInteractionResponse::Message(reply))
        .await?;
    Ok(())
}
