//! Menu posting commands - `!menu1` and `!menu2`.
//!
//! Each command posts the select menu for its slot, built from the server's
//! current options, together with a refresh button so stale menus can be
//! rebuilt in place without re-running the command.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::bot::Context;
    use crate::bot::handlers::components::build_menu_components;
    use crate::core::options;
    use crate::errors::Result;

    /// Posts the select menu for menu slot 1.
    #[poise::command(prefix_command, guild_only)]
    pub async fn menu1(ctx: Context<'_>) -> Result<()> {
        send_menu(ctx, 1).await
    }

    /// Posts the select menu for menu slot 2.
    #[poise::command(prefix_command, guild_only)]
    pub async fn menu2(ctx: Context<'_>) -> Result<()> {
        send_menu(ctx, 2).await
    }

    /// Shared body for both menu commands.
    async fn send_menu(ctx: Context<'_>, menu_number: i32) -> Result<()> {
        let Some(guild_id) = ctx.guild_id() else {
            // guild_only already guards this; belt for direct invocations
            ctx.say("This command only works inside a server.").await?;
            return Ok(());
        };
        let server_id = guild_id.to_string();

        let options =
            options::get_server_options(&ctx.data().database, &server_id, menu_number).await?;

        if options.is_empty() {
            ctx.say(format!(
                "No options are available for menu {menu_number} on this server."
            ))
            .await?;
            return Ok(());
        }

        // Discord caps select menus at 25 entries; warn when options were cut
        if options.len() > options::MAX_OPTIONS_PER_MENU {
            ctx.say(format!(
                "⚠️ This menu has more than {} options. Only the first {} are shown due to Discord limits.",
                options::MAX_OPTIONS_PER_MENU,
                options::MAX_OPTIONS_PER_MENU
            ))
            .await?;
        }

        ctx.send(
            poise::CreateReply::default().components(build_menu_components(&options, menu_number)),
        )
        .await?;

        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
