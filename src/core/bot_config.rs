//! Bot configuration business logic - per-server cooldowns and policies.
//!
//! A server without a stored row reads as the defaults (60 second cooldowns,
//! delete-on-use off), matching the dashboard's behavior of showing defaults
//! until the admin saves something.

use crate::{
    entities::{BotConfig, bot_config},
    errors::Result,
};
use sea_orm::{Set, prelude::*, sea_query::OnConflict};

/// Cooldown applied when a server has never saved a config.
pub const DEFAULT_COOLDOWN_SECS: i64 = 60;

/// Fetches a server's bot config, falling back to defaults when absent.
pub async fn get_bot_config(db: &DatabaseConnection, server_id: &str) -> Result<bot_config::Model> {
    let config = BotConfig::find_by_id(server_id).one(db).await?;
    Ok(config.unwrap_or_else(|| default_config(server_id)))
}

/// Inserts or updates a server's bot config and returns the stored row.
pub async fn upsert_bot_config(
    db: &DatabaseConnection,
    server_id: &str,
    menu1_cooldown: i64,
    menu2_cooldown: i64,
    menu1_delete_on_use: bool,
    menu2_delete_on_use: bool,
) -> Result<bot_config::Model> {
    let active = bot_config::ActiveModel {
        server_id: Set(server_id.to_string()),
        menu1_cooldown: Set(menu1_cooldown),
        menu2_cooldown: Set(menu2_cooldown),
        menu1_delete_on_use: Set(menu1_delete_on_use),
        menu2_delete_on_use: Set(menu2_delete_on_use),
    };

    BotConfig::insert(active)
        .on_conflict(
            OnConflict::column(bot_config::Column::ServerId)
                .update_columns([
                    bot_config::Column::Menu1Cooldown,
                    bot_config::Column::Menu2Cooldown,
                    bot_config::Column::Menu1DeleteOnUse,
                    bot_config::Column::Menu2DeleteOnUse,
                ])
                .to_owned(),
        )
        .exec(db)
        .await?;

    get_bot_config(db, server_id).await
}

/// The config a server gets before its admin has saved anything.
fn default_config(server_id: &str) -> bot_config::Model {
    bot_config::Model {
        server_id: server_id.to_string(),
        menu1_cooldown: DEFAULT_COOLDOWN_SECS,
        menu2_cooldown: DEFAULT_COOLDOWN_SECS,
        menu1_delete_on_use: false,
        menu2_delete_on_use: false,
    }
}

impl bot_config::Model {
    /// Cooldown seconds for the given menu slot.
    #[must_use]
    pub const fn cooldown_for(&self, menu_number: i32) -> i64 {
        if menu_number == 1 {
            self.menu1_cooldown
        } else {
            self.menu2_cooldown
        }
    }

    /// Delete-on-use policy for the given menu slot.
    #[must_use]
    pub const fn delete_on_use_for(&self, menu_number: i32) -> bool {
        if menu_number == 1 {
            self.menu1_delete_on_use
        } else {
            self.menu2_delete_on_use
        }
    }
}
