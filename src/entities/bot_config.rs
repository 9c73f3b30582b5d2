//! Bot config entity - Per-server dispensing policy.
//!
//! One row per Discord guild, upserted by the dashboard and read by the bot on
//! every select-menu interaction. A missing row reads as the defaults in
//! [`crate::core::bot_config`].

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Bot configuration database model - one row per server
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "bot_configs")]
pub struct Model {
    /// Discord guild id (primary key, one config per server)
    #[sea_orm(primary_key, auto_increment = false)]
    pub server_id: String,
    /// Seconds a user must wait between menu 1 dispenses
    pub menu1_cooldown: i64,
    /// Seconds a user must wait between menu 2 dispenses
    pub menu2_cooldown: i64,
    /// Whether menu 1 stock is deleted after being shown to a user
    pub menu1_delete_on_use: bool,
    /// Whether menu 2 stock is deleted after being shown to a user
    pub menu2_delete_on_use: bool,
}

/// `BotConfig` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
