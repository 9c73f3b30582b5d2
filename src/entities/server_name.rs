//! Server name entity - Cache of Discord guild names.
//!
//! Stores the guild name alongside its id so the dashboard can label servers
//! without calling the Discord API on every page load.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Server name cache database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "server_names")]
pub struct Model {
    /// Discord guild id (primary key)
    #[sea_orm(primary_key, auto_increment = false)]
    pub server_id: String,
    /// Last known guild name
    pub name: String,
}

/// `ServerName` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
