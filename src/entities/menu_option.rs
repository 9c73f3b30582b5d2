//! Menu option entity - A named category under one of the two server menus.
//!
//! Options group stock items: users pick an option from a select menu and the
//! bot dispenses a random stock line assigned to it. Discord renders at most
//! 25 select-menu entries, so each (server, menu) pair holds at most 25 rows;
//! the cap is enforced in [`crate::core::options::add_option`].

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Menu option database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "menu_options")]
pub struct Model {
    /// Unique identifier for the option
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Discord guild id this option belongs to
    pub server_id: String,
    /// Display name shown in the select menu (not unique per menu)
    pub name: String,
    /// Which menu slot the option lives under (1 or 2)
    pub menu_number: i32,
    /// When the option was created; menus list options in creation order
    pub created_at: DateTimeUtc,
}

/// Defines relationships between `MenuOption` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One option has many stock items
    #[sea_orm(has_many = "super::stock_item::Entity")]
    StockItems,
}

impl Related<super::stock_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StockItems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
