//! Stock item entity - One opaque line of dispensable text.
//!
//! Each row holds a single line pasted into the dashboard (typically a
//! credential pair). Rows are consumed by the bot on dispense: read-only when
//! the menu's delete-on-use policy is off, claimed-and-deleted when it is on.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Stock item database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "stock_items")]
pub struct Model {
    /// Unique identifier for the stock item
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Discord guild id this stock belongs to
    pub server_id: String,
    /// ID of the menu option this stock is assigned to
    pub option_id: i64,
    /// The opaque payload handed to the user verbatim
    pub data: String,
    /// Which menu slot the stock lives under (1 or 2)
    pub menu_number: i32,
    /// When the row was inserted; listings show newest first
    pub created_at: DateTimeUtc,
}

/// Defines relationships between `StockItem` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each stock item belongs to one menu option
    #[sea_orm(
        belongs_to = "super::menu_option::Entity",
        from = "Column::OptionId",
        to = "super::menu_option::Column::Id"
    )]
    MenuOption,
}

impl Related<super::menu_option::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MenuOption.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
