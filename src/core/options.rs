//! Menu option business logic - create, list, rename, and delete options.
//!
//! Options are the named categories users pick from a menu's select component.
//! Discord renders at most 25 select-menu entries, so creation enforces a
//! 25-option cap per (server, menu) inside a single transaction rather than
//! with a separate count-then-insert round trip.

use crate::{
    entities::{MenuOption, StockItem, menu_option, stock_item},
    errors::{Error, Result},
};
use sea_orm::{PaginatorTrait, QueryOrder, Set, TransactionTrait, prelude::*};

/// Discord's select-menu entry limit, and therefore ours.
pub const MAX_OPTIONS_PER_MENU: usize = 25;

/// Retrieves all options for a server's menu, in creation order.
///
/// This is the listing both the bot's select menu and the dashboard table are
/// built from.
pub async fn get_server_options(
    db: &DatabaseConnection,
    server_id: &str,
    menu_number: i32,
) -> Result<Vec<menu_option::Model>> {
    MenuOption::find()
        .filter(menu_option::Column::ServerId.eq(server_id))
        .filter(menu_option::Column::MenuNumber.eq(menu_number))
        .order_by_asc(menu_option::Column::CreatedAt)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Creates a new option under a server's menu.
///
/// The existing-option count and the insert run inside one transaction so two
/// concurrent requests cannot both squeeze past the cap; the 26th option is
/// rejected with [`Error::OptionLimitReached`] and never created.
pub async fn add_option(
    db: &DatabaseConnection,
    server_id: &str,
    name: &str,
    menu_number: i32,
) -> Result<menu_option::Model> {
    super::validate_menu_number(menu_number)?;
    if name.trim().is_empty() {
        return Err(Error::Validation {
            message: "Option name cannot be empty".to_string(),
        });
    }

    let txn = db.begin().await?;

    let existing = MenuOption::find()
        .filter(menu_option::Column::ServerId.eq(server_id))
        .filter(menu_option::Column::MenuNumber.eq(menu_number))
        .count(&txn)
        .await?;

    if existing >= MAX_OPTIONS_PER_MENU as u64 {
        return Err(Error::OptionLimitReached {
            limit: MAX_OPTIONS_PER_MENU as u64,
        });
    }

    let option = menu_option::ActiveModel {
        server_id: Set(server_id.to_string()),
        name: Set(name.trim().to_string()),
        menu_number: Set(menu_number),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    let result = option.insert(&txn).await?;
    txn.commit().await?;

    Ok(result)
}

/// Renames an option, returning the updated row.
///
/// Errors with [`Error::OptionNotFound`] when the option does not exist for
/// the server, matching the dashboard's "option does not exist" failure.
pub async fn update_option_name(
    db: &DatabaseConnection,
    server_id: &str,
    option_id: i64,
    new_name: &str,
) -> Result<menu_option::Model> {
    if new_name.trim().is_empty() {
        return Err(Error::Validation {
            message: "Option name cannot be empty".to_string(),
        });
    }

    let option = MenuOption::find_by_id(option_id)
        .filter(menu_option::Column::ServerId.eq(server_id))
        .one(db)
        .await?
        .ok_or(Error::OptionNotFound { option_id })?;

    let mut active: menu_option::ActiveModel = option.into();
    active.name = Set(new_name.trim().to_string());

    active.update(db).await.map_err(Into::into)
}

/// Deletes an option and every stock item referencing it.
///
/// Stock rows go first, then the option, inside one transaction - no orphan
/// stock remains queryable for the option afterwards.
pub async fn delete_option(db: &DatabaseConnection, server_id: &str, option_id: i64) -> Result<()> {
    let txn = db.begin().await?;

    let option = MenuOption::find_by_id(option_id)
        .filter(menu_option::Column::ServerId.eq(server_id))
        .one(&txn)
        .await?
        .ok_or(Error::OptionNotFound { option_id })?;

    StockItem::delete_many()
        .filter(stock_item::Column::ServerId.eq(server_id))
        .filter(stock_item::Column::OptionId.eq(option_id))
        .exec(&txn)
        .await?;

    let active: menu_option::ActiveModel = option.into();
    active.delete(&txn).await?;

    txn.commit().await?;
    Ok(())
}
