//! Stock business logic - loading, listing, and consuming stock lines.
//!
//! Two read paths matter to the dispense flow: [`get_random_stock`] is a
//! lock-free peek used to decide "no stock" before a cooldown is consumed,
//! and [`take_random_stock`] is the claim path for delete-on-use menus - it
//! deletes the candidate row by primary key and checks rows-affected, so two
//! concurrent dispenses can never hand the same line to two users.

use crate::{
    entities::{MenuOption, StockItem, menu_option, stock_item},
    errors::{Error, Result},
};
use rand::Rng;
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};

/// Inserts a single stock line for an option.
pub async fn add_stock(
    db: &DatabaseConnection,
    server_id: &str,
    option_id: i64,
    data: &str,
    menu_number: i32,
) -> Result<stock_item::Model> {
    super::validate_menu_number(menu_number)?;

    let item = stock_item::ActiveModel {
        server_id: Set(server_id.to_string()),
        option_id: Set(option_id),
        data: Set(data.to_string()),
        menu_number: Set(menu_number),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    item.insert(db).await.map_err(Into::into)
}

/// Inserts one stock row per non-empty line of pasted text.
///
/// The whole batch runs in one transaction: a failing line rolls back every
/// earlier insert instead of leaving a partially-loaded paste behind.
pub async fn add_stock_lines(
    db: &DatabaseConnection,
    server_id: &str,
    option_id: i64,
    data: &str,
    menu_number: i32,
) -> Result<Vec<stock_item::Model>> {
    super::validate_menu_number(menu_number)?;

    let lines: Vec<&str> = data
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    if lines.is_empty() {
        return Err(Error::Validation {
            message: "Stock data contains no usable lines".to_string(),
        });
    }

    let txn = db.begin().await?;
    let now = chrono::Utc::now();
    let mut inserted = Vec::with_capacity(lines.len());

    for line in lines {
        let item = stock_item::ActiveModel {
            server_id: Set(server_id.to_string()),
            option_id: Set(option_id),
            data: Set(line.to_string()),
            menu_number: Set(menu_number),
            created_at: Set(now),
            ..Default::default()
        };
        inserted.push(item.insert(&txn).await?);
    }

    txn.commit().await?;
    Ok(inserted)
}

/// Lists all stock for a server's menu, newest first, joined with its option.
///
/// Rows whose option has vanished are filtered out rather than surfaced as
/// dangling entries.
pub async fn get_server_stock(
    db: &DatabaseConnection,
    server_id: &str,
    menu_number: i32,
) -> Result<Vec<(stock_item::Model, menu_option::Model)>> {
    let rows = StockItem::find()
        .find_also_related(MenuOption)
        .filter(stock_item::Column::ServerId.eq(server_id))
        .filter(stock_item::Column::MenuNumber.eq(menu_number))
        .order_by_desc(stock_item::Column::CreatedAt)
        .all(db)
        .await?;

    Ok(rows
        .into_iter()
        .filter_map(|(item, option)| option.map(|o| (item, o)))
        .collect())
}

/// Lists the stock assigned to one option, newest first.
pub async fn get_option_stock(
    db: &DatabaseConnection,
    server_id: &str,
    option_id: i64,
    menu_number: i32,
) -> Result<Vec<stock_item::Model>> {
    StockItem::find()
        .filter(stock_item::Column::ServerId.eq(server_id))
        .filter(stock_item::Column::OptionId.eq(option_id))
        .filter(stock_item::Column::MenuNumber.eq(menu_number))
        .order_by_desc(stock_item::Column::CreatedAt)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Picks a uniformly random stock row for an option without claiming it.
///
/// Read-only: used to answer "is there anything to dispense" and to serve
/// menus whose delete-on-use policy is off, where handing two users the same
/// line is expected behavior.
pub async fn get_random_stock(
    db: &DatabaseConnection,
    server_id: &str,
    option_id: i64,
    menu_number: i32,
) -> Result<Option<stock_item::Model>> {
    let mut items = matching_stock(db, server_id, option_id, menu_number).await?;
    if items.is_empty() {
        return Ok(None);
    }

    let index = rand::thread_rng().gen_range(0..items.len());
    Ok(Some(items.swap_remove(index)))
}

/// Atomically claims a random stock row, removing it from the pool.
///
/// The claim is a single `DELETE ... WHERE id = ?`; a rows-affected count of
/// zero means a concurrent dispense won the row, in which case the candidate
/// list is refreshed and another row is tried. Returns `None` once the pool
/// is exhausted.
pub async fn take_random_stock(
    db: &DatabaseConnection,
    server_id: &str,
    option_id: i64,
    menu_number: i32,
) -> Result<Option<stock_item::Model>> {
    loop {
        let mut items = matching_stock(db, server_id, option_id, menu_number).await?;
        if items.is_empty() {
            return Ok(None);
        }

        let index = rand::thread_rng().gen_range(0..items.len());
        let candidate = items.swap_remove(index);

        let result = StockItem::delete_many()
            .filter(stock_item::Column::Id.eq(candidate.id))
            .exec(db)
            .await?;

        if result.rows_affected > 0 {
            return Ok(Some(candidate));
        }
        // Lost the race for this row; re-query and try another.
    }
}

/// Deletes a single stock row, returning whether anything matched.
pub async fn delete_stock_item(
    db: &DatabaseConnection,
    server_id: &str,
    stock_id: i64,
    menu_number: i32,
) -> Result<bool> {
    let result = StockItem::delete_many()
        .filter(stock_item::Column::ServerId.eq(server_id))
        .filter(stock_item::Column::Id.eq(stock_id))
        .filter(stock_item::Column::MenuNumber.eq(menu_number))
        .exec(db)
        .await?;

    Ok(result.rows_affected > 0)
}

/// Wipes a menu: every stock row and every option for the (server, menu) pair,
/// in one transaction.
pub async fn delete_all_stock(
    db: &DatabaseConnection,
    server_id: &str,
    menu_number: i32,
) -> Result<()> {
    let txn = db.begin().await?;

    StockItem::delete_many()
        .filter(stock_item::Column::ServerId.eq(server_id))
        .filter(stock_item::Column::MenuNumber.eq(menu_number))
        .exec(&txn)
        .await?;

    MenuOption::delete_many()
        .filter(menu_option::Column::ServerId.eq(server_id))
        .filter(menu_option::Column::MenuNumber.eq(menu_number))
        .exec(&txn)
        .await?;

    txn.commit().await?;
    Ok(())
}

/// All stock rows matching a (server, option, menu) triple.
async fn matching_stock(
    db: &DatabaseConnection,
    server_id: &str,
    option_id: i64,
    menu_number: i32,
) -> Result<Vec<stock_item::Model>> {
    StockItem::find()
        .filter(stock_item::Column::ServerId.eq(server_id))
        .filter(stock_item::Column::OptionId.eq(option_id))
        .filter(stock_item::Column::MenuNumber.eq(menu_number))
        .all(db)
        .await
        .map_err(Into::into)
}
