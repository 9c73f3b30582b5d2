//! Shared test utilities for `StockVend`.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test entities with sensible defaults.

use crate::{
    core::{options, stock},
    entities,
    errors::Result,
};
use sea_orm::DatabaseConnection;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Creates a test option with sensible defaults.
///
/// # Defaults
/// * `server_id`: `"server"`
/// * `menu_number`: 1
pub async fn create_test_option(
    db: &DatabaseConnection,
    name: &str,
) -> Result<entities::menu_option::Model> {
    options::add_option(db, "server", name, 1).await
}

/// Creates a test stock line under an option.
pub async fn create_test_stock(
    db: &DatabaseConnection,
    option_id: i64,
    data: &str,
) -> Result<entities::stock_item::Model> {
    stock::add_stock(db, "server", option_id, data, 1).await
}

/// Sets up a complete test environment with one option on menu 1 of server
/// `"server"`. Returns (db, option) for common test scenarios.
pub async fn setup_with_option() -> Result<(DatabaseConnection, entities::menu_option::Model)> {
    let db = setup_test_db().await?;
    let option = create_test_option(&db, "netflix").await?;
    Ok((db, option))
}

/// Sets up a test environment with an option holding two stock lines.
/// Returns (db, option) with `"a:b"` and `"c:d"` loaded.
pub async fn setup_with_stock() -> Result<(DatabaseConnection, entities::menu_option::Model)> {
    let (db, option) = setup_with_option().await?;
    create_test_stock(&db, option.id, "a:b").await?;
    create_test_stock(&db, option.id, "c:d").await?;
    Ok((db, option))
}
