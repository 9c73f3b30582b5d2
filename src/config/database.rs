//! Database configuration module for `StockVend`.
//!
//! This module handles database connection and table creation using `SeaORM`.
//! Production deployments point `DATABASE_URL` at hosted Postgres; tests and
//! local development fall back to a `SQLite` file. Tables are generated from
//! the entity definitions with `Schema::create_table_from_entity`, so the
//! schema always matches the Rust struct definitions without manual SQL.

use crate::entities::{ApolloConfig, BotConfig, MenuOption, ServerName, StockItem};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};

/// Establishes a connection to the database at the given URL.
///
/// This function handles connection errors and provides a clean interface for
/// database access throughout the application.
pub async fn create_connection(database_url: &str) -> Result<DatabaseConnection> {
    Database::connect(database_url).await.map_err(Into::into)
}

/// Creates all necessary database tables using `SeaORM`'s schema generation
/// from entity definitions.
///
/// Creates tables for menu options, stock items, bot configs, server names,
/// and Apollo configs. Intended for fresh `SQLite` files and test databases;
/// hosted deployments that already carry the schema skip this step.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let option_table = schema.create_table_from_entity(MenuOption);
    let stock_table = schema.create_table_from_entity(StockItem);
    let bot_config_table = schema.create_table_from_entity(BotConfig);
    let server_name_table = schema.create_table_from_entity(ServerName);
    let apollo_table = schema.create_table_from_entity(ApolloConfig);

    db.execute(builder.build(&option_table)).await?;
    db.execute(builder.build(&stock_table)).await?;
    db.execute(builder.build(&bot_config_table)).await?;
    db.execute(builder.build(&server_name_table)).await?;
    db.execute(builder.build(&apollo_table)).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{
        apollo_config::Model as ApolloConfigModel, bot_config::Model as BotConfigModel,
        menu_option::Model as MenuOptionModel, server_name::Model as ServerNameModel,
        stock_item::Model as StockItemModel,
    };
    use sea_orm::{EntityTrait, QuerySelect};

    #[tokio::test]
    async fn test_create_connection() -> Result<()> {
        // In-memory database to avoid schema conflicts with an existing file
        let db = create_connection("sqlite::memory:").await?;
        create_tables(&db).await?;

        // Verify the connection works with a simple query
        let _: Vec<MenuOptionModel> = MenuOption::find().limit(1).all(&db).await?;
        Ok(())
    }

    #[tokio::test]
    async fn test_create_tables() -> Result<()> {
        let db = create_connection("sqlite::memory:").await?;
        create_tables(&db).await?;

        // All five tables should exist and be queryable
        let _: Vec<MenuOptionModel> = MenuOption::find().limit(1).all(&db).await?;
        let _: Vec<StockItemModel> = StockItem::find().limit(1).all(&db).await?;
        let _: Vec<BotConfigModel> = BotConfig::find().limit(1).all(&db).await?;
        let _: Vec<ServerNameModel> = ServerName::find().limit(1).all(&db).await?;
        let _: Vec<ApolloConfigModel> = ApolloConfig::find().limit(1).all(&db).await?;

        Ok(())
    }
}
