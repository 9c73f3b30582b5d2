//! Server name cache operations.
//!
//! The dashboard saves guild names here so it can label servers without a
//! Discord API call per page load.

use crate::{
    entities::{ServerName, server_name},
    errors::Result,
};
use sea_orm::{Set, prelude::*, sea_query::OnConflict};

/// Looks up the cached name for a server, `None` when never cached.
pub async fn get_server_name(
    db: &DatabaseConnection,
    server_id: &str,
) -> Result<Option<server_name::Model>> {
    ServerName::find_by_id(server_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Inserts or refreshes the cached name for a server.
pub async fn upsert_server_name(
    db: &DatabaseConnection,
    server_id: &str,
    name: &str,
) -> Result<server_name::Model> {
    let active = server_name::ActiveModel {
        server_id: Set(server_id.to_string()),
        name: Set(name.to_string()),
    };

    ServerName::insert(active)
        .on_conflict(
            OnConflict::column(server_name::Column::ServerId)
                .update_column(server_name::Column::Name)
                .to_owned(),
        )
        .exec(db)
        .await?;

    Ok(server_name::Model {
        server_id: server_id.to_string(),
        name: name.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::setup_test_db;

    #[tokio::test]
    async fn test_upsert_and_get_server_name() -> Result<()> {
        let db = setup_test_db().await?;

        assert!(get_server_name(&db, "server").await?.is_none());

        upsert_server_name(&db, "server", "My Guild").await?;
        let cached = get_server_name(&db, "server").await?;
        assert_eq!(cached.map(|c| c.name).as_deref(), Some("My Guild"));

        upsert_server_name(&db, "server", "Renamed Guild").await?;
        let cached = get_server_name(&db, "server").await?;
        assert_eq!(cached.map(|c| c.name).as_deref(), Some("Renamed Guild"));
        Ok(())
    }
}
