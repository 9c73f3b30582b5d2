//! Apollo giveaway business logic - settings plus the pending-execution flag.
//!
//! The dashboard edits giveaway parameters here and requests executions; an
//! external worker polls for rows with `is_running = true` and a pending
//! payload. "At most one pending job per server" is enforced with a single
//! conditional `UPDATE ... WHERE is_running = false` checked by rows-affected,
//! so two concurrent execute requests cannot both win.

use crate::{
    entities::{ApolloConfig, apollo_config},
    errors::{Error, Result},
};
use sea_orm::{
    Set,
    prelude::*,
    sea_query::{Expr, OnConflict},
};
use serde::Deserialize;

/// Editable giveaway parameters, as saved from the dashboard panel.
#[derive(Debug, Clone, Deserialize)]
pub struct ApolloSettings {
    /// How long the giveaway stays open (e.g. `"1h"`)
    pub giveaway_duration: String,
    /// Number of winners drawn per giveaway
    pub winner_count: i32,
    /// Stock lines handed to each winner
    pub entries_per_winner: i32,
    /// How long winners have to respond (e.g. `"5m"`)
    pub response_window: String,
    /// Pause between consecutive giveaways (e.g. `"30m"`)
    pub idle_delay: String,
    /// Verification questions asked before entry
    pub questions: Vec<String>,
    /// Discord category the giveaway channels are created under
    pub category_id: Option<String>,
    /// Emoji override for the celebration message
    pub emoji_celebrate: Option<String>,
    /// Emoji override for the winner announcement
    pub emoji_trophy: Option<String>,
    /// Emoji override for countdown messages
    pub emoji_clock: Option<String>,
    /// Emoji override for error messages
    pub emoji_error: Option<String>,
    /// Emoji override for informational messages
    pub emoji_info: Option<String>,
    /// Emoji override for the closing message
    pub emoji_finish: Option<String>,
}

/// Fetches a server's Apollo config, creating the default row when absent.
///
/// Creation uses an insert that ignores primary-key conflicts, so two
/// concurrent first-time fetches both end up reading the same row.
pub async fn get_or_create_config(
    db: &DatabaseConnection,
    server_id: &str,
) -> Result<apollo_config::Model> {
    if let Some(config) = ApolloConfig::find_by_id(server_id).one(db).await? {
        return Ok(config);
    }

    let default = apollo_config::ActiveModel {
        server_id: Set(server_id.to_string()),
        is_running: Set(false),
        last_run: Set(None),
        giveaway_duration: Set("1h".to_string()),
        winner_count: Set(1),
        entries_per_winner: Set(1),
        response_window: Set("5m".to_string()),
        idle_delay: Set("30m".to_string()),
        questions: Set(serde_json::Value::Array(Vec::new())),
        category_id: Set(None),
        emoji_celebrate: Set(None),
        emoji_trophy: Set(None),
        emoji_clock: Set(None),
        emoji_error: Set(None),
        emoji_info: Set(None),
        emoji_finish: Set(None),
        pending_data: Set(None),
        pending_category: Set(None),
        execution_requested_at: Set(None),
    };

    ApolloConfig::insert(default)
        .on_conflict(
            OnConflict::column(apollo_config::Column::ServerId)
                .do_nothing()
                .to_owned(),
        )
        .do_nothing()
        .exec(db)
        .await?;

    ApolloConfig::find_by_id(server_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::Config {
            message: format!("Apollo config for {server_id} vanished after creation"),
        })
}

/// Saves the dashboard's giveaway settings, returning the stored row.
pub async fn update_settings(
    db: &DatabaseConnection,
    server_id: &str,
    settings: ApolloSettings,
) -> Result<apollo_config::Model> {
    let existing = get_or_create_config(db, server_id).await?;

    let mut active: apollo_config::ActiveModel = existing.into();
    active.giveaway_duration = Set(settings.giveaway_duration);
    active.winner_count = Set(settings.winner_count);
    active.entries_per_winner = Set(settings.entries_per_winner);
    active.response_window = Set(settings.response_window);
    active.idle_delay = Set(settings.idle_delay);
    active.questions = Set(serde_json::Value::from(settings.questions));
    active.category_id = Set(settings.category_id);
    active.emoji_celebrate = Set(settings.emoji_celebrate);
    active.emoji_trophy = Set(settings.emoji_trophy);
    active.emoji_clock = Set(settings.emoji_clock);
    active.emoji_error = Set(settings.emoji_error);
    active.emoji_info = Set(settings.emoji_info);
    active.emoji_finish = Set(settings.emoji_finish);

    active.update(db).await.map_err(Into::into)
}

/// Requests a giveaway execution: flips `is_running` and stashes the payload
/// for the worker.
///
/// The flip is conditional on `is_running = false`; when zero rows are
/// affected another request already holds the slot and
/// [`Error::GiveawayAlreadyRunning`] is returned.
pub async fn request_execution(
    db: &DatabaseConnection,
    server_id: &str,
    data_file: &str,
    category_id: &str,
) -> Result<()> {
    // Make sure the row exists before the conditional update can match it.
    get_or_create_config(db, server_id).await?;

    let result = ApolloConfig::update_many()
        .col_expr(apollo_config::Column::IsRunning, Expr::value(true))
        .col_expr(
            apollo_config::Column::PendingData,
            Expr::value(Some(data_file.to_string())),
        )
        .col_expr(
            apollo_config::Column::PendingCategory,
            Expr::value(Some(category_id.to_string())),
        )
        .col_expr(
            apollo_config::Column::ExecutionRequestedAt,
            Expr::value(Some(chrono::Utc::now())),
        )
        .filter(apollo_config::Column::ServerId.eq(server_id))
        .filter(apollo_config::Column::IsRunning.eq(false))
        .exec(db)
        .await?;

    if result.rows_affected == 0 {
        return Err(Error::GiveawayAlreadyRunning {
            server_id: server_id.to_string(),
        });
    }

    Ok(())
}

/// Stops any pending or running giveaway and clears the stashed payload.
///
/// Idempotent: stopping a server with nothing running is not an error.
pub async fn stop_execution(db: &DatabaseConnection, server_id: &str) -> Result<()> {
    ApolloConfig::update_many()
        .col_expr(apollo_config::Column::IsRunning, Expr::value(false))
        .col_expr(
            apollo_config::Column::PendingData,
            Expr::value(None::<String>),
        )
        .col_expr(
            apollo_config::Column::PendingCategory,
            Expr::value(None::<String>),
        )
        .col_expr(
            apollo_config::Column::ExecutionRequestedAt,
            Expr::value(None::<chrono::DateTime<chrono::Utc>>),
        )
        .filter(apollo_config::Column::ServerId.eq(server_id))
        .exec(db)
        .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::setup_test_db;

    fn sample_settings() -> ApolloSettings {
        ApolloSettings {
            giveaway_duration: "2h".to_string(),
            winner_count: 3,
            entries_per_winner: 2,
            response_window: "10m".to_string(),
            idle_delay: "1h".to_string(),
            questions: vec!["Are you human?".to_string()],
            category_id: Some("12345".to_string()),
            emoji_celebrate: Some("🎉".to_string()),
            emoji_trophy: None,
            emoji_clock: None,
            emoji_error: None,
            emoji_info: None,
            emoji_finish: None,
        }
    }

    #[tokio::test]
    async fn test_get_or_create_returns_defaults() -> Result<()> {
        let db = setup_test_db().await?;

        let config = get_or_create_config(&db, "server").await?;
        assert!(!config.is_running);
        assert_eq!(config.giveaway_duration, "1h");
        assert_eq!(config.winner_count, 1);
        assert!(config.pending_data.is_none());

        // Second fetch reads the same row instead of recreating it
        let again = get_or_create_config(&db, "server").await?;
        assert_eq!(again, config);
        Ok(())
    }

    #[tokio::test]
    async fn test_update_settings_persists() -> Result<()> {
        let db = setup_test_db().await?;

        let updated = update_settings(&db, "server", sample_settings()).await?;
        assert_eq!(updated.giveaway_duration, "2h");
        assert_eq!(updated.winner_count, 3);
        assert_eq!(
            updated.questions,
            serde_json::json!(["Are you human?"])
        );
        assert_eq!(updated.category_id.as_deref(), Some("12345"));
        Ok(())
    }

    #[tokio::test]
    async fn test_request_execution_is_first_wins() -> Result<()> {
        let db = setup_test_db().await?;

        request_execution(&db, "server", "a:b\nc:d", "cat-1").await?;

        let config = get_or_create_config(&db, "server").await?;
        assert!(config.is_running);
        assert_eq!(config.pending_data.as_deref(), Some("a:b\nc:d"));
        assert_eq!(config.pending_category.as_deref(), Some("cat-1"));
        assert!(config.execution_requested_at.is_some());

        // Second request while running loses
        let second = request_execution(&db, "server", "x:y", "cat-2").await;
        assert!(matches!(second, Err(Error::GiveawayAlreadyRunning { .. })));

        // The losing request must not have overwritten the payload
        let config = get_or_create_config(&db, "server").await?;
        assert_eq!(config.pending_data.as_deref(), Some("a:b\nc:d"));
        Ok(())
    }

    #[tokio::test]
    async fn test_stop_clears_pending_job() -> Result<()> {
        let db = setup_test_db().await?;

        request_execution(&db, "server", "a:b", "cat-1").await?;
        stop_execution(&db, "server").await?;

        let config = get_or_create_config(&db, "server").await?;
        assert!(!config.is_running);
        assert!(config.pending_data.is_none());
        assert!(config.pending_category.is_none());
        assert!(config.execution_requested_at.is_none());

        // Slot is free again
        request_execution(&db, "server", "x:y", "cat-2").await?;
        Ok(())
    }

    #[tokio::test]
    async fn test_stop_is_idempotent() -> Result<()> {
        let db = setup_test_db().await?;
        stop_execution(&db, "never-configured").await?;
        Ok(())
    }
}
