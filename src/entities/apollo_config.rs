//! Apollo config entity - Giveaway automation settings and the pending job.
//!
//! One row per server. The dashboard edits the giveaway parameters; the
//! `is_running` / `pending_data` / `pending_category` /
//! `execution_requested_at` columns form a poll-based hand-off to the external
//! execution worker. At most one job can be pending per server, enforced by a
//! conditional update in [`crate::core::apollo::request_execution`].

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Apollo giveaway configuration database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "apollo_configs")]
pub struct Model {
    /// Discord guild id (primary key, one config per server)
    #[sea_orm(primary_key, auto_increment = false)]
    pub server_id: String,
    /// Whether a giveaway job is currently pending or executing
    pub is_running: bool,
    /// When the last giveaway finished, if any
    pub last_run: Option<DateTimeUtc>,
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
    /// Verification questions asked before entry, stored as a JSON string array
    pub questions: Json,
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
    /// Stock payload stashed for the execution worker
    pub pending_data: Option<String>,
    /// Category id stashed for the execution worker
    pub pending_category: Option<String>,
    /// When the dashboard requested the pending execution
    pub execution_requested_at: Option<DateTimeUtc>,
}

/// `ApolloConfig` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
