//! Bot config routes - read (with defaults) and upsert.

use crate::api::{
    AppState,
    response::{ApiResult, require, success},
};
use crate::core::bot_config;
use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;

/// Query string for config reads
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigQuery {
    server_id: Option<String>,
}

/// `GET /api/bot-config` - a server's config, defaults when never saved.
pub async fn fetch(
    State(state): State<AppState>,
    Query(query): Query<ConfigQuery>,
) -> ApiResult<Json<serde_json::Value>> {
    let server_id = require(query.server_id, "serverId")?;

    let config = bot_config::get_bot_config(&state.db, &server_id).await?;
    Ok(success(config))
}

/// Body for config saves; every field is checked individually so the
/// dashboard can name the one that's missing.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveConfigBody {
    server_id: Option<String>,
    menu1_cooldown: Option<i64>,
    menu2_cooldown: Option<i64>,
    menu1_delete_on_use: Option<bool>,
    menu2_delete_on_use: Option<bool>,
}

/// `POST /api/bot-config` - upsert a server's config.
pub async fn save(
    State(state): State<AppState>,
    Json(body): Json<SaveConfigBody>,
) -> ApiResult<Json<serde_json::Value>> {
    let server_id = require(body.server_id, "serverId")?;
    let menu1_cooldown = require(body.menu1_cooldown, "menu1Cooldown")?;
    let menu2_cooldown = require(body.menu2_cooldown, "menu2Cooldown")?;
    let menu1_delete_on_use = require(body.menu1_delete_on_use, "menu1DeleteOnUse")?;
    let menu2_delete_on_use = require(body.menu2_delete_on_use, "menu2DeleteOnUse")?;

    let config = bot_config::upsert_bot_config(
        &state.db,
        &server_id,
        menu1_cooldown,
        menu2_cooldown,
        menu1_delete_on_use,
        menu2_delete_on_use,
    )
    .await?;

    Ok(success(config))
}
