//! Server name cache routes.

use crate::api::{
    AppState,
    response::{ApiResult, require, success},
};
use crate::core::server_name;
use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;

/// Query string for name lookups
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NameQuery {
    server_id: Option<String>,
}

/// `GET /api/server-names` - the cached guild name, `null` when never cached.
pub async fn fetch(
    State(state): State<AppState>,
    Query(query): Query<NameQuery>,
) -> ApiResult<Json<serde_json::Value>> {
    let server_id = require(query.server_id, "serverId")?;

    let cached = server_name::get_server_name(&state.db, &server_id).await?;
    Ok(success(cached))
}

/// Body for name saves
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveNameBody {
    server_id: Option<String>,
    name: Option<String>,
}

/// `POST /api/server-names` - cache or refresh a guild name.
pub async fn save(
    State(state): State<AppState>,
    Json(body): Json<SaveNameBody>,
) -> ApiResult<Json<serde_json::Value>> {
    let server_id = require(body.server_id, "serverId")?;
    let name = require(body.name, "name")?;

    let cached = server_name::upsert_server_name(&state.db, &server_id, &name).await?;
    Ok(success(cached))
}
