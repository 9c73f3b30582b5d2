//! Apollo routes - giveaway config and the execution hand-off.

use crate::api::{
    AppState,
    response::{ApiResult, require, success, success_empty},
};
use crate::core::apollo::{self, ApolloSettings};
use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;

/// `GET /api/apollo-config/{serverId}` - fetch the config, creating the
/// default row on first access.
pub async fn fetch(
    State(state): State<AppState>,
    Path(server_id): Path<String>,
) -> ApiResult<Json<serde_json::Value>> {
    let config = apollo::get_or_create_config(&state.db, &server_id).await?;
    Ok(success(config))
}

/// `PUT /api/apollo-config/{serverId}` - save the giveaway settings panel.
pub async fn save(
    State(state): State<AppState>,
    Path(server_id): Path<String>,
    Json(settings): Json<ApolloSettings>,
) -> ApiResult<Json<serde_json::Value>> {
    let config = apollo::update_settings(&state.db, &server_id, settings).await?;
    Ok(success(config))
}

/// Body for execution requests
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecuteBody {
    server_id: Option<String>,
    category_id: Option<String>,
    data_file: Option<String>,
}

/// `POST /api/apollo-execute` - flip the pending-execution flag for the
/// worker; 400 when a giveaway is already running.
pub async fn execute(
    State(state): State<AppState>,
    Json(body): Json<ExecuteBody>,
) -> ApiResult<Json<serde_json::Value>> {
    let server_id = require(body.server_id, "serverId")?;
    let category_id = require(body.category_id, "categoryId")?;
    let data_file = require(body.data_file, "dataFile")?;

    apollo::request_execution(&state.db, &server_id, &data_file, &category_id).await?;
    Ok(success_empty())
}

/// Body for stop requests
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StopBody {
    server_id: Option<String>,
}

/// `POST /api/apollo-execute/stop` - clear the running flag and pending
/// payload.
pub async fn stop(
    State(state): State<AppState>,
    Json(body): Json<StopBody>,
) -> ApiResult<Json<serde_json::Value>> {
    let server_id = require(body.server_id, "serverId")?;

    apollo::stop_execution(&state.db, &server_id).await?;
    Ok(success_empty())
}
