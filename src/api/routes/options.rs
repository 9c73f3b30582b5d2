//! Menu option routes - list, create, rename, delete, and per-option stock.

use crate::api::{
    AppState,
    response::{ApiResult, require, success, success_empty},
};
use crate::core::{options, stock};
use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

/// Query string for option listings: `?serverId=…&menuNumber=…`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuQuery {
    server_id: Option<String>,
    menu_number: Option<i32>,
}

/// `GET /api/options` - all options for a server's menu, in creation order.
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<MenuQuery>,
) -> ApiResult<Json<serde_json::Value>> {
    let server_id = require(query.server_id, "serverId")?;
    let menu_number = require(query.menu_number, "menuNumber")?;

    let options = options::get_server_options(&state.db, &server_id, menu_number).await?;
    Ok(success(options))
}

/// Body for option creation
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOptionBody {
    server_id: Option<String>,
    name: Option<String>,
    menu_number: Option<i32>,
}

/// `POST /api/options` - create an option; the 26th for a menu is rejected
/// with 400.
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<CreateOptionBody>,
) -> ApiResult<Json<serde_json::Value>> {
    let server_id = require(body.server_id, "serverId")?;
    let name = require(body.name, "name")?;
    let menu_number = require(body.menu_number, "menuNumber")?;

    let option = options::add_option(&state.db, &server_id, &name, menu_number).await?;
    Ok(success(option))
}

/// Body for option renames
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenameOptionBody {
    server_id: Option<String>,
    option_id: Option<i64>,
    new_name: Option<String>,
}

/// `POST /api/options/update` - rename an option.
pub async fn rename(
    State(state): State<AppState>,
    Json(body): Json<RenameOptionBody>,
) -> ApiResult<Json<serde_json::Value>> {
    let server_id = require(body.server_id, "serverId")?;
    let option_id = require(body.option_id, "optionId")?;
    let new_name = require(body.new_name, "newName")?;

    let option = options::update_option_name(&state.db, &server_id, option_id, &new_name).await?;
    Ok(success(option))
}

/// Body for option deletion
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteOptionBody {
    server_id: Option<String>,
    option_id: Option<i64>,
}

/// `POST /api/options/delete` - delete an option and all its stock.
pub async fn remove(
    State(state): State<AppState>,
    Json(body): Json<DeleteOptionBody>,
) -> ApiResult<Json<serde_json::Value>> {
    let server_id = require(body.server_id, "serverId")?;
    let option_id = require(body.option_id, "optionId")?;

    options::delete_option(&state.db, &server_id, option_id).await?;
    Ok(success_empty())
}

/// Query string for the per-option stock listing
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionStockQuery {
    menu_number: Option<i32>,
}

/// `GET /api/options/{serverId}/{optionId}/stock` - the stock loaded under
/// one option, newest first. `menuNumber` defaults to 1 when omitted.
pub async fn stock_for_option(
    State(state): State<AppState>,
    Path((server_id, option_id)): Path<(String, i64)>,
    Query(query): Query<OptionStockQuery>,
) -> ApiResult<Json<serde_json::Value>> {
    let menu_number = query.menu_number.unwrap_or(1);

    let items = stock::get_option_stock(&state.db, &server_id, option_id, menu_number).await?;
    Ok(success(items))
}
