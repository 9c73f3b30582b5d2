//! Stock routes - bulk loading, listings, and the two deletion paths.
//!
//! These are the endpoints the dashboard's stock panel drives. Database
//! failures here surface as 503 rather than 500, matching the dashboard's
//! "database connection" error handling for stock operations.

use crate::api::{
    AppState,
    response::{ApiError, ApiResult, require, success, success_empty},
};
use crate::core::stock;
use crate::entities::stock_item;
use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

/// Query string for stock listings
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockQuery {
    server_id: Option<String>,
    menu_number: Option<i32>,
}

/// A stock row joined with the option it belongs to, as the dashboard table
/// renders it.
#[derive(Debug, Serialize)]
struct StockRow {
    #[serde(flatten)]
    item: stock_item::Model,
    options: OptionSummary,
}

/// The slice of the option the stock table shows
#[derive(Debug, Serialize)]
struct OptionSummary {
    id: i64,
    name: String,
}

/// `GET /api/stock` - all stock for a server's menu joined with option names,
/// newest first.
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<StockQuery>,
) -> ApiResult<Json<serde_json::Value>> {
    let server_id = require(query.server_id, "serverId")?;
    let menu_number = require(query.menu_number, "menuNumber")?;

    let rows = stock::get_server_stock(&state.db, &server_id, menu_number)
        .await
        .map_err(ApiError::storage_unavailable)?;

    let rows: Vec<StockRow> = rows
        .into_iter()
        .map(|(item, option)| StockRow {
            item,
            options: OptionSummary {
                id: option.id,
                name: option.name,
            },
        })
        .collect();

    Ok(success(rows))
}

/// Body for bulk stock loading
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateStockBody {
    server_id: Option<String>,
    option_id: Option<i64>,
    data: Option<String>,
    menu_number: Option<i32>,
}

/// `POST /api/stock` - insert one stock row per non-empty line of `data`.
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<CreateStockBody>,
) -> ApiResult<Json<serde_json::Value>> {
    let server_id = require(body.server_id, "serverId")?;
    let option_id = require(body.option_id, "optionId")?;
    let data = require(body.data, "data")?;
    let menu_number = require(body.menu_number, "menuNumber")?;

    let inserted = stock::add_stock_lines(&state.db, &server_id, option_id, &data, menu_number)
        .await
        .map_err(ApiError::storage_unavailable)?;

    Ok(success(inserted))
}

/// Body for the menu wipe
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WipeMenuBody {
    server_id: Option<String>,
    menu_number: Option<i32>,
}

/// `DELETE /api/stock` - wipe a menu: every stock row and every option.
pub async fn wipe_menu(
    State(state): State<AppState>,
    Json(body): Json<WipeMenuBody>,
) -> ApiResult<Json<serde_json::Value>> {
    let server_id = require(body.server_id, "serverId")?;
    let menu_number = require(body.menu_number, "menuNumber")?;

    stock::delete_all_stock(&state.db, &server_id, menu_number)
        .await
        .map_err(ApiError::storage_unavailable)?;

    Ok(success_empty())
}

/// Body for single-row deletion
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteStockBody {
    server_id: Option<String>,
    stock_id: Option<i64>,
    menu_number: Option<i32>,
}

/// `POST /api/stock/delete` - delete one stock row.
pub async fn remove_item(
    State(state): State<AppState>,
    Json(body): Json<DeleteStockBody>,
) -> ApiResult<Json<serde_json::Value>> {
    let server_id = require(body.server_id, "serverId")?;
    let stock_id = require(body.stock_id, "stockId")?;
    let menu_number = require(body.menu_number, "menuNumber")?;

    let deleted = stock::delete_stock_item(&state.db, &server_id, stock_id, menu_number)
        .await
        .map_err(ApiError::storage_unavailable)?;

    if deleted {
        Ok(success_empty())
    } else {
        Err(ApiError::new(
            StatusCode::NOT_FOUND,
            "The stock item does not exist",
        ))
    }
}
