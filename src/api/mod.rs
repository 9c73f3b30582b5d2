//! HTTP admin API - the dashboard's CRUD surface plus the chat relay.
//!
//! Thin handlers: validate the session and the required fields, fail fast
//! with 400/401, delegate to [`crate::core`], and translate errors into the
//! `{"success": true, "data": …}` / `{"error": …}` envelope the dashboard
//! expects. The relay hub is constructed once at startup and carried in
//! [`AppState`] - process-wide state with an explicit init-once lifecycle
//! instead of a lazily-attached global.

/// Session-token authentication middleware
pub mod auth;
/// WebSocket chat relay
pub mod relay;
/// JSON response envelope and error mapping
pub mod response;
/// Route handlers grouped by resource
pub mod routes;

use crate::errors::Result;
use axum::{
    Router, middleware,
    routing::{get, post},
};
use sea_orm::DatabaseConnection;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

/// Shared state available to every route handler.
#[derive(Clone)]
pub struct AppState {
    /// Database connection shared with the bot
    pub db: DatabaseConnection,
    /// Broadcast hub backing the chat relay
    pub relay: relay::RelayHub,
    /// Bearer token dashboard requests must present; `None` disables auth
    pub dashboard_token: Option<String>,
}

/// Builds the full API router with auth, CORS, and request tracing applied.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/options", get(routes::options::list).post(routes::options::create))
        .route("/api/options/update", post(routes::options::rename))
        .route("/api/options/delete", post(routes::options::remove))
        .route(
            "/api/options/:server_id/:option_id/stock",
            get(routes::options::stock_for_option),
        )
        .route(
            "/api/stock",
            get(routes::stock::list)
                .post(routes::stock::create)
                .delete(routes::stock::wipe_menu),
        )
        .route("/api/stock/delete", post(routes::stock::remove_item))
        .route(
            "/api/bot-config",
            get(routes::bot_config::fetch).post(routes::bot_config::save),
        )
        .route(
            "/api/server-names",
            get(routes::server_names::fetch).post(routes::server_names::save),
        )
        .route(
            "/api/apollo-config/:server_id",
            get(routes::apollo::fetch).put(routes::apollo::save),
        )
        .route("/api/apollo-execute", post(routes::apollo::execute))
        .route("/api/apollo-execute/stop", post(routes::apollo::stop))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_session,
        ))
        // The relay carries client-encrypted payloads and takes no session,
        // matching the dashboard's socket endpoint.
        .route("/api/relay", get(relay::ws_handler))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Binds the listener and serves the API until the process exits.
pub async fn serve(state: AppState, bind_addr: &str) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    info!("Admin API listening on {}", listener.local_addr()?);
    axum::serve(listener, router(state)).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::options;
    use crate::test_utils::setup_test_db;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use tower::ServiceExt;

    async fn test_state(token: Option<&str>) -> AppState {
        AppState {
            db: setup_test_db().await.unwrap(),
            relay: relay::RelayHub::new(),
            dashboard_token: token.map(String::from),
        }
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn get_with_token(uri: &str, token: &str) -> Request<Body> {
        Request::builder()
            .uri(uri)
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::empty())
            .unwrap()
    }

    fn post_json(uri: &str, body: &serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_missing_session_is_rejected() {
        let app = router(test_state(Some("secret")).await);

        let response = app
            .oneshot(get("/api/options?serverId=s&menuNumber=1"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let body = body_json(response).await;
        assert_eq!(body["error"], "Unauthorized");
    }

    #[tokio::test]
    async fn test_bearer_token_grants_access() {
        let app = router(test_state(Some("secret")).await);

        let response = app
            .oneshot(get_with_token("/api/options?serverId=s&menuNumber=1", "secret"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["data"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_missing_query_field_is_400() {
        let app = router(test_state(None).await);

        let response = app.oneshot(get("/api/options?serverId=s")).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["error"], "menuNumber is required");
    }

    #[tokio::test]
    async fn test_create_option_round_trip() {
        let state = test_state(None).await;
        let app = router(state.clone());

        let response = app
            .clone()
            .oneshot(post_json(
                "/api/options",
                &serde_json::json!({"serverId": "s", "name": "netflix", "menuNumber": 1}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["name"], "netflix");

        let response = app
            .oneshot(get("/api/options?serverId=s&menuNumber=1"))
            .await
            .unwrap();
        let body = body_json(response).await;
        assert_eq!(body["data"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_option_cap_surfaces_as_400() {
        let state = test_state(None).await;
        for i in 0..25 {
            options::add_option(&state.db, "s", &format!("option{i}"), 1)
                .await
                .unwrap();
        }
        let app = router(state);

        let response = app
            .oneshot(post_json(
                "/api/options",
                &serde_json::json!({"serverId": "s", "name": "one-too-many", "menuNumber": 1}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_bot_config_defaults_when_absent() {
        let app = router(test_state(None).await);

        let response = app
            .oneshot(get("/api/bot-config?serverId=s"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["data"]["menu1_cooldown"], 60);
        assert_eq!(body["data"]["menu1_delete_on_use"], false);
    }

    #[tokio::test]
    async fn test_stock_bulk_insert_and_wipe() {
        let state = test_state(None).await;
        let option = options::add_option(&state.db, "s", "netflix", 1).await.unwrap();
        let app = router(state);

        let response = app
            .clone()
            .oneshot(post_json(
                "/api/stock",
                &serde_json::json!({
                    "serverId": "s",
                    "optionId": option.id,
                    "data": "a:b\nc:d\n",
                    "menuNumber": 1
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["data"].as_array().unwrap().len(), 2);

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/api/stock")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(
                        serde_json::json!({"serverId": "s", "menuNumber": 1}).to_string(),
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .oneshot(get("/api/stock?serverId=s&menuNumber=1"))
            .await
            .unwrap();
        let body = body_json(response).await;
        assert_eq!(body["data"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_apollo_execute_is_first_wins() {
        let app = router(test_state(None).await);
        let body = serde_json::json!({
            "serverId": "s",
            "categoryId": "cat-1",
            "dataFile": "a:b"
        });

        let response = app
            .clone()
            .oneshot(post_json("/api/apollo-execute", &body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .clone()
            .oneshot(post_json("/api/apollo-execute", &body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = app
            .clone()
            .oneshot(post_json(
                "/api/apollo-execute/stop",
                &serde_json::json!({"serverId": "s"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .oneshot(post_json("/api/apollo-execute", &body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
