//! Top-level router assembly.
//!
//! Everything except `/api/auth/login` and `/health` sits behind the bearer
//! middleware. The outer layers (tracing, request ids, timeout, compression,
//! CORS) wrap the whole API.

use std::time::Duration;

use axum::extract::{MatchedPath, Request, State};
use axum::http::{HeaderValue, Method, StatusCode};
use axum::middleware::from_fn_with_state;
use axum::routing::get;
use axum::{Json, Router};
use http::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use sqlx::PgPool;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;

use super::auth::auth_routes;
use super::clients::client_routes;
use super::contracts::contract_routes;
use super::finance::finance_routes;
use super::leads::lead_routes;
use super::meetings::meeting_routes;
use super::members::member_routes;
use super::middleware::auth_middleware;
use super::projects::project_routes;
use super::state::AppState;
use super::suggestions::suggestion_routes;
use super::transactions::transaction_routes;

/// Builds the `/api` router with all resources and the outer middleware
/// stack.
pub fn api_router(state: AppState, server: &ServerConfig) -> Router {
    let api = Router::new()
        .nest("/auth", auth_routes())
        .nest("/clients", client_routes())
        .nest("/leads", lead_routes())
        .nest("/projects", project_routes())
        .nest("/contracts", contract_routes())
        .nest("/transactions", transaction_routes())
        .nest("/members", member_routes())
        .nest("/meetings", meeting_routes())
        .nest("/suggestions", suggestion_routes())
        .nest("/finance", finance_routes())
        .layer(from_fn_with_state(state.tokens.clone(), auth_middleware));

    Router::new()
        .nest("/api", api)
        .layer(cors_layer(server))
        .layer((
            SetRequestIdLayer::x_request_id(MakeRequestUuid),
            PropagateRequestIdLayer::x_request_id(),
            TraceLayer::new_for_http().make_span_with(|req: &Request| {
                let method = req.method();
                let uri = req.uri();
                let matched_path = req
                    .extensions()
                    .get::<MatchedPath>()
                    .map(|p| p.as_str());
                tracing::debug_span!("request", %method, %uri, matched_path)
            }),
            TimeoutLayer::new(Duration::from_secs(server.request_timeout_secs)),
            CompressionLayer::new(),
        ))
        .with_state(state)
}

fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let methods = [
        Method::GET,
        Method::POST,
        Method::PUT,
        Method::DELETE,
        Method::OPTIONS,
    ];
    let headers = [ACCEPT, AUTHORIZATION, CONTENT_TYPE];

    let origins: Vec<HeaderValue> = server
        .cors_origins_list()
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    if origins.is_empty() {
        CorsLayer::new()
            .allow_methods(methods)
            .allow_headers(headers)
            .allow_origin(Any)
    } else {
        CorsLayer::new()
            .allow_methods(methods)
            .allow_headers(headers)
            .allow_origin(origins)
    }
}

/// Liveness route with a database ping, mounted outside `/api`.
pub fn health_router(pool: PgPool) -> Router {
    Router::new()
        .route("/health", get(health))
        .with_state(pool)
}

async fn health(State(pool): State<PgPool>) -> (StatusCode, Json<serde_json::Value>) {
    match sqlx::query("SELECT 1").execute(&pool).await {
        Ok(_) => (
            StatusCode::OK,
            Json(serde_json::json!({"status": "ok", "database": "up"})),
        ),
        Err(err) => {
            tracing::error!("health check database ping failed: {}", err);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(serde_json::json!({"status": "degraded", "database": "down"})),
            )
        }
    }
}
