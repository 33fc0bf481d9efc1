//! HTTP API for food records.
//!
//! # Endpoints
//!
//! - `GET /health`: Health check (no auth required)
//! - `GET /api/csrf`: Issue a CSRF token cookie (no auth required)
//! - `GET /api/foods`: All food records keyed by id (auth required)
//! - `POST /api/foods`: Create a food record (auth + CSRF required)
//! - `PUT /api/foods/{id}`: Update a record, owner only (auth + CSRF required)
//! - `DELETE /api/foods/{id}`: Delete a record, owner only (auth + CSRF required)

mod auth;
mod csrf;
mod error;
mod foods;

pub use auth::ApiKeyStore;

use axum::routing::{get, put};
use axum::{middleware, Json, Router};
use serde::Serialize;
use sqlx::SqlitePool;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::db::FoodRepository;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub foods: FoodRepository,
    pub api_keys: Arc<ApiKeyStore>,
}

/// Health check response
#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

/// Health check endpoint (no auth required)
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Builds the application router.
///
/// Separate from [`serve`] so tests can drive the service without binding
/// a socket.
pub fn build_router(state: AppState) -> Router {
    // Public routes (no auth)
    let public_routes = Router::new()
        .route("/health", get(health))
        .route("/api/csrf", get(csrf::issue_token));

    // Protected routes (auth required, CSRF checked on mutations)
    let protected_routes = Router::new()
        .route("/api/foods", get(foods::list).post(foods::create))
        .route("/api/foods/{id}", put(foods::update).delete(foods::remove))
        .layer(middleware::from_fn(csrf::require_token))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_auth,
        ));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Runs the server until shutdown.
pub async fn serve(config: Config, pool: SqlitePool) -> Result<(), Box<dyn std::error::Error>> {
    let state = AppState {
        foods: FoodRepository::new(pool),
        api_keys: Arc::new(ApiKeyStore::from_config(&config)),
    };

    let app = build_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
