//! API Routes

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::handlers;
use crate::state::AppState;

/// Create the routes mounted under `/api`
pub fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        // Health
        .route("/health", get(handlers::health::health_check))
        .route("/db-check", get(handlers::health::db_check))
        // Boxers
        .merge(boxer_routes())
        // Ring
        .route(
            "/ring",
            post(handlers::ring::enter_ring)
                .get(handlers::ring::get_ring)
                .delete(handlers::ring::clear_ring),
        )
        .route("/fight", post(handlers::ring::fight))
        // Leaderboard
        .route("/leaderboard", get(handlers::leaderboard::get_leaderboard))
}

/// Boxer routes
fn boxer_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/boxers", post(handlers::boxer::create_boxer))
        .route(
            "/boxers/:id",
            get(handlers::boxer::get_boxer).delete(handlers::boxer::delete_boxer),
        )
        .route("/boxers/by-name/:name", get(handlers::boxer::get_boxer_by_name))
        .route("/boxers/:id/stats", post(handlers::boxer::update_stats))
}
