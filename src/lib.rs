pub mod config;
pub mod signaling;

pub use signaling::messages;

use axum::{
    Router,
    routing::{delete, get, post},
};
use signaling::LobbyRegistry;
use signaling::exchange;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

async fn health() -> &'static str {
    "ok"
}

#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<LobbyRegistry>,
}

pub fn app() -> Router {
    app_with_registry(Arc::new(LobbyRegistry::new()))
}

pub fn app_with_registry(registry: Arc<LobbyRegistry>) -> Router {
    let state = AppState { registry };

    Router::new()
        .route("/health", get(health))
        .route(
            "/lobbies",
            get(exchange::list_lobbies).post(exchange::create_lobby),
        )
        .route("/lobbies/:lobby_id", delete(exchange::delete_lobby))
        .route("/lobbies/:lobby_id/join", post(exchange::join_lobby))
        .route("/lobbies/:lobby_id/peers", get(exchange::unregistered_peers))
        .route(
            "/lobbies/:lobby_id/slots/:slot/offer",
            get(exchange::get_offer).post(exchange::post_offer),
        )
        .route(
            "/lobbies/:lobby_id/slots/:slot/answer",
            get(exchange::get_answer).post(exchange::post_answer),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}
