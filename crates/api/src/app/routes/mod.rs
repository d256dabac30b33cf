use axum::{Router, routing::get};

pub mod messages;
pub mod system;
pub mod token;

/// Routes reachable without a bearer token.
pub fn public_router() -> Router {
    Router::new().route("/api/token/ping", get(token::ping))
}

/// Router for all authenticated endpoints.
pub fn router() -> Router {
    Router::new()
        .nest("/api/token", token::router())
        .nest("/api/message", messages::router())
}
