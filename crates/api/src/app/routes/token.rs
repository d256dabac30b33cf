use axum::{Extension, Json, Router, response::IntoResponse, routing::get};

use courier_events::TokenOperation;
use courier_observability::audit;

use crate::context::PrincipalContext;

pub fn router() -> Router {
    Router::new().route("/identity", get(identity))
}

/// Liveness probe for the authentication area.
pub async fn ping() -> impl IntoResponse {
    audit::info(TokenOperation::Ping.info(), "authentication ping request");
    Json(serde_json::json!({ "status": "ok" }))
}

/// Who the bearer token says the caller is.
pub async fn identity(Extension(principal): Extension<PrincipalContext>) -> impl IntoResponse {
    audit::info(
        TokenOperation::GetIdentity.info(),
        &format!("get identity for user {}", principal.user_id()),
    );
    Json(serde_json::json!({
        "id": principal.user_id(),
        "role": principal.role().as_str(),
    }))
}
