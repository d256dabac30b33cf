//! API-side access guard for message operations.
//!
//! Runs the access decision engine after the handler has fetched the target
//! message (if any) and before the effectful service call.

use axum::http::StatusCode;

use courier_auth::{AccessRequest, AuthzError, enforce, explain};
use courier_events::MessageOperation;
use courier_observability::audit;

use crate::app::errors::json_error;
use crate::context::PrincipalContext;

/// Enforce access for `request`; on refusal, log and return the 403 response.
///
/// Plain denials are logged under the operation's info id; impersonation
/// attempts under its error id so they stand out in audit queries.
pub fn guard_message(
    principal: &PrincipalContext,
    request: &AccessRequest,
    operation: MessageOperation,
) -> Result<(), axum::response::Response> {
    let Err(err) = enforce(principal.principal(), request) else {
        return Ok(());
    };

    let event = match err {
        AuthzError::AccessDenied { .. } => operation.info(),
        AuthzError::ImpersonationAttempt { .. } => operation.error(),
    };
    let explanation = explain(principal.principal(), request);
    audit::denied(
        event,
        &format!("request forbidden for current user: {}", explanation.reason),
    );

    Err(json_error(StatusCode::FORBIDDEN, "forbidden", err.to_string()))
}
