use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};

use courier_auth::AccessRequest;
use courier_core::{Entity, MessageId, MessageRecord, NewMessage, UserId};
use courier_events::{MessageOperation, UserOperation};
use courier_observability::audit;

use crate::app::services::{ServiceError, SharedMessageService};
use crate::app::{dto, errors};
use crate::authz::guard_message;
use crate::context::PrincipalContext;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_messages).post(send_message).put(update_message))
        .route("/:id", get(get_message).delete(delete_message))
}

/// Messages the caller sent or received.
pub async fn list_messages(
    Extension(services): Extension<SharedMessageService>,
    Extension(principal): Extension<PrincipalContext>,
) -> axum::response::Response {
    let op = MessageOperation::GetByUser;
    audit::info(
        op.info(),
        &format!("get all messages for user {}", principal.user_id()),
    );

    let result = async {
        let records = services.messages_for_user(principal.user_id()).await?;
        let mut items = Vec::with_capacity(records.len());
        for record in &records {
            items.push(to_client(&services, record).await?);
        }
        Ok::<_, ServiceError>(items)
    }
    .await;

    match result {
        Ok(items) => (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response(),
        Err(e) => {
            audit::failure(op.error(), "failed to list messages", &e);
            errors::service_error_to_response(e)
        }
    }
}

pub async fn get_message(
    Extension(services): Extension<SharedMessageService>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let op = MessageOperation::GetById;
    audit::info(op.info(), &format!("get message by id {id}"));

    let record = match load_message(&services, &id, op).await {
        Ok(record) => record,
        Err(response) => return response,
    };

    if let Err(response) = guard_message(&principal, &AccessRequest::read(&record), op) {
        return response;
    }

    match to_client(&services, &record).await {
        Ok(message) => (StatusCode::OK, Json(message)).into_response(),
        Err(e) => {
            audit::failure(op.error(), &format!("failed to load message {id}"), &e);
            errors::service_error_to_response(e)
        }
    }
}

pub async fn send_message(
    Extension(services): Extension<SharedMessageService>,
    Extension(principal): Extension<PrincipalContext>,
    Json(body): Json<dto::SendMessageRequest>,
) -> axum::response::Response {
    let op = MessageOperation::CreateMessage;
    audit::info(op.info(), "try send message");

    let request = AccessRequest::create(body.sender_override());
    if let Err(response) = guard_message(&principal, &request, op) {
        return response;
    }

    // Past the guard, the sender is always the caller.
    let new_message = match NewMessage::new(principal.user_id(), body.receiver(), body.message) {
        Ok(m) => m,
        Err(e) => {
            audit::error(op.error(), &format!("can't send message: {e}"));
            return errors::domain_error_to_response(e);
        }
    };

    let sender = lookup_user(&services, new_message.sender_id).await;
    let receiver = lookup_user(&services, new_message.receiver_id).await;
    let (sender, receiver) = match (sender, receiver) {
        (Ok(Some(s)), Ok(Some(r))) => (s, r),
        (Ok(s), Ok(r)) => {
            audit::error(
                op.error(),
                &format!(
                    "can't send message - sender missing: {}, receiver missing: {}",
                    s.is_none(),
                    r.is_none()
                ),
            );
            return errors::json_error(
                StatusCode::BAD_REQUEST,
                "unknown_user",
                "Should specify correct id for both sender and receiver",
            );
        }
        (Err(e), _) | (_, Err(e)) => {
            audit::failure(op.error(), "error on sending new message", &e);
            return errors::service_error_to_response(e);
        }
    };

    match services.send_message(new_message).await {
        Ok(record) => {
            let message = dto::message_to_client(&record, Some(&sender), Some(&receiver));
            (StatusCode::CREATED, Json(message)).into_response()
        }
        Err(e) => {
            audit::failure(op.error(), "error on sending new message", &e);
            errors::service_error_to_response(e)
        }
    }
}

pub async fn update_message(
    Extension(services): Extension<SharedMessageService>,
    Extension(principal): Extension<PrincipalContext>,
    Json(body): Json<dto::UpdateMessageRequest>,
) -> axum::response::Response {
    let op = MessageOperation::Update;
    audit::info(op.info(), &format!("update message with id {}", body.id));

    let record = match find_message(&services, body.id, op).await {
        Ok(record) => record,
        Err(response) => return response,
    };

    if let Err(response) = guard_message(&principal, &AccessRequest::update(&record), op) {
        return response;
    }

    let updated = match services.update_message(body.id, body.message).await {
        Ok(Some(updated)) => updated,
        Ok(None) => return message_not_found(body.id, op),
        Err(e) => {
            audit::failure(op.error(), &format!("error on updating message {}", body.id), &e);
            return errors::service_error_to_response(e);
        }
    };

    match to_client(&services, &updated).await {
        Ok(message) => (StatusCode::OK, Json(message)).into_response(),
        Err(e) => {
            audit::failure(op.error(), &format!("error on updating message {}", body.id), &e);
            errors::service_error_to_response(e)
        }
    }
}

pub async fn delete_message(
    Extension(services): Extension<SharedMessageService>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let op = MessageOperation::DeleteMessageById;
    audit::info(op.info(), &format!("delete message with id {id}"));

    let record = match load_message(&services, &id, op).await {
        Ok(record) => record,
        Err(response) => return response,
    };

    if let Err(response) = guard_message(&principal, &AccessRequest::delete(&record), op) {
        return response;
    }

    match services.delete_message(record.id()).await {
        Ok(Some(_)) => StatusCode::NO_CONTENT.into_response(),
        Ok(None) => message_not_found(record.id(), op),
        Err(e) => {
            audit::failure(op.error(), &format!("error on deleting message {id}"), &e);
            errors::service_error_to_response(e)
        }
    }
}

/// Parse a path id and fetch the message it names.
async fn load_message(
    services: &SharedMessageService,
    raw_id: &str,
    op: MessageOperation,
) -> Result<MessageRecord, axum::response::Response> {
    let id: MessageId = raw_id.parse().map_err(|e| {
        audit::error(op.error(), &format!("wrong message identifier '{raw_id}'"));
        errors::domain_error_to_response(e)
    })?;
    find_message(services, id, op).await
}

async fn find_message(
    services: &SharedMessageService,
    id: MessageId,
    op: MessageOperation,
) -> Result<MessageRecord, axum::response::Response> {
    match services.message_by_id(id).await {
        Ok(Some(record)) => Ok(record),
        Ok(None) => Err(message_not_found(id, op)),
        Err(e) => {
            audit::failure(op.error(), &format!("error on loading message {id}"), &e);
            Err(errors::service_error_to_response(e))
        }
    }
}

fn message_not_found(id: MessageId, op: MessageOperation) -> axum::response::Response {
    audit::error(op.error(), &format!("could not find message with id {id}"));
    errors::not_found(format!("Message with the id = {id} could not be found"))
}

async fn lookup_user(
    services: &SharedMessageService,
    id: UserId,
) -> Result<Option<courier_core::UserRecord>, ServiceError> {
    audit::info(UserOperation::GetById.info(), &format!("get user by id {id}"));
    let user = services.user_by_id(id).await;
    match &user {
        Ok(None) => audit::error(UserOperation::GetById.error(), &format!("wrong user identifier {id}")),
        Err(e) => audit::failure(UserOperation::GetById.error(), &format!("error on loading user {id}"), e),
        Ok(Some(_)) => {}
    }
    user
}

async fn to_client(
    services: &SharedMessageService,
    record: &MessageRecord,
) -> Result<dto::ClientMessage, ServiceError> {
    let sender = services.user_by_id(record.sender_id()).await?;
    let receiver = services.user_by_id(record.receiver_id()).await?;
    Ok(dto::message_to_client(record, sender.as_ref(), receiver.as_ref()))
}
