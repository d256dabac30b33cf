use serde::{Deserialize, Serialize};

use courier_core::{Entity, MessageId, MessageRecord, UserId, UserRecord};

// -------------------------
// Request DTOs
// -------------------------

/// Reference to a user inside a request body; only the id is read.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserRef {
    #[serde(default)]
    pub id: Option<UserId>,
}

#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    /// Explicit sender. Must be absent or equal to the caller.
    #[serde(default)]
    pub from: Option<UserRef>,
    #[serde(default)]
    pub to: Option<UserRef>,
    pub message: String,
}

impl SendMessageRequest {
    pub fn sender_override(&self) -> Option<UserId> {
        self.from.as_ref().and_then(|f| f.id)
    }

    pub fn receiver(&self) -> Option<UserId> {
        self.to.as_ref().and_then(|t| t.id)
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateMessageRequest {
    pub id: MessageId,
    pub message: String,
}

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientUser {
    pub id: UserId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClientMessage {
    pub id: MessageId,
    pub from: ClientUser,
    pub to: ClientUser,
    pub message: String,
}

pub fn user_to_client(user: &UserRecord) -> ClientUser {
    ClientUser {
        id: user.id,
        first_name: Some(user.first_name.clone()),
        last_name: Some(user.last_name.clone()),
        role_name: Some(user.role_name.clone()),
    }
}

/// A user id whose profile is no longer available.
pub fn bare_user(id: UserId) -> ClientUser {
    ClientUser {
        id,
        first_name: None,
        last_name: None,
        role_name: None,
    }
}

pub fn message_to_client(
    message: &MessageRecord,
    sender: Option<&UserRecord>,
    receiver: Option<&UserRecord>,
) -> ClientMessage {
    ClientMessage {
        id: message.id(),
        from: sender
            .map(user_to_client)
            .unwrap_or_else(|| bare_user(message.sender_id())),
        to: receiver
            .map(user_to_client)
            .unwrap_or_else(|| bare_user(message.receiver_id())),
        message: message.text().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn send_request_reads_ids_from_nested_users() {
        let body: SendMessageRequest = serde_json::from_value(serde_json::json!({
            "from": { "id": 2, "firstName": "ignored" },
            "to": { "id": 3 },
            "message": "hi",
        }))
        .unwrap();

        assert_eq!(body.sender_override(), Some(UserId::new(2)));
        assert_eq!(body.receiver(), Some(UserId::new(3)));
    }

    #[test]
    fn send_request_without_sender_has_no_override() {
        let body: SendMessageRequest =
            serde_json::from_value(serde_json::json!({ "to": { "id": 3 }, "message": "hi" })).unwrap();
        assert_eq!(body.sender_override(), None);

        let body: SendMessageRequest = serde_json::from_value(
            serde_json::json!({ "from": {}, "to": { "id": 3 }, "message": "hi" }),
        )
        .unwrap();
        assert_eq!(body.sender_override(), None);
    }

    #[test]
    fn client_message_uses_camel_case_profiles() {
        let sender = UserRecord {
            id: UserId::new(2),
            first_name: "Alice".into(),
            last_name: "Liddell".into(),
            role_name: "user".into(),
        };
        let msg = MessageRecord::new(MessageId::new(1), UserId::new(2), UserId::new(3), "hi");

        let json = serde_json::to_value(message_to_client(&msg, Some(&sender), None)).unwrap();
        assert_eq!(json["from"]["firstName"], "Alice");
        assert_eq!(json["from"]["roleName"], "user");
        assert_eq!(json["to"], serde_json::json!({ "id": 3 }));
        assert_eq!(json["message"], "hi");
    }
}
