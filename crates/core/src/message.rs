//! Message records as held by the store.

use serde::{Deserialize, Serialize};

use crate::{DomainError, DomainResult, Entity, MessageId, UserId};

/// A stored point-to-point message.
///
/// # Invariants
/// - `sender_id` is fixed at creation; ownership of a message never transfers.
/// - Only the text can change after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageRecord {
    id: MessageId,
    sender_id: UserId,
    receiver_id: UserId,
    text: String,
}

impl MessageRecord {
    pub fn new(id: MessageId, sender_id: UserId, receiver_id: UserId, text: impl Into<String>) -> Self {
        Self {
            id,
            sender_id,
            receiver_id,
            text: text.into(),
        }
    }

    pub fn sender_id(&self) -> UserId {
        self.sender_id
    }

    pub fn receiver_id(&self) -> UserId {
        self.receiver_id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the message body. Sender and receiver are untouched.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Whether `user` takes part in this message as sender or receiver.
    pub fn involves(&self, user: UserId) -> bool {
        self.sender_id == user || self.receiver_id == user
    }
}

impl Entity for MessageRecord {
    type Id = MessageId;

    fn id(&self) -> MessageId {
        self.id
    }
}

/// A message that has been authorized but not yet stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMessage {
    pub sender_id: UserId,
    pub receiver_id: UserId,
    pub text: String,
}

impl NewMessage {
    /// Build a new message; the receiver is mandatory.
    pub fn new(sender_id: UserId, receiver_id: Option<UserId>, text: impl Into<String>) -> DomainResult<Self> {
        let receiver_id =
            receiver_id.ok_or_else(|| DomainError::validation("receiver id is required"))?;
        Ok(Self {
            sender_id,
            receiver_id,
            text: text.into(),
        })
    }

    pub fn into_record(self, id: MessageId) -> MessageRecord {
        MessageRecord::new(id, self.sender_id, self.receiver_id, self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_text_keeps_sender_and_receiver() {
        let mut msg = MessageRecord::new(MessageId::new(1), UserId::new(5), UserId::new(9), "hi");
        msg.set_text("edited");

        assert_eq!(msg.text(), "edited");
        assert_eq!(msg.sender_id(), UserId::new(5));
        assert_eq!(msg.receiver_id(), UserId::new(9));
    }

    #[test]
    fn involves_sender_and_receiver_only() {
        let msg = MessageRecord::new(MessageId::new(1), UserId::new(5), UserId::new(9), "hi");
        assert!(msg.involves(UserId::new(5)));
        assert!(msg.involves(UserId::new(9)));
        assert!(!msg.involves(UserId::new(1)));
    }

    #[test]
    fn new_message_requires_receiver() {
        let err = NewMessage::new(UserId::new(5), None, "hi").unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        let ok = NewMessage::new(UserId::new(5), Some(UserId::new(9)), "hi").unwrap();
        let record = ok.into_record(MessageId::new(3));
        assert_eq!(record.id(), MessageId::new(3));
        assert_eq!(record.sender_id(), UserId::new(5));
    }
}
