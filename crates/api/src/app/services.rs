//! Message service boundary.
//!
//! Handlers only talk to [`MessageService`]; the in-memory implementation is
//! used for development and tests. Access decisions never happen here.

use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use thiserror::Error;

use courier_core::{Entity, MessageId, MessageRecord, NewMessage, UserId, UserRecord};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ServiceError {
    #[error("message store unavailable: {0}")]
    Unavailable(String),
}

/// Data access for users and messages.
#[async_trait::async_trait]
pub trait MessageService: Send + Sync {
    async fn user_by_id(&self, id: UserId) -> Result<Option<UserRecord>, ServiceError>;

    /// Messages the user sent or received, ordered by id.
    async fn messages_for_user(&self, user: UserId) -> Result<Vec<MessageRecord>, ServiceError>;

    async fn message_by_id(&self, id: MessageId) -> Result<Option<MessageRecord>, ServiceError>;

    /// Store an already-authorized message and assign its id.
    async fn send_message(&self, message: NewMessage) -> Result<MessageRecord, ServiceError>;

    /// Replace the text of a message. Returns `None` if it no longer exists.
    async fn update_message(
        &self,
        id: MessageId,
        text: String,
    ) -> Result<Option<MessageRecord>, ServiceError>;

    /// Remove a message. Returns the removed record, or `None` if absent.
    async fn delete_message(&self, id: MessageId) -> Result<Option<MessageRecord>, ServiceError>;
}

pub type SharedMessageService = Arc<dyn MessageService>;

#[derive(Debug, Default)]
struct Tables {
    users: BTreeMap<UserId, UserRecord>,
    messages: BTreeMap<MessageId, MessageRecord>,
    last_message_id: i64,
}

/// In-memory message store for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryMessageService {
    inner: RwLock<Tables>,
}

fn poisoned<T>(_: T) -> ServiceError {
    ServiceError::Unavailable("lock poisoned".to_string())
}

impl InMemoryMessageService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_users(users: impl IntoIterator<Item = UserRecord>) -> Self {
        let users = users.into_iter().map(|u| (u.id(), u)).collect();
        Self {
            inner: RwLock::new(Tables {
                users,
                ..Tables::default()
            }),
        }
    }

    /// Store with one admin (id 1) and two regular users (ids 2 and 3).
    pub fn seeded() -> Self {
        let user = |id: i64, first: &str, last: &str, role: &str| UserRecord {
            id: UserId::new(id),
            first_name: first.to_string(),
            last_name: last.to_string(),
            role_name: role.to_string(),
        };
        Self::with_users([
            user(1, "Ada", "Admin", "admin"),
            user(2, "Alice", "Liddell", "user"),
            user(3, "Bob", "Builder", "user"),
        ])
    }
}

#[async_trait::async_trait]
impl MessageService for InMemoryMessageService {
    async fn user_by_id(&self, id: UserId) -> Result<Option<UserRecord>, ServiceError> {
        let tables = self.inner.read().map_err(poisoned)?;
        Ok(tables.users.get(&id).cloned())
    }

    async fn messages_for_user(&self, user: UserId) -> Result<Vec<MessageRecord>, ServiceError> {
        let tables = self.inner.read().map_err(poisoned)?;
        Ok(tables
            .messages
            .values()
            .filter(|m| m.involves(user))
            .cloned()
            .collect())
    }

    async fn message_by_id(&self, id: MessageId) -> Result<Option<MessageRecord>, ServiceError> {
        let tables = self.inner.read().map_err(poisoned)?;
        Ok(tables.messages.get(&id).cloned())
    }

    async fn send_message(&self, message: NewMessage) -> Result<MessageRecord, ServiceError> {
        let mut tables = self.inner.write().map_err(poisoned)?;
        tables.last_message_id += 1;
        let record = message.into_record(MessageId::new(tables.last_message_id));
        tables.messages.insert(record.id(), record.clone());
        Ok(record)
    }

    async fn update_message(
        &self,
        id: MessageId,
        text: String,
    ) -> Result<Option<MessageRecord>, ServiceError> {
        let mut tables = self.inner.write().map_err(poisoned)?;
        Ok(tables.messages.get_mut(&id).map(|m| {
            m.set_text(text);
            m.clone()
        }))
    }

    async fn delete_message(&self, id: MessageId) -> Result<Option<MessageRecord>, ServiceError> {
        let mut tables = self.inner.write().map_err(poisoned)?;
        Ok(tables.messages.remove(&id))
    }
}
