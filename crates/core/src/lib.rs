//! `courier-core`: shared domain records for the messaging backend.
//!
//! This crate contains **pure domain** types (no infrastructure concerns).

pub mod entity;
pub mod error;
pub mod id;
pub mod message;
pub mod user;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{MessageId, UserId};
pub use message::{MessageRecord, NewMessage};
pub use user::UserRecord;
