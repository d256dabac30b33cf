//! `courier-events`: the audit event taxonomy.
//!
//! Every loggable action and failure gets a stable numeric identifier:
//!
//! ```text
//! event id = base(area) + base(severity) + operation index
//! ```
//!
//! Areas own disjoint bands (token `10..100`, user `100..200`, message
//! `200..300`) and the error band sits `ERROR_BAND` above the informational
//! one, so an operation's error id is always its info id plus `ERROR_BAND`.
//! Operation indices are append-only: existing variants keep their index
//! forever so historical log ids keep their meaning.
//!
//! Pure and allocation-free; the tables are constants.

pub mod area;
pub mod event_id;
pub mod operation;

pub use area::{Area, ERROR_BAND, Severity};
pub use event_id::{EventClassification, EventId, UnknownOperation, classify};
pub use operation::{MessageOperation, Operation, TokenOperation, UserOperation};
