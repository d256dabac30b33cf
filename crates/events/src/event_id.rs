//! Stable numeric event identifiers.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{Area, ERROR_BAND, Operation, Severity};

/// Numeric identifier attached to a log line.
///
/// Stable across restarts: the same operation and severity always yield the
/// same value.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(u32);

impl EventId {
    pub(crate) const fn compose(area: Area, severity: Severity, operation_index: u32) -> Self {
        Self(area.base() + severity.base() + operation_index)
    }

    pub const fn get(self) -> u32 {
        self.0
    }

    pub const fn is_error(self) -> bool {
        self.0 >= ERROR_BAND
    }

    /// Recover the area, severity and operation this identifier was built from.
    ///
    /// Returns `None` for integers that no known operation produces.
    pub fn decode(self) -> Option<EventClassification> {
        let (severity, offset) = if self.is_error() {
            (Severity::Error, self.0 - ERROR_BAND)
        } else {
            (Severity::Info, self.0)
        };
        let area = Area::containing(offset)?;
        let operation = Operation::from_index(area, offset - area.base())?;
        Some(EventClassification { operation, severity })
    }
}

impl core::fmt::Display for EventId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl From<EventId> for u32 {
    fn from(value: EventId) -> Self {
        value.0
    }
}

/// An (operation, severity) pair; the area is implied by the operation.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EventClassification {
    pub operation: Operation,
    pub severity: Severity,
}

impl EventClassification {
    pub const fn info(operation: Operation) -> Self {
        Self {
            operation,
            severity: Severity::Info,
        }
    }

    pub const fn error(operation: Operation) -> Self {
        Self {
            operation,
            severity: Severity::Error,
        }
    }

    pub const fn area(&self) -> Area {
        self.operation.area()
    }

    pub const fn event_id(&self) -> EventId {
        self.operation.event_id(self.severity)
    }
}

/// An operation name that is not part of the closed enumeration for its area.
///
/// Only string-keyed lookups can produce this; it signals a wiring defect.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown {area} operation '{name}'")]
pub struct UnknownOperation {
    pub area: Area,
    pub name: String,
}

/// Classify an operation given by name.
///
/// Intended for configuration and tests; handlers use the typed
/// `*Operation::info()` / `error()` constants directly.
pub fn classify(area: Area, severity: Severity, operation: &str) -> Result<EventId, UnknownOperation> {
    Operation::parse(area, operation).map(|op| op.event_id(severity))
}
