//! Functional areas and severity bands.

use serde::{Deserialize, Serialize};

/// Offset added on top of an area band for error-classified events.
pub const ERROR_BAND: u32 = 1000;

/// Functional partition used to bucket event identifiers.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Area {
    /// Authentication / token endpoints.
    Token,
    User,
    Message,
}

impl Area {
    pub const ALL: [Area; 3] = [Area::Token, Area::User, Area::Message];

    /// First identifier of the area's band.
    pub const fn base(self) -> u32 {
        match self {
            Area::Token => 10,
            Area::User => 100,
            Area::Message => 200,
        }
    }

    /// Number of operation slots in the band. Bands never overlap and never
    /// reach into the error band.
    pub const fn width(self) -> u32 {
        match self {
            Area::Token => 90,
            Area::User => 100,
            Area::Message => 100,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Area::Token => "token",
            Area::User => "user",
            Area::Message => "message",
        }
    }

    /// The area whose informational band contains `offset`.
    pub(crate) fn containing(offset: u32) -> Option<Area> {
        Self::ALL
            .into_iter()
            .find(|area| offset >= area.base() && offset < area.base() + area.width())
    }
}

impl core::fmt::Display for Area {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Success/failure classification of an event.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Error,
}

impl Severity {
    pub const fn base(self) -> u32 {
        match self {
            Severity::Info => 0,
            Severity::Error => ERROR_BAND,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Error => "error",
        }
    }
}

impl core::fmt::Display for Severity {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

// Bands must be disjoint and stay below the error band.
const _: () = {
    assert!(Area::Token.base() + Area::Token.width() <= Area::User.base());
    assert!(Area::User.base() + Area::User.width() <= Area::Message.base());
    assert!(Area::Message.base() + Area::Message.width() <= ERROR_BAND);
};
