//! Closed, append-only operation enumerations, one per area.
//!
//! New operations are appended with the next free index. Existing indices
//! are never reassigned or reused.

use serde::{Deserialize, Serialize};

use crate::{Area, EventId, Severity, UnknownOperation};

macro_rules! operations {
    (
        $(#[$meta:meta])*
        $name:ident as $wrap:ident in $area:expr => {
            $($variant:ident = $index:literal => $label:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const AREA: Area = $area;

            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Position of the operation inside its area band.
            pub const fn index(self) -> u32 {
                match self {
                    $($name::$variant => $index),+
                }
            }

            /// Canonical upper-case operation name.
            pub const fn name(self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }

            pub const fn event_id(self, severity: Severity) -> EventId {
                EventId::compose(Self::AREA, severity, self.index())
            }

            pub const fn info(self) -> EventId {
                self.event_id(Severity::Info)
            }

            pub const fn error(self) -> EventId {
                self.event_id(Severity::Error)
            }

            /// Look up an operation by canonical name (ASCII case-insensitive).
            pub fn from_name(name: &str) -> Option<Self> {
                Self::ALL
                    .iter()
                    .copied()
                    .find(|op| op.name().eq_ignore_ascii_case(name.trim()))
            }

            pub fn from_index(index: u32) -> Option<Self> {
                Self::ALL.iter().copied().find(|op| op.index() == index)
            }
        }

        impl From<$name> for Operation {
            fn from(value: $name) -> Self {
                Operation::$wrap(value)
            }
        }

        // Indices must be unique and fit inside the area band.
        const _: () = {
            let all = $name::ALL;
            let mut i = 0;
            while i < all.len() {
                assert!(
                    all[i].index() < $name::AREA.width(),
                    concat!(stringify!($name), ": operation index outside its area band")
                );
                let mut j = i + 1;
                while j < all.len() {
                    assert!(
                        all[i].index() != all[j].index(),
                        concat!(stringify!($name), ": duplicate operation index")
                    );
                    j += 1;
                }
                i += 1;
            }
        };
    };
}

operations! {
    /// Token / authentication endpoints.
    TokenOperation as Token in Area::Token => {
        Ping = 0 => "PING",
        GetToken = 1 => "GETTOKEN",
        GetIdentity = 2 => "GETIDENTITY",
    }
}

operations! {
    /// User management operations.
    UserOperation as User in Area::User => {
        GetAll = 0 => "GETALL",
        GetById = 1 => "GETBYID",
        GetByName = 2 => "GETBYNAME",
        CreateUser = 3 => "CREATEUSER",
        DeleteAll = 4 => "DELETEALL",
        DeleteUser = 5 => "DELETEUSER",
        DeleteById = 6 => "DELETEBYID",
        UpdateUserName = 7 => "UPDATEUSERNAME",
    }
}

operations! {
    /// Message operations.
    MessageOperation as Message in Area::Message => {
        GetAll = 0 => "GETALL",
        GetById = 1 => "GETBYID",
        GetByUser = 2 => "GETBYUSER",
        CreateMessage = 3 => "CREATEMESSAGE",
        DeleteAll = 4 => "DELETEALL",
        DeleteMessage = 5 => "DELETEMESSAGE",
        DeleteMessageById = 6 => "DELETEMESSAGEBYID",
        DeleteMessageByUser = 7 => "DELETEMESSAGEBYUSER",
        Update = 8 => "UPDATE",
    }
}

/// Any operation of any area.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "area", content = "operation", rename_all = "snake_case")]
pub enum Operation {
    Token(TokenOperation),
    User(UserOperation),
    Message(MessageOperation),
}

impl Operation {
    pub const fn area(self) -> Area {
        match self {
            Operation::Token(_) => Area::Token,
            Operation::User(_) => Area::User,
            Operation::Message(_) => Area::Message,
        }
    }

    pub const fn index(self) -> u32 {
        match self {
            Operation::Token(op) => op.index(),
            Operation::User(op) => op.index(),
            Operation::Message(op) => op.index(),
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Operation::Token(op) => op.name(),
            Operation::User(op) => op.name(),
            Operation::Message(op) => op.name(),
        }
    }

    pub const fn event_id(self, severity: Severity) -> EventId {
        EventId::compose(self.area(), severity, self.index())
    }

    /// Resolve an operation name within an area.
    pub fn parse(area: Area, name: &str) -> Result<Operation, UnknownOperation> {
        let found = match area {
            Area::Token => TokenOperation::from_name(name).map(Operation::from),
            Area::User => UserOperation::from_name(name).map(Operation::from),
            Area::Message => MessageOperation::from_name(name).map(Operation::from),
        };
        found.ok_or_else(|| UnknownOperation {
            area,
            name: name.to_string(),
        })
    }

    pub fn from_index(area: Area, index: u32) -> Option<Operation> {
        match area {
            Area::Token => TokenOperation::from_index(index).map(Operation::from),
            Area::User => UserOperation::from_index(index).map(Operation::from),
            Area::Message => MessageOperation::from_index(index).map(Operation::from),
        }
    }

    /// Every operation of every area, in area order then index order.
    pub fn all() -> impl Iterator<Item = Operation> {
        TokenOperation::ALL
            .iter()
            .copied()
            .map(Operation::from)
            .chain(UserOperation::ALL.iter().copied().map(Operation::from))
            .chain(MessageOperation::ALL.iter().copied().map(Operation::from))
    }
}

impl core::fmt::Display for Operation {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}.{}", self.area(), self.name())
    }
}
