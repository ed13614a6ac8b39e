//! Strongly-typed identifier value objects.
//!
//! Users, contexts, tracks and memberships are owned by other parts of the
//! platform and keyed by database sequences, so their identifiers wrap `i64`.
//! Program cycles are created here and get a UUID assigned at construction.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;
use uuid::Uuid;

/// Declares a sequence-backed identifier newtype.
macro_rules! sequence_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wraps a raw database identifier.
            pub const fn new(id: i64) -> Self {
                Self(id)
            }

            /// Returns the raw database identifier.
            pub const fn value(&self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(s.trim().parse()?))
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }
    };
}

sequence_id!(
    /// Identifier of a platform user (the subject of memberships).
    UserId
);

sequence_id!(
    /// Identifier of a context: the geographic or organizational group users join.
    ContextId
);

sequence_id!(
    /// Identifier of a learning track.
    TrackId
);

sequence_id!(
    /// Identifier of a membership row linking a user to a context.
    MembershipId
);

/// Unique identifier for a program cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProgramCycleId(Uuid);

impl ProgramCycleId {
    /// Creates a new random ProgramCycleId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a ProgramCycleId from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ProgramCycleId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ProgramCycleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ProgramCycleId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}
