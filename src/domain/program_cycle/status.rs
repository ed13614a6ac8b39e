//! Program cycle status.
//!
//! Administrators move cycles between statuses freely, including backwards
//! (closed back to active, archived back to draft). The one rule that binds
//! is that a (track, context) pair has at most one active cycle, and that
//! rule needs the other cycles of the pair, so the application layer checks
//! it rather than this table.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{StateMachine, ValidationError};

/// Lifecycle status of a program cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ProgramCycleStatus {
    /// Being prepared; not yet open to participants.
    #[default]
    Draft,
    /// The cycle participants are currently enrolled in.
    Active,
    /// Finished; progress is kept.
    Closed,
    /// Hidden from day-to-day listings.
    Archived,
}

impl ProgramCycleStatus {
    pub const ALL: [ProgramCycleStatus; 4] = [
        ProgramCycleStatus::Draft,
        ProgramCycleStatus::Active,
        ProgramCycleStatus::Closed,
        ProgramCycleStatus::Archived,
    ];

    /// Storage and wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProgramCycleStatus::Draft => "draft",
            ProgramCycleStatus::Active => "active",
            ProgramCycleStatus::Closed => "closed",
            ProgramCycleStatus::Archived => "archived",
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, ProgramCycleStatus::Active)
    }
}

impl StateMachine for ProgramCycleStatus {
    fn can_transition_to(&self, _target: &Self) -> bool {
        true
    }

    fn valid_transitions(&self) -> Vec<Self> {
        Self::ALL.to_vec()
    }
}

impl fmt::Display for ProgramCycleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ProgramCycleStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "draft" => Ok(ProgramCycleStatus::Draft),
            "active" => Ok(ProgramCycleStatus::Active),
            "closed" => Ok(ProgramCycleStatus::Closed),
            "archived" => Ok(ProgramCycleStatus::Archived),
            other => Err(ValidationError::invalid_format(
                "status",
                format!("unknown program cycle status '{}'", other),
            )),
        }
    }
}
