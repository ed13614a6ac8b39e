//! Program-cycle domain events.
//!
//! - `ProgramCycleCreated` - New cycle stored
//! - `ProgramCycleStatusChanged` - Status moved
//! - `ProgramCycleUpdated` - Name, description or dates patched
//! - `ProgramCycleDeleted` - Cycle removed

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    domain_event, ContextId, EventId, ProgramCycleId, Timestamp, TrackId, UserId,
};

use super::{ProgramCycle, ProgramCycleStatus};

// ════════════════════════════════════════════════════════════════════════════
// ProgramCycleCreated
// ════════════════════════════════════════════════════════════════════════════

/// Published when a program cycle is created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgramCycleCreated {
    pub event_id: EventId,
    pub program_cycle_id: ProgramCycleId,
    pub track_id: TrackId,
    pub context_id: ContextId,
    pub name: String,
    pub status: ProgramCycleStatus,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Administrator who created the cycle.
    pub created_by: UserId,
    pub created_at: Timestamp,
}

impl ProgramCycleCreated {
    pub fn from_cycle(cycle: &ProgramCycle, created_by: UserId) -> Self {
        Self {
            event_id: EventId::new(),
            program_cycle_id: cycle.id(),
            track_id: cycle.track_id(),
            context_id: cycle.context_id(),
            name: cycle.name().to_string(),
            status: cycle.status(),
            start_date: cycle.start_date(),
            end_date: cycle.end_date(),
            created_by,
            created_at: cycle.created_at(),
        }
    }
}

domain_event!(
    ProgramCycleCreated,
    event_type = "program_cycle.created.v1",
    aggregate_id = program_cycle_id,
    aggregate_type = "ProgramCycle",
    occurred_at = created_at,
    event_id = event_id
);

// ════════════════════════════════════════════════════════════════════════════
// ProgramCycleStatusChanged
// ════════════════════════════════════════════════════════════════════════════

/// Published when a cycle's status changes.
///
/// Captures both statuses for the audit trail.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgramCycleStatusChanged {
    pub event_id: EventId,
    pub program_cycle_id: ProgramCycleId,
    pub track_id: TrackId,
    pub context_id: ContextId,
    pub from: ProgramCycleStatus,
    pub to: ProgramCycleStatus,
    pub changed_by: UserId,
    pub changed_at: Timestamp,
}

domain_event!(
    ProgramCycleStatusChanged,
    event_type = "program_cycle.status_changed.v1",
    aggregate_id = program_cycle_id,
    aggregate_type = "ProgramCycle",
    occurred_at = changed_at,
    event_id = event_id
);

// ════════════════════════════════════════════════════════════════════════════
// ProgramCycleUpdated
// ════════════════════════════════════════════════════════════════════════════

/// Published after a partial update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgramCycleUpdated {
    pub event_id: EventId,
    pub program_cycle_id: ProgramCycleId,
    /// Names of the fields the patch supplied.
    pub changed_fields: Vec<String>,
    pub updated_by: UserId,
    pub updated_at: Timestamp,
}

domain_event!(
    ProgramCycleUpdated,
    event_type = "program_cycle.updated.v1",
    aggregate_id = program_cycle_id,
    aggregate_type = "ProgramCycle",
    occurred_at = updated_at,
    event_id = event_id
);

// ════════════════════════════════════════════════════════════════════════════
// ProgramCycleDeleted
// ════════════════════════════════════════════════════════════════════════════

/// Published when a cycle without progress is removed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgramCycleDeleted {
    pub event_id: EventId,
    pub program_cycle_id: ProgramCycleId,
    pub track_id: TrackId,
    pub context_id: ContextId,
    pub name: String,
    pub deleted_by: UserId,
    pub deleted_at: Timestamp,
}

domain_event!(
    ProgramCycleDeleted,
    event_type = "program_cycle.deleted.v1",
    aggregate_id = program_cycle_id,
    aggregate_type = "ProgramCycle",
    occurred_at = deleted_at,
    event_id = event_id
);
