//! ProgramCycle aggregate.
//!
//! A program cycle is one dated offering of a track inside a context
//! ("2026.1 of the community-health track in district 4").
//!
//! # Invariants
//!
//! Held by the aggregate itself:
//! - `name` is not blank
//! - `end_date >= start_date`
//!
//! Held by the application layer, because they span several cycles:
//! - `name` is unique within its (track, context) scope
//! - at most one cycle per scope is `Active`
//! - a cycle with recorded progress is never deleted

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{
    ContextId, DateRange, ProgramCycleId, StateMachine, Timestamp, TrackId, ValidationError,
};

use super::{ProgramCycleError, ProgramCycleStatus};

/// The (track, context) pair a cycle belongs to.
///
/// Uniqueness of names and of the active cycle are both scoped to this pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CycleScope {
    pub track_id: TrackId,
    pub context_id: ContextId,
}

impl CycleScope {
    pub fn new(track_id: TrackId, context_id: ContextId) -> Self {
        Self {
            track_id,
            context_id,
        }
    }
}

impl fmt::Display for CycleScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "track {} / context {}", self.track_id, self.context_id)
    }
}

/// Input for creating a program cycle.
#[derive(Debug, Clone)]
pub struct NewProgramCycle {
    pub scope: CycleScope,
    pub name: String,
    pub description: Option<String>,
    pub status: ProgramCycleStatus,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Partial update. Absent fields keep their stored value.
///
/// Status is deliberately absent: it moves only through the status
/// transition so the single-active rule is always checked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ProgramCyclePatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl ProgramCyclePatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.start_date.is_none()
            && self.end_date.is_none()
    }

    pub fn touches_dates(&self) -> bool {
        self.start_date.is_some() || self.end_date.is_some()
    }
}

/// A dated, stateful offering of a track within a context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramCycle {
    id: ProgramCycleId,
    scope: CycleScope,
    name: String,
    description: Option<String>,
    status: ProgramCycleStatus,
    period: DateRange,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl ProgramCycle {
    /// Creates a new cycle with a fresh id.
    ///
    /// # Errors
    ///
    /// - `InvalidDateRange` if the end date precedes the start date
    /// - `ValidationFailed` if the name is blank
    pub fn create(new: NewProgramCycle) -> Result<Self, ProgramCycleError> {
        let name = normalize_name(&new.name)?;
        let period = DateRange::new(new.start_date, new.end_date)?;
        let now = Timestamp::now();

        Ok(Self {
            id: ProgramCycleId::new(),
            scope: new.scope,
            name,
            description: normalize_description(new.description),
            status: new.status,
            period,
            created_at: now,
            updated_at: now,
        })
    }

    /// Rebuilds a cycle from stored state without re-running creation rules.
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: ProgramCycleId,
        scope: CycleScope,
        name: String,
        description: Option<String>,
        status: ProgramCycleStatus,
        period: DateRange,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            scope,
            name,
            description,
            status,
            period,
            created_at,
            updated_at,
        }
    }

    // Accessors

    pub fn id(&self) -> ProgramCycleId {
        self.id
    }

    pub fn scope(&self) -> CycleScope {
        self.scope
    }

    pub fn track_id(&self) -> TrackId {
        self.scope.track_id
    }

    pub fn context_id(&self) -> ContextId {
        self.scope.context_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn status(&self) -> ProgramCycleStatus {
        self.status
    }

    pub fn period(&self) -> DateRange {
        self.period
    }

    pub fn start_date(&self) -> NaiveDate {
        self.period.start()
    }

    pub fn end_date(&self) -> NaiveDate {
        self.period.end()
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    /// Active status and `date` inside the cycle's own period.
    ///
    /// The two are independent: an active cycle outside its dates is not
    /// running, and nothing here flips its status.
    pub fn is_running_on(&self, date: NaiveDate) -> bool {
        self.status.is_active() && self.period.contains(date)
    }

    /// The new name if the patch renames this cycle, `None` otherwise.
    pub fn rename_in(&self, patch: &ProgramCyclePatch) -> Option<String> {
        patch
            .name
            .as_deref()
            .map(str::trim)
            .filter(|name| *name != self.name)
            .map(str::to_string)
    }

    /// Moves the cycle to `target`.
    ///
    /// Only the per-status table is consulted; the caller is responsible for
    /// the single-active-cycle check.
    pub fn change_status(&mut self, target: ProgramCycleStatus) -> Result<(), ProgramCycleError> {
        self.status = self.status.transition_to(target)?;
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Applies a partial update.
    ///
    /// Dates are validated on the merged view of supplied and stored values.
    /// On error the cycle is left untouched.
    pub fn apply(&mut self, patch: &ProgramCyclePatch) -> Result<(), ProgramCycleError> {
        let period = if patch.touches_dates() {
            self.period.with_bounds(patch.start_date, patch.end_date)?
        } else {
            self.period
        };
        let name = match &patch.name {
            Some(name) => normalize_name(name)?,
            None => self.name.clone(),
        };

        self.period = period;
        self.name = name;
        if patch.description.is_some() {
            self.description = normalize_description(patch.description.clone());
        }
        self.updated_at = Timestamp::now();
        Ok(())
    }
}

fn normalize_name(name: &str) -> Result<String, ValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::empty_field("name"));
    }
    Ok(trimmed.to_string())
}

fn normalize_description(description: Option<String>) -> Option<String> {
    description
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty())
}
