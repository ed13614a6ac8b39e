//! Program-cycle repository port (write side).
//!
//! Extends the base [`Repository`] with the scoped lookups the lifecycle
//! rules need. Every scoped query is keyed on the (track, context) pair.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::foundation::{ContextId, DomainError, ProgramCycleId, Repository, TrackId};
use crate::domain::program_cycle::{CycleScope, ProgramCycle};

/// Optional filters for [`ProgramCycleRepository::find_running_on`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActiveCycleFilter {
    pub context_id: Option<ContextId>,
    pub track_id: Option<TrackId>,
}

impl ActiveCycleFilter {
    pub fn matches(&self, cycle: &ProgramCycle) -> bool {
        self.context_id.map_or(true, |id| id == cycle.context_id())
            && self.track_id.map_or(true, |id| id == cycle.track_id())
    }
}

/// Repository port for ProgramCycle persistence.
///
/// Implementations must map violations of the storage-level uniqueness
/// constraints to `DomainError` with code `ProgramCycleNameTaken` or
/// `ActiveProgramCycleExists`, so racing writers surface as conflicts.
#[async_trait]
pub trait ProgramCycleRepository: Repository<ProgramCycle, ProgramCycleId> {
    /// Finds the cycle in `scope` with exactly this name.
    async fn find_by_name(
        &self,
        scope: &CycleScope,
        name: &str,
    ) -> Result<Option<ProgramCycle>, DomainError>;

    /// Finds the cycle in `scope` whose status is active, if any.
    ///
    /// Dates are not considered.
    async fn find_active_in_scope(
        &self,
        scope: &CycleScope,
    ) -> Result<Option<ProgramCycle>, DomainError>;

    /// Cycles that are active and whose period contains `date`.
    ///
    /// Ordered by start date, then name.
    async fn find_running_on(
        &self,
        date: NaiveDate,
        filter: ActiveCycleFilter,
    ) -> Result<Vec<ProgramCycle>, DomainError>;
}
