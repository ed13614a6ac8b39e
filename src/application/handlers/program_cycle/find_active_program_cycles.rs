//! FindActiveProgramCyclesHandler - Cycles running today.
//!
//! "Running" needs both active status and a period that contains the date.
//! Status is never changed here; an active cycle past its end date simply
//! drops out of the result.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::domain::foundation::{ContextId, Timestamp, TrackId};
use crate::domain::program_cycle::{ProgramCycle, ProgramCycleError};
use crate::ports::{ActiveCycleFilter, ProgramCycleRepository};

/// Query for running cycles, optionally filtered.
#[derive(Debug, Clone, Default)]
pub struct FindActiveProgramCyclesQuery {
    pub context_id: Option<ContextId>,
    pub track_id: Option<TrackId>,
    /// Reference date; today (UTC) when absent.
    pub as_of: Option<NaiveDate>,
}

pub struct FindActiveProgramCyclesHandler {
    repository: Arc<dyn ProgramCycleRepository>,
}

impl FindActiveProgramCyclesHandler {
    pub fn new(repository: Arc<dyn ProgramCycleRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        query: FindActiveProgramCyclesQuery,
    ) -> Result<Vec<ProgramCycle>, ProgramCycleError> {
        let as_of = query.as_of.unwrap_or_else(Timestamp::today);
        let filter = ActiveCycleFilter {
            context_id: query.context_id,
            track_id: query.track_id,
        };
        Ok(self.repository.find_running_on(as_of, filter).await?)
    }
}
