//! GetProgramCycleHandler - Query handler for a single cycle.

use std::sync::Arc;

use crate::domain::foundation::ProgramCycleId;
use crate::domain::program_cycle::{ProgramCycle, ProgramCycleError};
use crate::ports::ProgramCycleRepository;

/// Query for a program cycle by id.
#[derive(Debug, Clone)]
pub struct GetProgramCycleQuery {
    pub id: ProgramCycleId,
}

pub struct GetProgramCycleHandler {
    repository: Arc<dyn ProgramCycleRepository>,
}

impl GetProgramCycleHandler {
    pub fn new(repository: Arc<dyn ProgramCycleRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, query: GetProgramCycleQuery) -> Result<ProgramCycle, ProgramCycleError> {
        self.repository
            .find_by_id(query.id)
            .await?
            .ok_or(ProgramCycleError::NotFound(query.id))
    }
}
