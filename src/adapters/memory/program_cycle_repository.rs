//! In-memory ProgramCycleRepository.
//!
//! Enforces the same uniqueness rules as the PostgreSQL indexes so tests
//! exercise the conflict path of racing writers.

use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use crate::domain::foundation::{DomainError, ErrorCode, ProgramCycleId, Repository};
use crate::domain::program_cycle::{CycleScope, ProgramCycle};
use crate::ports::{ActiveCycleFilter, ProgramCycleRepository};

#[derive(Default)]
pub struct InMemoryProgramCycleRepository {
    cycles: RwLock<HashMap<ProgramCycleId, ProgramCycle>>,
}

impl InMemoryProgramCycleRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn snapshot(&self) -> Vec<ProgramCycle> {
        self.cycles
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .cloned()
            .collect()
    }

    fn write(
        &self,
    ) -> Result<std::sync::RwLockWriteGuard<'_, HashMap<ProgramCycleId, ProgramCycle>>, DomainError>
    {
        self.cycles
            .write()
            .map_err(|_| DomainError::new(ErrorCode::InternalError, "Program cycle store poisoned"))
    }
}

/// Mirrors the unique indexes on (track, context, name) and on the active
/// cycle of a (track, context) pair.
fn check_constraints(
    cycles: &HashMap<ProgramCycleId, ProgramCycle>,
    candidate: &ProgramCycle,
) -> Result<(), DomainError> {
    let scope = candidate.scope();
    let others = cycles
        .values()
        .filter(|c| c.id() != candidate.id() && c.scope() == scope);

    for other in others {
        if other.name() == candidate.name() {
            return Err(DomainError::new(
                ErrorCode::ProgramCycleNameTaken,
                format!("Name '{}' already used in {}", candidate.name(), scope),
            ));
        }
        if other.status().is_active() && candidate.status().is_active() {
            return Err(DomainError::new(
                ErrorCode::ActiveProgramCycleExists,
                format!("{} already has an active cycle", scope),
            ));
        }
    }
    Ok(())
}

#[async_trait]
impl Repository<ProgramCycle, ProgramCycleId> for InMemoryProgramCycleRepository {
    async fn find_by_id(&self, id: ProgramCycleId) -> Result<Option<ProgramCycle>, DomainError> {
        Ok(self
            .cycles
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&id)
            .cloned())
    }

    async fn save(&self, cycle: &ProgramCycle) -> Result<(), DomainError> {
        let mut cycles = self.write()?;
        check_constraints(&cycles, cycle)?;
        cycles.insert(cycle.id(), cycle.clone());
        Ok(())
    }

    async fn update(&self, cycle: &ProgramCycle) -> Result<(), DomainError> {
        let mut cycles = self.write()?;
        if !cycles.contains_key(&cycle.id()) {
            return Err(DomainError::new(
                ErrorCode::ProgramCycleNotFound,
                format!("Program cycle not found: {}", cycle.id()),
            ));
        }
        check_constraints(&cycles, cycle)?;
        cycles.insert(cycle.id(), cycle.clone());
        Ok(())
    }

    async fn delete(&self, id: ProgramCycleId) -> Result<(), DomainError> {
        match self.write()?.remove(&id) {
            Some(_) => Ok(()),
            None => Err(DomainError::new(
                ErrorCode::ProgramCycleNotFound,
                format!("Program cycle not found: {}", id),
            )),
        }
    }
}

#[async_trait]
impl ProgramCycleRepository for InMemoryProgramCycleRepository {
    async fn find_by_name(
        &self,
        scope: &CycleScope,
        name: &str,
    ) -> Result<Option<ProgramCycle>, DomainError> {
        Ok(self
            .snapshot()
            .into_iter()
            .find(|c| c.scope() == *scope && c.name() == name))
    }

    async fn find_active_in_scope(
        &self,
        scope: &CycleScope,
    ) -> Result<Option<ProgramCycle>, DomainError> {
        Ok(self
            .snapshot()
            .into_iter()
            .find(|c| c.scope() == *scope && c.status().is_active()))
    }

    async fn find_running_on(
        &self,
        date: NaiveDate,
        filter: ActiveCycleFilter,
    ) -> Result<Vec<ProgramCycle>, DomainError> {
        let mut running: Vec<_> = self
            .snapshot()
            .into_iter()
            .filter(|c| c.is_running_on(date) && filter.matches(c))
            .collect();
        running.sort_by(|a, b| {
            a.start_date()
                .cmp(&b.start_date())
                .then_with(|| a.name().cmp(b.name()))
        });
        Ok(running)
    }
}
