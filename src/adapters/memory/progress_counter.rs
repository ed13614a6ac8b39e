//! In-memory ProgressCounter.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use crate::domain::foundation::{DomainError, ProgramCycleId};
use crate::ports::ProgressCounter;

#[derive(Default)]
pub struct InMemoryProgressCounter {
    counts: RwLock<HashMap<ProgramCycleId, u64>>,
}

impl InMemoryProgressCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one more progress entry against `cycle_id`.
    pub fn record(&self, cycle_id: ProgramCycleId) {
        *self
            .counts
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(cycle_id)
            .or_insert(0) += 1;
    }

    /// Drops all progress for `cycle_id`, as after a migration to another cycle.
    pub fn clear(&self, cycle_id: ProgramCycleId) {
        self.counts
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&cycle_id);
    }
}

#[async_trait]
impl ProgressCounter for InMemoryProgressCounter {
    async fn count_for_cycle(&self, cycle_id: ProgramCycleId) -> Result<u64, DomainError> {
        Ok(self
            .counts
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&cycle_id)
            .copied()
            .unwrap_or(0))
    }
}
