//! Progress counter port.
//!
//! Progress records belong to the learning module. Deletion of a program
//! cycle only needs to know how many reference it.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ProgramCycleId};

#[async_trait]
pub trait ProgressCounter: Send + Sync {
    /// Number of progress records referencing `cycle_id`.
    async fn count_for_cycle(&self, cycle_id: ProgramCycleId) -> Result<u64, DomainError>;
}
