//! PostgreSQL implementation of ProgressCounter.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::foundation::{DomainError, ProgramCycleId};
use crate::ports::ProgressCounter;

pub struct PostgresProgressCounter {
    pool: PgPool,
}

impl PostgresProgressCounter {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProgressCounter for PostgresProgressCounter {
    async fn count_for_cycle(&self, cycle_id: ProgramCycleId) -> Result<u64, DomainError> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM progress_records WHERE program_cycle_id = $1")
                .bind(cycle_id.as_uuid())
                .fetch_one(&self.pool)
                .await
                .map_err(|e| DomainError::database("count progress records", e))?;

        Ok(count.max(0) as u64)
    }
}
