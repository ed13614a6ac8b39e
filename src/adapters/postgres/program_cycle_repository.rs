//! PostgreSQL implementation of ProgramCycleRepository.
//!
//! Status is stored as snake_case text. The scoped uniqueness rules are
//! backed by two indexes (see `migrations/`); their violations are mapped to
//! conflict codes so a write that raced past the application checks still
//! surfaces as a conflict.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{
    ContextId, DateRange, DomainError, ErrorCode, ProgramCycleId, Repository, Timestamp, TrackId,
};
use crate::domain::program_cycle::{CycleScope, ProgramCycle, ProgramCycleStatus};
use crate::ports::{ActiveCycleFilter, ProgramCycleRepository};

const NAME_INDEX: &str = "program_cycles_scope_name_idx";
const ACTIVE_INDEX: &str = "program_cycles_one_active_idx";

const SELECT_COLUMNS: &str = r#"
    SELECT id, track_id, context_id, name, description, status,
           start_date, end_date, created_at, updated_at
    FROM program_cycles
"#;

/// PostgreSQL implementation of ProgramCycleRepository.
#[derive(Clone)]
pub struct PostgresProgramCycleRepository {
    pool: PgPool,
}

impl PostgresProgramCycleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ProgramCycleRow {
    id: Uuid,
    track_id: i64,
    context_id: i64,
    name: String,
    description: Option<String>,
    status: String,
    start_date: NaiveDate,
    end_date: NaiveDate,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ProgramCycleRow> for ProgramCycle {
    type Error = DomainError;

    fn try_from(row: ProgramCycleRow) -> Result<Self, Self::Error> {
        let status: ProgramCycleStatus = row.status.parse().map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Corrupt program cycle row: {}", e))
        })?;
        let period = DateRange::new(row.start_date, row.end_date).map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Corrupt program cycle row: {}", e))
        })?;

        Ok(ProgramCycle::reconstitute(
            ProgramCycleId::from_uuid(row.id),
            CycleScope::new(TrackId::new(row.track_id), ContextId::new(row.context_id)),
            row.name,
            row.description,
            status,
            period,
            Timestamp::from_datetime(row.created_at),
            Timestamp::from_datetime(row.updated_at),
        ))
    }
}

/// Maps unique-index violations to conflict codes, everything else to a
/// database error.
fn write_error(operation: &str, err: sqlx::Error) -> DomainError {
    if let sqlx::Error::Database(db) = &err {
        if db.is_unique_violation() {
            match db.constraint() {
                Some(NAME_INDEX) => {
                    return DomainError::new(
                        ErrorCode::ProgramCycleNameTaken,
                        "A program cycle with this name already exists in the scope",
                    )
                    .with_detail("constraint", NAME_INDEX)
                }
                Some(ACTIVE_INDEX) => {
                    return DomainError::new(
                        ErrorCode::ActiveProgramCycleExists,
                        "Another program cycle in the scope is already active",
                    )
                    .with_detail("constraint", ACTIVE_INDEX)
                }
                _ => {}
            }
        }
    }
    DomainError::database(operation, err)
}

/// A progress row referencing the cycle blocks the delete through its
/// foreign key.
fn delete_error(err: sqlx::Error) -> DomainError {
    if let sqlx::Error::Database(db) = &err {
        if db.is_foreign_key_violation() {
            let mut error = DomainError::new(
                ErrorCode::ProgressRecordsExist,
                "Progress records reference this program cycle",
            );
            if let Some(constraint) = db.constraint() {
                error = error.with_detail("constraint", constraint);
            }
            return error;
        }
    }
    DomainError::database("delete program cycle", err)
}

fn rows_to_cycles(rows: Vec<ProgramCycleRow>) -> Result<Vec<ProgramCycle>, DomainError> {
    rows.into_iter().map(ProgramCycle::try_from).collect()
}

#[async_trait]
impl Repository<ProgramCycle, ProgramCycleId> for PostgresProgramCycleRepository {
    async fn find_by_id(&self, id: ProgramCycleId) -> Result<Option<ProgramCycle>, DomainError> {
        let row = sqlx::query_as::<_, ProgramCycleRow>(&format!("{} WHERE id = $1", SELECT_COLUMNS))
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::database("fetch program cycle", e))?;

        row.map(ProgramCycle::try_from).transpose()
    }

    async fn save(&self, cycle: &ProgramCycle) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO program_cycles (
                id, track_id, context_id, name, description, status,
                start_date, end_date, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(cycle.id().as_uuid())
        .bind(cycle.track_id().value())
        .bind(cycle.context_id().value())
        .bind(cycle.name())
        .bind(cycle.description())
        .bind(cycle.status().as_str())
        .bind(cycle.start_date())
        .bind(cycle.end_date())
        .bind(cycle.created_at().as_datetime())
        .bind(cycle.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| write_error("insert program cycle", e))?;

        Ok(())
    }

    async fn update(&self, cycle: &ProgramCycle) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE program_cycles SET
                name = $2,
                description = $3,
                status = $4,
                start_date = $5,
                end_date = $6,
                updated_at = $7
            WHERE id = $1
            "#,
        )
        .bind(cycle.id().as_uuid())
        .bind(cycle.name())
        .bind(cycle.description())
        .bind(cycle.status().as_str())
        .bind(cycle.start_date())
        .bind(cycle.end_date())
        .bind(cycle.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| write_error("update program cycle", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::ProgramCycleNotFound,
                format!("Program cycle not found: {}", cycle.id()),
            ));
        }

        Ok(())
    }

    async fn delete(&self, id: ProgramCycleId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM program_cycles WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(delete_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::ProgramCycleNotFound,
                format!("Program cycle not found: {}", id),
            ));
        }

        Ok(())
    }

}

#[async_trait]
impl ProgramCycleRepository for PostgresProgramCycleRepository {
    async fn find_by_name(
        &self,
        scope: &CycleScope,
        name: &str,
    ) -> Result<Option<ProgramCycle>, DomainError> {
        let row = sqlx::query_as::<_, ProgramCycleRow>(&format!(
            "{} WHERE track_id = $1 AND context_id = $2 AND name = $3",
            SELECT_COLUMNS
        ))
        .bind(scope.track_id.value())
        .bind(scope.context_id.value())
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database("fetch program cycle by name", e))?;

        row.map(ProgramCycle::try_from).transpose()
    }

    async fn find_active_in_scope(
        &self,
        scope: &CycleScope,
    ) -> Result<Option<ProgramCycle>, DomainError> {
        let row = sqlx::query_as::<_, ProgramCycleRow>(&format!(
            "{} WHERE track_id = $1 AND context_id = $2 AND status = 'active' LIMIT 1",
            SELECT_COLUMNS
        ))
        .bind(scope.track_id.value())
        .bind(scope.context_id.value())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database("fetch active program cycle", e))?;

        row.map(ProgramCycle::try_from).transpose()
    }

    async fn find_running_on(
        &self,
        date: NaiveDate,
        filter: ActiveCycleFilter,
    ) -> Result<Vec<ProgramCycle>, DomainError> {
        let rows = sqlx::query_as::<_, ProgramCycleRow>(&format!(
            r#"{}
            WHERE status = 'active'
              AND start_date <= $1 AND end_date >= $1
              AND ($2::BIGINT IS NULL OR context_id = $2)
              AND ($3::BIGINT IS NULL OR track_id = $3)
            ORDER BY start_date, name
            "#,
            SELECT_COLUMNS
        ))
        .bind(date)
        .bind(filter.context_id.map(|id| id.value()))
        .bind(filter.track_id.map(|id| id.value()))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("fetch running program cycles", e))?;

        rows_to_cycles(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(status: &str, start: NaiveDate, end: NaiveDate) -> ProgramCycleRow {
        ProgramCycleRow {
            id: Uuid::new_v4(),
            track_id: 4,
            context_id: 8,
            name: "2026.1".to_string(),
            description: None,
            status: status.to_string(),
            start_date: start,
            end_date: end,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn row_converts_to_aggregate() {
        let cycle = ProgramCycle::try_from(row("closed", d(2026, 1, 1), d(2026, 2, 1))).unwrap();
        assert_eq!(cycle.status(), ProgramCycleStatus::Closed);
        assert_eq!(cycle.scope(), CycleScope::new(TrackId::new(4), ContextId::new(8)));
    }

    #[test]
    fn unknown_status_is_a_database_error() {
        let err = ProgramCycle::try_from(row("paused", d(2026, 1, 1), d(2026, 2, 1))).unwrap_err();
        assert_eq!(err.code, ErrorCode::DatabaseError);
    }

    #[test]
    fn inverted_stored_dates_are_a_database_error() {
        let err = ProgramCycle::try_from(row("draft", d(2026, 2, 1), d(2026, 1, 1))).unwrap_err();
        assert_eq!(err.code, ErrorCode::DatabaseError);
    }

    #[test]
    fn non_database_errors_map_to_database_error_code() {
        let err = write_error("insert program cycle", sqlx::Error::RowNotFound);
        assert_eq!(err.code, ErrorCode::DatabaseError);
        assert!(err.message.starts_with("Failed to insert program cycle"));
    }

    #[test]
    fn non_database_delete_errors_stay_database_errors() {
        let err = delete_error(sqlx::Error::PoolTimedOut);
        assert_eq!(err.code, ErrorCode::DatabaseError);
        assert!(err.message.starts_with("Failed to delete program cycle"));
    }
}
