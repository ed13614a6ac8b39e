//! PostgreSQL implementation of MembershipReader.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;

use crate::domain::foundation::{
    ContextId, DateWindow, DomainError, MembershipId, Timestamp, UserId,
};
use crate::domain::membership::Membership;
use crate::ports::MembershipReader;

pub struct PostgresMembershipReader {
    pool: PgPool,
}

impl PostgresMembershipReader {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct MembershipRow {
    id: i64,
    user_id: i64,
    context_id: i64,
    start_date: NaiveDate,
    end_date: Option<NaiveDate>,
    active: bool,
    created_at: DateTime<Utc>,
}

impl From<MembershipRow> for Membership {
    fn from(row: MembershipRow) -> Self {
        Membership {
            id: MembershipId::new(row.id),
            user_id: UserId::new(row.user_id),
            context_id: ContextId::new(row.context_id),
            window: DateWindow::new(row.start_date, row.end_date),
            active: row.active,
            created_at: Timestamp::from_datetime(row.created_at),
        }
    }
}

#[async_trait]
impl MembershipReader for PostgresMembershipReader {
    async fn active_for_user(&self, user_id: UserId) -> Result<Vec<Membership>, DomainError> {
        let rows = sqlx::query_as::<_, MembershipRow>(
            r#"
            SELECT id, user_id, context_id, start_date, end_date, active, created_at
            FROM memberships
            WHERE user_id = $1 AND active
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(user_id.value())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("fetch memberships", e))?;

        Ok(rows.into_iter().map(Membership::from).collect())
    }
}
