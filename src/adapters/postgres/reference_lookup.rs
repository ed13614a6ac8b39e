//! PostgreSQL lookups for tracks and contexts.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::foundation::{ContextId, DomainError, TrackId};
use crate::ports::{ContextLookup, ContextRef, TrackLookup, TrackRef};

/// Reads the `tracks` and `contexts` tables.
#[derive(Clone)]
pub struct PostgresReferenceLookup {
    pool: PgPool,
}

impl PostgresReferenceLookup {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TrackLookup for PostgresReferenceLookup {
    async fn find_track(&self, id: TrackId) -> Result<Option<TrackRef>, DomainError> {
        let row: Option<(i64, String)> = sqlx::query_as("SELECT id, name FROM tracks WHERE id = $1")
            .bind(id.value())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::database("fetch track", e))?;

        Ok(row.map(|(id, name)| TrackRef {
            id: TrackId::new(id),
            name,
        }))
    }
}

#[async_trait]
impl ContextLookup for PostgresReferenceLookup {
    async fn find_context(&self, id: ContextId) -> Result<Option<ContextRef>, DomainError> {
        let row: Option<(i64, String)> =
            sqlx::query_as("SELECT id, name FROM contexts WHERE id = $1")
                .bind(id.value())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| DomainError::database("fetch context", e))?;

        Ok(row.map(|(id, name)| ContextRef {
            id: ContextId::new(id),
            name,
        }))
    }
}
