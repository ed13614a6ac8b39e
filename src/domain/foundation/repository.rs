//! Base repository trait for persistence operations.
//!
//! Aggregate repositories extend `Repository<T, ID>` and add only their
//! domain-specific queries.
//!
//! ```ignore
//! #[async_trait]
//! pub trait ProgramCycleRepository: Repository<ProgramCycle, ProgramCycleId> {
//!     async fn find_by_name(&self, scope: &CycleScope, name: &str)
//!         -> Result<Option<ProgramCycle>, DomainError>;
//! }
//! ```

use async_trait::async_trait;
use std::fmt::Debug;

use super::DomainError;

/// Base trait for aggregate repositories.
///
/// All methods return `Result<_, DomainError>`; adapters convert their own
/// failures (database errors, constraint violations) into `DomainError`.
#[async_trait]
pub trait Repository<T, ID>: Send + Sync
where
    T: Send + Sync,
    ID: Send + Sync + Debug + 'static,
{
    /// Finds an aggregate by its unique identifier.
    ///
    /// Returns `Ok(None)` if the aggregate doesn't exist.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, DomainError>;

    /// Persists a new aggregate.
    async fn save(&self, entity: &T) -> Result<(), DomainError>;

    /// Updates an existing aggregate.
    async fn update(&self, entity: &T) -> Result<(), DomainError>;

    /// Deletes an aggregate by its identifier. The delete is physical.
    async fn delete(&self, id: ID) -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ErrorCode;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Note {
        id: u32,
        body: String,
    }

    struct NoteRepo {
        notes: Mutex<HashMap<u32, Note>>,
    }

    #[async_trait]
    impl Repository<Note, u32> for NoteRepo {
        async fn find_by_id(&self, id: u32) -> Result<Option<Note>, DomainError> {
            Ok(self.notes.lock().unwrap().get(&id).cloned())
        }

        async fn save(&self, entity: &Note) -> Result<(), DomainError> {
            self.notes.lock().unwrap().insert(entity.id, entity.clone());
            Ok(())
        }

        async fn update(&self, entity: &Note) -> Result<(), DomainError> {
            self.save(entity).await
        }

        async fn delete(&self, id: u32) -> Result<(), DomainError> {
            self.notes
                .lock()
                .unwrap()
                .remove(&id)
                .map(|_| ())
                .ok_or_else(|| DomainError::new(ErrorCode::InternalError, "missing"))
        }
    }

    #[tokio::test]
    async fn trait_object_round_trips_through_delete() {
        let repo: Box<dyn Repository<Note, u32>> = Box::new(NoteRepo {
            notes: Mutex::new(HashMap::new()),
        });
        repo.save(&Note { id: 1, body: "hello".to_string() }).await.unwrap();
        assert!(repo.find_by_id(1).await.unwrap().is_some());

        repo.delete(1).await.unwrap();
        assert!(repo.find_by_id(1).await.unwrap().is_none());
        assert!(repo.delete(1).await.is_err());
    }

    #[allow(dead_code)]
    fn assert_object_safe(_: &dyn Repository<Note, u32>) {}
}
