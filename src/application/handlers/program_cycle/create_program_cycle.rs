//! CreateProgramCycleHandler - Command handler for creating program cycles.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::domain::foundation::{
    CommandMetadata, ContextId, SerializableDomainEvent, TrackId,
};
use crate::domain::program_cycle::{
    CycleScope, NewProgramCycle, ProgramCycle, ProgramCycleCreated, ProgramCycleError,
    ProgramCycleStatus,
};
use crate::ports::{
    ContextLookup, EventPublisher, ProgramCycleRepository, ScopeLock, TrackLookup,
};

use super::ProgramCycleDetails;

/// Command to create a program cycle.
#[derive(Debug, Clone)]
pub struct CreateProgramCycleCommand {
    pub track_id: TrackId,
    pub context_id: ContextId,
    pub name: String,
    pub description: Option<String>,
    /// Defaults to draft.
    pub status: Option<ProgramCycleStatus>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl CreateProgramCycleCommand {
    fn scope(&self) -> CycleScope {
        CycleScope::new(self.track_id, self.context_id)
    }
}

/// Handler for creating program cycles.
pub struct CreateProgramCycleHandler {
    repository: Arc<dyn ProgramCycleRepository>,
    tracks: Arc<dyn TrackLookup>,
    contexts: Arc<dyn ContextLookup>,
    scope_lock: Arc<dyn ScopeLock>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl CreateProgramCycleHandler {
    pub fn new(
        repository: Arc<dyn ProgramCycleRepository>,
        tracks: Arc<dyn TrackLookup>,
        contexts: Arc<dyn ContextLookup>,
        scope_lock: Arc<dyn ScopeLock>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            repository,
            tracks,
            contexts,
            scope_lock,
            event_publisher,
        }
    }

    #[tracing::instrument(
        name = "create_program_cycle",
        skip(self, cmd, metadata),
        fields(track_id = %cmd.track_id, context_id = %cmd.context_id, user_id = %metadata.user_id)
    )]
    pub async fn handle(
        &self,
        cmd: CreateProgramCycleCommand,
        metadata: CommandMetadata,
    ) -> Result<ProgramCycleDetails, ProgramCycleError> {
        let scope = cmd.scope();

        // 1. Build the aggregate (validates name and dates)
        let cycle = ProgramCycle::create(NewProgramCycle {
            scope,
            name: cmd.name,
            description: cmd.description,
            status: cmd.status.unwrap_or_default(),
            start_date: cmd.start_date,
            end_date: cmd.end_date,
        })?;

        // 2. Resolve references
        let track = self
            .tracks
            .find_track(scope.track_id)
            .await?
            .ok_or(ProgramCycleError::TrackNotFound(scope.track_id))?;
        let context = self
            .contexts
            .find_context(scope.context_id)
            .await?
            .ok_or(ProgramCycleError::ContextNotFound(scope.context_id))?;

        // 3. Scope-wide invariants, checked and written under the scope lock
        let _guard = self.scope_lock.acquire(scope).await?;

        if self
            .repository
            .find_by_name(&scope, cycle.name())
            .await?
            .is_some()
        {
            tracing::warn!(cycle_name = cycle.name(), "program cycle name already taken");
            return Err(ProgramCycleError::name_taken(scope, cycle.name()));
        }

        if cycle.status().is_active() {
            if let Some(existing) = self.repository.find_active_in_scope(&scope).await? {
                tracing::warn!(existing_id = %existing.id(), "scope already has an active cycle");
                return Err(ProgramCycleError::active_cycle_exists(
                    scope,
                    existing.id(),
                    existing.name(),
                ));
            }
        }

        // 4. Persist
        self.repository.save(&cycle).await?;
        tracing::info!(program_cycle_id = %cycle.id(), status = %cycle.status(), "program cycle created");

        // 5. Publish
        let envelope = ProgramCycleCreated::from_cycle(&cycle, metadata.user_id)
            .to_envelope()
            .for_command(&metadata);
        self.event_publisher.publish(envelope).await?;

        Ok(ProgramCycleDetails {
            cycle,
            track,
            context,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::program_cycle::test_support::*;
    use crate::domain::program_cycle::ErrorKind;

    fn command(name: &str) -> CreateProgramCycleCommand {
        CreateProgramCycleCommand {
            track_id: TrackId::new(1),
            context_id: ContextId::new(1),
            name: name.to_string(),
            description: None,
            status: None,
            start_date: date(2026, 1, 1),
            end_date: date(2026, 6, 30),
        }
    }

    fn handler(fixture: &Fixture) -> CreateProgramCycleHandler {
        CreateProgramCycleHandler::new(
            fixture.repository.clone(),
            fixture.references.clone(),
            fixture.references.clone(),
            fixture.lock.clone(),
            fixture.publisher.clone(),
        )
    }

    #[tokio::test]
    async fn creates_draft_cycle_and_publishes_event() {
        let fixture = Fixture::new();
        let details = handler(&fixture)
            .handle(command("2026.1"), CommandMetadata::test_fixture())
            .await
            .unwrap();

        assert_eq!(details.cycle.status(), ProgramCycleStatus::Draft);
        assert_eq!(details.track.name, "Track 1");
        assert_eq!(details.context.name, "Context 1");
        assert_eq!(fixture.repository.stored().len(), 1);
        assert_eq!(fixture.publisher.event_types(), vec!["program_cycle.created.v1"]);
    }

    #[tokio::test]
    async fn duplicate_name_in_scope_is_a_conflict() {
        let fixture = Fixture::new();
        let handler = handler(&fixture);
        handler
            .handle(command("2026.1"), CommandMetadata::test_fixture())
            .await
            .unwrap();

        let err = handler
            .handle(command("2026.1"), CommandMetadata::test_fixture())
            .await
            .unwrap_err();

        assert!(matches!(err, ProgramCycleError::NameTaken { .. }));
        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert_eq!(fixture.repository.stored().len(), 1);
    }

    #[tokio::test]
    async fn same_name_in_another_context_is_allowed() {
        let fixture = Fixture::new();
        let handler = handler(&fixture);
        handler
            .handle(command("2026.1"), CommandMetadata::test_fixture())
            .await
            .unwrap();

        let mut other = command("2026.1");
        other.context_id = ContextId::new(2);
        assert!(handler.handle(other, CommandMetadata::test_fixture()).await.is_ok());
    }

    #[tokio::test]
    async fn unknown_track_is_not_found() {
        let fixture = Fixture::new();
        let mut cmd = command("2026.1");
        cmd.track_id = TrackId::new(404);

        let err = handler(&fixture)
            .handle(cmd, CommandMetadata::test_fixture())
            .await
            .unwrap_err();

        assert_eq!(err, ProgramCycleError::TrackNotFound(TrackId::new(404)));
        assert!(fixture.repository.stored().is_empty());
    }

    #[tokio::test]
    async fn unknown_context_is_not_found() {
        let fixture = Fixture::new();
        let mut cmd = command("2026.1");
        cmd.context_id = ContextId::new(404);

        let err = handler(&fixture)
            .handle(cmd, CommandMetadata::test_fixture())
            .await
            .unwrap_err();

        assert_eq!(err, ProgramCycleError::ContextNotFound(ContextId::new(404)));
    }

    #[tokio::test]
    async fn inverted_dates_fail_validation_without_writing() {
        let fixture = Fixture::new();
        let mut cmd = command("2026.1");
        cmd.end_date = date(2025, 12, 31);

        let err = handler(&fixture)
            .handle(cmd, CommandMetadata::test_fixture())
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::ValidationFailure);
        assert!(fixture.repository.stored().is_empty());
        assert!(fixture.publisher.event_types().is_empty());
    }

    #[tokio::test]
    async fn creating_active_cycle_checks_single_active_rule() {
        let fixture = Fixture::new();
        let handler = handler(&fixture);
        let mut first = command("2026.1");
        first.status = Some(ProgramCycleStatus::Active);
        handler.handle(first, CommandMetadata::test_fixture()).await.unwrap();

        let mut second = command("2026.2");
        second.status = Some(ProgramCycleStatus::Active);
        let err = handler
            .handle(second, CommandMetadata::test_fixture())
            .await
            .unwrap_err();

        assert!(matches!(err, ProgramCycleError::ActiveCycleExists { ref existing_name, .. } if existing_name == "2026.1"));
    }

    #[tokio::test]
    async fn save_failure_is_infrastructure_and_publishes_nothing() {
        let fixture = Fixture::new();
        fixture.repository.fail_writes();

        let err = handler(&fixture)
            .handle(command("2026.1"), CommandMetadata::test_fixture())
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Infrastructure);
        assert!(fixture.publisher.event_types().is_empty());
    }
}
