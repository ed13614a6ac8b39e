//! UpdateProgramCycleStatusHandler - Moves a cycle to another status.
//!
//! Any status may follow any other. Moving into `active` is the one case
//! that consults the rest of the scope.

use std::sync::Arc;

use crate::domain::foundation::{
    CommandMetadata, EventId, ProgramCycleId, SerializableDomainEvent,
};
use crate::domain::program_cycle::{
    ProgramCycle, ProgramCycleError, ProgramCycleStatus, ProgramCycleStatusChanged,
};
use crate::ports::{EventPublisher, ProgramCycleRepository, ScopeLock};

/// Command to change a cycle's status.
#[derive(Debug, Clone)]
pub struct UpdateProgramCycleStatusCommand {
    pub id: ProgramCycleId,
    pub status: ProgramCycleStatus,
}

pub struct UpdateProgramCycleStatusHandler {
    repository: Arc<dyn ProgramCycleRepository>,
    scope_lock: Arc<dyn ScopeLock>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl UpdateProgramCycleStatusHandler {
    pub fn new(
        repository: Arc<dyn ProgramCycleRepository>,
        scope_lock: Arc<dyn ScopeLock>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            repository,
            scope_lock,
            event_publisher,
        }
    }

    #[tracing::instrument(
        name = "update_program_cycle_status",
        skip(self, cmd, metadata),
        fields(program_cycle_id = %cmd.id, status = %cmd.status, user_id = %metadata.user_id)
    )]
    pub async fn handle(
        &self,
        cmd: UpdateProgramCycleStatusCommand,
        metadata: CommandMetadata,
    ) -> Result<ProgramCycle, ProgramCycleError> {
        let scope = self
            .repository
            .find_by_id(cmd.id)
            .await?
            .ok_or(ProgramCycleError::NotFound(cmd.id))?
            .scope();

        let _guard = self.scope_lock.acquire(scope).await?;

        // Re-read under the lock so the check and write see the same state.
        let mut cycle = self
            .repository
            .find_by_id(cmd.id)
            .await?
            .ok_or(ProgramCycleError::NotFound(cmd.id))?;

        if cmd.status.is_active() {
            if let Some(existing) = self.repository.find_active_in_scope(&scope).await? {
                if existing.id() != cycle.id() {
                    tracing::warn!(existing_id = %existing.id(), "scope already has an active cycle");
                    return Err(ProgramCycleError::active_cycle_exists(
                        scope,
                        existing.id(),
                        existing.name(),
                    ));
                }
            }
        }

        let from = cycle.status();
        cycle.change_status(cmd.status)?;
        self.repository.update(&cycle).await?;
        tracing::info!(%from, to = %cycle.status(), "program cycle status changed");

        let event = ProgramCycleStatusChanged {
            event_id: EventId::new(),
            program_cycle_id: cycle.id(),
            track_id: cycle.track_id(),
            context_id: cycle.context_id(),
            from,
            to: cycle.status(),
            changed_by: metadata.user_id,
            changed_at: cycle.updated_at(),
        };
        let envelope = event
            .to_envelope()
            .for_command(&metadata);
        self.event_publisher.publish(envelope).await?;

        Ok(cycle)
    }
}
