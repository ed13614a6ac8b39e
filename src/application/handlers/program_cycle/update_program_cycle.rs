//! UpdateProgramCycleHandler - Partial update of name, description and dates.

use std::sync::Arc;

use crate::domain::foundation::{
    CommandMetadata, EventId, ProgramCycleId, SerializableDomainEvent,
};
use crate::domain::program_cycle::{
    ProgramCycle, ProgramCycleError, ProgramCyclePatch, ProgramCycleUpdated,
};
use crate::ports::{EventPublisher, ProgramCycleRepository, ScopeLock};

/// Command to patch a program cycle.
#[derive(Debug, Clone)]
pub struct UpdateProgramCycleCommand {
    pub id: ProgramCycleId,
    pub patch: ProgramCyclePatch,
}

pub struct UpdateProgramCycleHandler {
    repository: Arc<dyn ProgramCycleRepository>,
    scope_lock: Arc<dyn ScopeLock>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl UpdateProgramCycleHandler {
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
        name = "update_program_cycle",
        skip(self, cmd, metadata),
        fields(program_cycle_id = %cmd.id, user_id = %metadata.user_id)
    )]
    pub async fn handle(
        &self,
        cmd: UpdateProgramCycleCommand,
        metadata: CommandMetadata,
    ) -> Result<ProgramCycle, ProgramCycleError> {
        let mut cycle = self
            .repository
            .find_by_id(cmd.id)
            .await?
            .ok_or(ProgramCycleError::NotFound(cmd.id))?;

        if cmd.patch.is_empty() {
            return Ok(cycle);
        }

        let _guard = match cycle.rename_in(&cmd.patch) {
            Some(new_name) => {
                let scope = cycle.scope();
                let guard = self.scope_lock.acquire(scope).await?;
                if let Some(other) = self.repository.find_by_name(&scope, &new_name).await? {
                    if other.id() != cycle.id() {
                        tracing::warn!(cycle_name = %new_name, "program cycle name already taken");
                        return Err(ProgramCycleError::name_taken(scope, new_name));
                    }
                }
                Some(guard)
            }
            None => None,
        };

        cycle.apply(&cmd.patch)?;
        self.repository.update(&cycle).await?;

        let changed_fields = changed_fields(&cmd.patch);
        tracing::info!(fields = ?changed_fields, "program cycle updated");

        let event = ProgramCycleUpdated {
            event_id: EventId::new(),
            program_cycle_id: cycle.id(),
            changed_fields,
            updated_by: metadata.user_id,
            updated_at: cycle.updated_at(),
        };
        let envelope = event
            .to_envelope()
            .for_command(&metadata);
        self.event_publisher.publish(envelope).await?;

        Ok(cycle)
    }
}

fn changed_fields(patch: &ProgramCyclePatch) -> Vec<String> {
    [
        ("name", patch.name.is_some()),
        ("description", patch.description.is_some()),
        ("start_date", patch.start_date.is_some()),
        ("end_date", patch.end_date.is_some()),
    ]
    .into_iter()
    .filter(|(_, supplied)| *supplied)
    .map(|(field, _)| field.to_string())
    .collect()
}
