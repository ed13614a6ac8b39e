//! RemoveProgramCycleHandler - Hard delete guarded by recorded progress.

use std::sync::Arc;

use crate::domain::foundation::{
    CommandMetadata, ErrorCode, EventId, ProgramCycleId, SerializableDomainEvent, Timestamp,
};
use crate::domain::program_cycle::{ProgramCycleDeleted, ProgramCycleError};
use crate::ports::{EventPublisher, ProgramCycleRepository, ProgressCounter};

/// Command to delete a program cycle.
#[derive(Debug, Clone)]
pub struct RemoveProgramCycleCommand {
    pub id: ProgramCycleId,
}

pub struct RemoveProgramCycleHandler {
    repository: Arc<dyn ProgramCycleRepository>,
    progress: Arc<dyn ProgressCounter>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl RemoveProgramCycleHandler {
    pub fn new(
        repository: Arc<dyn ProgramCycleRepository>,
        progress: Arc<dyn ProgressCounter>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            repository,
            progress,
            event_publisher,
        }
    }

    /// Deletes the cycle. Irreversible.
    ///
    /// Fails with `HasProgress` while any progress record references the
    /// cycle; those records have to be moved to another cycle first. A record
    /// written after the count is caught by storage and reported the same way.
    #[tracing::instrument(
        name = "remove_program_cycle",
        skip(self, cmd, metadata),
        fields(program_cycle_id = %cmd.id, user_id = %metadata.user_id)
    )]
    pub async fn handle(
        &self,
        cmd: RemoveProgramCycleCommand,
        metadata: CommandMetadata,
    ) -> Result<(), ProgramCycleError> {
        let cycle = self
            .repository
            .find_by_id(cmd.id)
            .await?
            .ok_or(ProgramCycleError::NotFound(cmd.id))?;

        let count = self.progress.count_for_cycle(cycle.id()).await?;
        if count > 0 {
            tracing::warn!(progress_records = count, "refusing to delete cycle with progress");
            return Err(ProgramCycleError::has_progress(cycle.id(), count));
        }

        match self.repository.delete(cycle.id()).await {
            Ok(()) => {}
            Err(err) if err.code == ErrorCode::ProgressRecordsExist => {
                let count = self.progress.count_for_cycle(cycle.id()).await?.max(1);
                tracing::warn!(progress_records = count, "progress recorded during delete");
                return Err(ProgramCycleError::has_progress(cycle.id(), count));
            }
            Err(err) => return Err(err.into()),
        }
        tracing::info!("program cycle deleted");

        let event = ProgramCycleDeleted {
            event_id: EventId::new(),
            program_cycle_id: cycle.id(),
            track_id: cycle.track_id(),
            context_id: cycle.context_id(),
            name: cycle.name().to_string(),
            deleted_by: metadata.user_id,
            deleted_at: Timestamp::now(),
        };
        let envelope = event
            .to_envelope()
            .for_command(&metadata);
        self.event_publisher.publish(envelope).await?;

        Ok(())
    }
}
