//! EventPublisher port - Interface for publishing domain events.
//!
//! Handlers publish after their write has succeeded and do not know which
//! transport carries the envelope.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, EventEnvelope};

/// Port for publishing domain events.
///
/// # Example
///
/// ```ignore
/// let envelope = ProgramCycleCreated::from_cycle(&cycle, user_id)
///     .to_envelope()
///     .for_command(&metadata);
/// publisher.publish(envelope).await?;
/// ```
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// An error here is reported to the caller even though the write it
    /// describes has already been committed.
    async fn publish(&self, event: EventEnvelope) -> Result<(), DomainError>;
}
