//! In-memory event bus.
//!
//! Keeps the most recent envelopes in a bounded buffer and logs each one.
//! Tests use it to assert on published events; the server uses it when no
//! external broker is configured.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{PoisonError, RwLock};

use crate::domain::foundation::{DomainError, ErrorCode, EventEnvelope};
use crate::ports::EventPublisher;

const DEFAULT_CAPACITY: usize = 1024;

/// In-memory event bus.
///
/// # Example
///
/// ```ignore
/// let bus = Arc::new(InMemoryEventBus::new());
/// bus.publish(envelope).await?;
///
/// assert_eq!(bus.event_count(), 1);
/// assert!(bus.has_event("program_cycle.created.v1"));
/// ```
pub struct InMemoryEventBus {
    published: RwLock<VecDeque<EventEnvelope>>,
    capacity: usize,
}

impl InMemoryEventBus {
    /// Creates a bus that retains the last 1024 events.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates a bus that retains at most `capacity` events (minimum 1).
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            published: RwLock::new(VecDeque::new()),
            capacity: capacity.max(1),
        }
    }

    // === Test Helpers ===

    /// Returns retained events, oldest first.
    pub fn published_events(&self) -> Vec<EventEnvelope> {
        self.published
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .cloned()
            .collect()
    }

    /// Returns retained events of a specific type.
    pub fn events_of_type(&self, event_type: &str) -> Vec<EventEnvelope> {
        self.published_events()
            .into_iter()
            .filter(|e| e.event_type == event_type)
            .collect()
    }

    /// Returns retained events for a specific aggregate.
    pub fn events_for_aggregate(&self, aggregate_id: &str) -> Vec<EventEnvelope> {
        self.published_events()
            .into_iter()
            .filter(|e| e.aggregate_id == aggregate_id)
            .collect()
    }

    /// Clears retained events (for test isolation).
    pub fn clear(&self) {
        self.published
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    pub fn event_count(&self) -> usize {
        self.published
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn has_event(&self, event_type: &str) -> bool {
        self.published
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .any(|e| e.event_type == event_type)
    }
}

impl Default for InMemoryEventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventPublisher for InMemoryEventBus {
    async fn publish(&self, event: EventEnvelope) -> Result<(), DomainError> {
        tracing::debug!(
            event_type = %event.event_type,
            aggregate_id = %event.aggregate_id,
            event_id = %event.event_id,
            correlation_id = ?event.metadata.correlation_id,
            "domain event published"
        );

        let mut published = self.published.write().map_err(|_| {
            DomainError::new(ErrorCode::InternalError, "Event buffer lock poisoned")
        })?;
        if published.len() == self.capacity {
            published.pop_front();
        }
        published.push_back(event);
        Ok(())
    }
}
