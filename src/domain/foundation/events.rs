//! Domain event plumbing.
//!
//! Events are plain serializable structs. `domain_event!` implements
//! [`DomainEvent`] for them, and [`SerializableDomainEvent::to_envelope`]
//! wraps one in the [`EventEnvelope`] that publishers carry.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::fmt;
use uuid::Uuid;

use super::{CommandMetadata, Timestamp, UserId};

/// Routing information every domain event exposes.
pub trait DomainEvent: Send + Sync {
    /// Dotted, versioned name, e.g. `"program_cycle.created.v1"`.
    fn event_type(&self) -> &'static str;

    fn aggregate_id(&self) -> String;

    fn aggregate_type(&self) -> &'static str;

    fn occurred_at(&self) -> Timestamp;

    fn event_id(&self) -> EventId;
}

/// Blanket extension for events that can be serialized into a payload.
pub trait SerializableDomainEvent: DomainEvent + Serialize {
    fn to_envelope(&self) -> EventEnvelope {
        let event_type = self.event_type();

        EventEnvelope {
            event_id: self.event_id(),
            event_type: event_type.to_string(),
            schema_version: schema_version(event_type),
            aggregate_id: self.aggregate_id(),
            aggregate_type: self.aggregate_type().to_string(),
            occurred_at: self.occurred_at(),
            // Event structs hold only ids, strings, dates and enums.
            payload: serde_json::to_value(self).unwrap_or_default(),
            metadata: EventMetadata::default(),
        }
    }
}

impl<T: DomainEvent + Serialize> SerializableDomainEvent for T {}

/// Implements [`DomainEvent`] by naming the fields that carry each value.
///
/// ```ignore
/// domain_event!(
///     ProgramCycleCreated,
///     event_type = "program_cycle.created.v1",
///     aggregate_id = program_cycle_id,
///     aggregate_type = "ProgramCycle",
///     occurred_at = created_at,
///     event_id = event_id
/// );
/// ```
#[macro_export]
macro_rules! domain_event {
    (
        $event_name:ident,
        event_type = $event_type:expr,
        aggregate_id = $agg_id_field:ident,
        aggregate_type = $agg_type:expr,
        occurred_at = $occurred_field:ident,
        event_id = $event_id_field:ident
    ) => {
        impl $crate::domain::foundation::DomainEvent for $event_name {
            fn event_type(&self) -> &'static str {
                $event_type
            }

            fn aggregate_id(&self) -> String {
                self.$agg_id_field.to_string()
            }

            fn aggregate_type(&self) -> &'static str {
                $agg_type
            }

            fn occurred_at(&self) -> $crate::domain::foundation::Timestamp {
                self.$occurred_field
            }

            fn event_id(&self) -> $crate::domain::foundation::EventId {
                self.$event_id_field
            }
        }
    };
}

pub use crate::domain_event;

/// Identifier of one published event. Consumers deduplicate on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(Uuid);

impl EventId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for EventId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Who caused the event and which request it belongs to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correlation_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace_id: Option<String>,
}

/// Transport envelope for domain events.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventEnvelope {
    pub event_id: EventId,
    pub event_type: String,
    /// Trailing `.vN` of `event_type`; 1 when absent.
    pub schema_version: u32,
    pub aggregate_id: String,
    pub aggregate_type: String,
    pub occurred_at: Timestamp,
    pub payload: JsonValue,
    pub metadata: EventMetadata,
}

impl EventEnvelope {
    /// Stamps the envelope with the caller and request of the command that
    /// produced it.
    pub fn for_command(mut self, command: &CommandMetadata) -> Self {
        self.metadata = EventMetadata {
            correlation_id: Some(command.correlation_id()),
            user_id: Some(command.user_id),
            trace_id: command.trace_id().map(str::to_string),
        };
        self
    }
}

fn schema_version(event_type: &str) -> u32 {
    event_type
        .rsplit_once(".v")
        .and_then(|(_, version)| version.parse().ok())
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Serialize, Deserialize)]
    struct ThingRenamed {
        event_id: EventId,
        thing_id: String,
        name: String,
        renamed_at: Timestamp,
    }

    domain_event!(
        ThingRenamed,
        event_type = "thing.renamed.v2",
        aggregate_id = thing_id,
        aggregate_type = "Thing",
        occurred_at = renamed_at,
        event_id = event_id
    );

    fn renamed() -> ThingRenamed {
        ThingRenamed {
            event_id: EventId::new(),
            thing_id: "thing-9".to_string(),
            name: "2026.1".to_string(),
            renamed_at: Timestamp::now(),
        }
    }

    #[test]
    fn schema_version_reads_suffix_or_defaults() {
        assert_eq!(schema_version("a.b.v2"), 2);
        assert_eq!(schema_version("a.b.v10"), 10);
        assert_eq!(schema_version("legacy.event"), 1);
    }

    #[test]
    fn to_envelope_copies_routing_fields_and_payload() {
        let event = renamed();
        let envelope = event.to_envelope();

        assert_eq!(envelope.event_id, event.event_id);
        assert_eq!(envelope.event_type, "thing.renamed.v2");
        assert_eq!(envelope.schema_version, 2);
        assert_eq!(envelope.aggregate_id, "thing-9");
        assert_eq!(envelope.aggregate_type, "Thing");
        assert_eq!(envelope.payload["name"], "2026.1");
        assert_eq!(envelope.metadata, EventMetadata::default());
    }

    #[test]
    fn for_command_copies_caller_and_request() {
        let command = CommandMetadata::new(UserId::new(42))
            .with_correlation_id("corr-1")
            .with_trace_id("trace-1");

        let envelope = renamed().to_envelope().for_command(&command);

        assert_eq!(envelope.metadata.correlation_id.as_deref(), Some("corr-1"));
        assert_eq!(envelope.metadata.user_id, Some(UserId::new(42)));
        assert_eq!(envelope.metadata.trace_id.as_deref(), Some("trace-1"));
    }

    #[test]
    fn unset_metadata_is_omitted_from_json() {
        let envelope = renamed()
            .to_envelope()
            .for_command(&CommandMetadata::new(UserId::new(1)));
        let json = serde_json::to_value(&envelope).unwrap();

        assert_eq!(json["metadata"]["user_id"], 1);
        assert!(json["metadata"].get("trace_id").is_none());
    }
}
