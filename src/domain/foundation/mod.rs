//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, date intervals, events and error
//! types shared by the membership and program-cycle modules.

mod command;
mod date_window;
mod errors;
mod events;
mod ids;
mod repository;
mod state_machine;
mod timestamp;

pub use command::CommandMetadata;
pub use date_window::{DateRange, DateWindow};
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use events::{
    domain_event, DomainEvent, EventEnvelope, EventId, EventMetadata, SerializableDomainEvent,
};
pub use ids::{ContextId, MembershipId, ProgramCycleId, TrackId, UserId};
pub use repository::Repository;
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
