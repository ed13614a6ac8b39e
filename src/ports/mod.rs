//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Persistence Ports
//!
//! - `ProgramCycleRepository` - Program cycle storage and scoped lookups
//! - `MembershipReader` - Read access to a user's memberships
//! - `TrackLookup` / `ContextLookup` - Reference entity existence
//! - `ProgressCounter` - Progress records per cycle (deletion guard)
//!
//! ## Coordination Ports
//!
//! - `ScopeLock` - Per (track, context) serialization of writes
//! - `EventPublisher` - Domain event publication

mod event_publisher;
mod membership_reader;
mod program_cycle_repository;
mod progress_counter;
mod reference_lookup;
mod scope_lock;

pub use event_publisher::EventPublisher;
pub use membership_reader::MembershipReader;
pub use program_cycle_repository::{ActiveCycleFilter, ProgramCycleRepository};
pub use progress_counter::ProgressCounter;
pub use reference_lookup::{ContextLookup, ContextRef, TrackLookup, TrackRef};
pub use scope_lock::{ScopeGuard, ScopeLock};
