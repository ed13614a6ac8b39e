//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `events` - In-process event bus
//! - `http` - REST endpoints (axum)
//! - `locking` - Per-scope write serialization
//! - `memory` - In-memory persistence for tests and local runs
//! - `postgres` - PostgreSQL persistence (sqlx)

pub mod events;
pub mod http;
pub mod locking;
pub mod memory;
pub mod postgres;

pub use events::InMemoryEventBus;
pub use locking::InProcessScopeLock;
