//! Event bus adapters.
//!
//! - `InMemoryEventBus` - In-process bus that logs and retains recent events

mod in_memory;

pub use in_memory::InMemoryEventBus;
