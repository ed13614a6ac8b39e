//! Scope lock adapters.

mod in_process;

pub use in_process::InProcessScopeLock;
