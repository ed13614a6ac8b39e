//! Scope lock port.
//!
//! Serializes the check-then-write sequences of the lifecycle handlers per
//! (track, context) pair. Cross-process exclusion comes from the storage
//! constraints; this port covers writers inside one process.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;
use crate::domain::program_cycle::CycleScope;

/// Held lock. Dropping the guard releases the scope.
pub type ScopeGuard = Box<dyn Send + Sync>;

#[async_trait]
pub trait ScopeLock: Send + Sync {
    /// Waits until no other holder has `scope`, then takes it.
    async fn acquire(&self, scope: CycleScope) -> Result<ScopeGuard, DomainError>;
}
