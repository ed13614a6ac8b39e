//! Keyed async lock held within one process.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::program_cycle::CycleScope;
use crate::ports::{ScopeGuard, ScopeLock};

/// One `tokio::sync::Mutex` per (track, context) pair.
///
/// Entries are created on first use and pruned once no guard or waiter
/// refers to them.
#[derive(Default)]
pub struct InProcessScopeLock {
    locks: Mutex<HashMap<CycleScope, Arc<tokio::sync::Mutex<()>>>>,
}

impl InProcessScopeLock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of scopes currently tracked.
    pub fn tracked_scopes(&self) -> usize {
        self.locks.lock().map(|locks| locks.len()).unwrap_or(0)
    }
}

#[async_trait]
impl ScopeLock for InProcessScopeLock {
    async fn acquire(&self, scope: CycleScope) -> Result<ScopeGuard, DomainError> {
        let mutex = {
            let mut locks = self.locks.lock().map_err(|_| {
                DomainError::new(ErrorCode::InternalError, "Scope lock table poisoned")
            })?;
            // Only the table itself holds idle entries.
            locks.retain(|_, m| Arc::strong_count(m) > 1);
            locks.entry(scope).or_default().clone()
        };

        let guard = mutex.lock_owned().await;
        Ok(Box::new(guard))
    }
}
