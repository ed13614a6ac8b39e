//! In-memory track and context lookups.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use crate::domain::foundation::{ContextId, DomainError, TrackId};
use crate::ports::{ContextLookup, ContextRef, TrackLookup, TrackRef};

#[derive(Default)]
pub struct InMemoryReferenceLookup {
    tracks: RwLock<HashMap<TrackId, String>>,
    contexts: RwLock<HashMap<ContextId, String>>,
}

impl InMemoryReferenceLookup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_track(&self, id: TrackId, name: impl Into<String>) {
        self.tracks
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id, name.into());
    }

    pub fn add_context(&self, id: ContextId, name: impl Into<String>) {
        self.contexts
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id, name.into());
    }
}

#[async_trait]
impl TrackLookup for InMemoryReferenceLookup {
    async fn find_track(&self, id: TrackId) -> Result<Option<TrackRef>, DomainError> {
        Ok(self
            .tracks
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&id)
            .map(|name| TrackRef {
                id,
                name: name.clone(),
            }))
    }
}

#[async_trait]
impl ContextLookup for InMemoryReferenceLookup {
    async fn find_context(&self, id: ContextId) -> Result<Option<ContextRef>, DomainError> {
        Ok(self
            .contexts
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&id)
            .map(|name| ContextRef {
                id,
                name: name.clone(),
            }))
    }
}
