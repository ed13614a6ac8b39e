//! Lookups for the reference entities a program cycle points at.
//!
//! Tracks and contexts are administered elsewhere; the lifecycle manager only
//! needs to know that they exist and what they are called.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ContextId, DomainError, TrackId};

/// Minimal view of a learning track.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackRef {
    pub id: TrackId,
    pub name: String,
}

/// Minimal view of a context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextRef {
    pub id: ContextId,
    pub name: String,
}

#[async_trait]
pub trait TrackLookup: Send + Sync {
    /// Returns `None` when no track has this id.
    async fn find_track(&self, id: TrackId) -> Result<Option<TrackRef>, DomainError>;
}

#[async_trait]
pub trait ContextLookup: Send + Sync {
    /// Returns `None` when no context has this id.
    async fn find_context(&self, id: ContextId) -> Result<Option<ContextRef>, DomainError>;
}
