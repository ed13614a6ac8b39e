//! Reporting scope derived from the current membership.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ContextId;

use super::Membership;

/// Context filter the reporting module applies to a caller's geospatial queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "context_id", rename_all = "snake_case")]
pub enum ReportScope {
    /// Restrict to reports filed under this context.
    Context(ContextId),
    /// Caller has no current membership; no context filter applies.
    Global,
}

impl ReportScope {
    pub fn for_membership(current: Option<&Membership>) -> Self {
        match current {
            Some(membership) => ReportScope::Context(membership.context_id),
            None => ReportScope::Global,
        }
    }

    pub fn context_id(&self) -> Option<ContextId> {
        match self {
            ReportScope::Context(id) => Some(*id),
            ReportScope::Global => None,
        }
    }
}
