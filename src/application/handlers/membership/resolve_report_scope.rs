//! ResolveReportScopeHandler - Context filter for the reporting path.
//!
//! Geospatial report queries are restricted to the context of the caller's
//! current membership. Callers without one are not restricted.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, Timestamp, UserId};
use crate::domain::membership::{resolve_current, ReportScope};
use crate::ports::MembershipReader;

/// Query for the scope a user's report queries run under.
#[derive(Debug, Clone)]
pub struct ResolveReportScopeQuery {
    pub user_id: UserId,
}

pub struct ResolveReportScopeHandler {
    reader: Arc<dyn MembershipReader>,
}

impl ResolveReportScopeHandler {
    pub fn new(reader: Arc<dyn MembershipReader>) -> Self {
        Self { reader }
    }

    pub async fn handle(&self, query: ResolveReportScopeQuery) -> Result<ReportScope, DomainError> {
        let memberships = self.reader.active_for_user(query.user_id).await?;
        let current = resolve_current(&memberships, Timestamp::today());
        let scope = ReportScope::for_membership(current);
        tracing::debug!(user_id = %query.user_id, ?scope, "report scope resolved");
        Ok(scope)
    }
}
