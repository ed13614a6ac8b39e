//! Response bodies for caller-scoped membership endpoints.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ContextId, MembershipId};
use crate::domain::membership::{Membership, ReportScope};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MembershipView {
    pub id: MembershipId,
    pub context_id: ContextId,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
}

impl From<Membership> for MembershipView {
    fn from(m: Membership) -> Self {
        Self {
            id: m.id,
            context_id: m.context_id,
            start_date: m.window.start(),
            end_date: m.window.end(),
        }
    }
}

/// `membership` is `null` when nothing covers today.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentMembershipResponse {
    pub membership: Option<MembershipView>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportScopeResponse {
    pub scope: ReportScope,
}
