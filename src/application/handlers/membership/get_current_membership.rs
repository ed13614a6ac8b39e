//! GetCurrentMembershipHandler - Current program for the login path.
//!
//! Sign-in attaches the caller's current membership (and so their current
//! context) to the session payload.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::domain::foundation::{DomainError, Timestamp, UserId};
use crate::domain::membership::{resolve_current, Membership};
use crate::ports::MembershipReader;

/// Query for a user's current membership.
#[derive(Debug, Clone)]
pub struct GetCurrentMembershipQuery {
    pub user_id: UserId,
    /// Reference date; today (UTC) when absent.
    pub as_of: Option<NaiveDate>,
}

impl GetCurrentMembershipQuery {
    pub fn today(user_id: UserId) -> Self {
        Self {
            user_id,
            as_of: None,
        }
    }
}

pub struct GetCurrentMembershipHandler {
    reader: Arc<dyn MembershipReader>,
}

impl GetCurrentMembershipHandler {
    pub fn new(reader: Arc<dyn MembershipReader>) -> Self {
        Self { reader }
    }

    /// `Ok(None)` when the user has no membership covering the date.
    pub async fn handle(
        &self,
        query: GetCurrentMembershipQuery,
    ) -> Result<Option<Membership>, DomainError> {
        let as_of = query.as_of.unwrap_or_else(Timestamp::today);
        let memberships = self.reader.active_for_user(query.user_id).await?;
        Ok(resolve_current(&memberships, as_of).cloned())
    }
}
