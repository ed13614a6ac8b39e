//! In-memory MembershipReader.

use async_trait::async_trait;
use std::sync::{PoisonError, RwLock};

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::membership::Membership;
use crate::ports::MembershipReader;

#[derive(Default)]
pub struct InMemoryMembershipReader {
    memberships: RwLock<Vec<Membership>>,
}

impl InMemoryMembershipReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, membership: Membership) {
        self.memberships
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(membership);
    }
}

#[async_trait]
impl MembershipReader for InMemoryMembershipReader {
    async fn active_for_user(&self, user_id: UserId) -> Result<Vec<Membership>, DomainError> {
        let mut memberships: Vec<_> = self
            .memberships
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|m| m.user_id == user_id && m.active)
            .cloned()
            .collect();
        memberships.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| b.id.cmp(&a.id)));
        Ok(memberships)
    }
}
