//! Membership reader port (read side).
//!
//! Memberships are written by the enrollment flows. The login and reporting
//! paths only read them and hand the rows to
//! [`resolve_current`](crate::domain::membership::resolve_current).

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::membership::Membership;

/// Reader port for a user's memberships.
#[async_trait]
pub trait MembershipReader: Send + Sync {
    /// Active memberships of `user_id`, newest first.
    ///
    /// The order is a convenience; resolution does not depend on it.
    async fn active_for_user(&self, user_id: UserId) -> Result<Vec<Membership>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[allow(dead_code)]
    fn assert_object_safe(_: &dyn MembershipReader) {}
}
