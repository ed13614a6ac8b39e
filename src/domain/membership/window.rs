//! Current-membership resolution.
//!
//! The login path and the reporting path both need "the membership that
//! holds today" for a user. They share this single function.

use chrono::NaiveDate;

use super::Membership;

/// Returns the membership whose window holds on `as_of`.
///
/// Inactive rows are skipped. When several windows hold at once, the most
/// recently created membership wins, with the higher id breaking exact
/// timestamp ties, so the answer does not depend on the order of the input
/// slice. `None` means the user has no current membership, which is an
/// ordinary outcome.
pub fn resolve_current(memberships: &[Membership], as_of: NaiveDate) -> Option<&Membership> {
    memberships
        .iter()
        .filter(|membership| membership.is_current_on(as_of))
        .max_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.id.cmp(&b.id))
        })
}
