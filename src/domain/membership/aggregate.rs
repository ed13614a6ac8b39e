//! Membership record.
//!
//! A membership links a user to a context for a window of calendar dates.
//! Rows are created and ended by the enrollment flows elsewhere on the
//! platform; this module only reads them.
//!
//! # Invariants not enforced here
//!
//! - One user may hold several memberships whose windows overlap.
//! - A row's end date is not validated against its start date.
//!
//! The window resolver tolerates both.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ContextId, DateWindow, MembershipId, Timestamp, UserId};

/// A user's time-bounded association with a context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Membership {
    /// Unique identifier for this membership.
    pub id: MembershipId,

    /// User who holds the membership.
    pub user_id: UserId,

    /// Context (program) the user belongs to through this membership.
    pub context_id: ContextId,

    /// Inclusive start/end dates; an absent end means open-ended.
    pub window: DateWindow,

    /// Administrative flag. Inactive rows are never current.
    pub active: bool,

    /// When the row was written. Newest wins when windows overlap.
    pub created_at: Timestamp,
}

impl Membership {
    /// True when the membership is active and its window holds on `date`.
    pub fn is_current_on(&self, date: NaiveDate) -> bool {
        self.active && self.window.contains(date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn membership(start: NaiveDate, end: Option<NaiveDate>, active: bool) -> Membership {
        Membership {
            id: MembershipId::new(1),
            user_id: UserId::new(10),
            context_id: ContextId::new(100),
            window: DateWindow::new(start, end),
            active,
            created_at: Timestamp::from_datetime(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()),
        }
    }

    #[test]
    fn active_membership_is_current_inside_window() {
        let m = membership(d(2024, 1, 1), Some(d(2024, 12, 31)), true);
        assert!(m.is_current_on(d(2024, 6, 1)));
    }

    #[test]
    fn inactive_membership_is_never_current() {
        let m = membership(d(2024, 1, 1), None, false);
        assert!(!m.is_current_on(d(2024, 6, 1)));
    }

    #[test]
    fn future_membership_is_not_current() {
        let m = membership(d(2025, 1, 1), None, true);
        assert!(!m.is_current_on(d(2024, 6, 1)));
    }

    #[test]
    fn membership_serializes_window_dates() {
        let json = serde_json::to_value(membership(d(2024, 1, 1), None, true)).unwrap();
        assert_eq!(json["window"]["start"], "2024-01-01");
        assert!(json["window"]["end"].is_null());
    }
}
