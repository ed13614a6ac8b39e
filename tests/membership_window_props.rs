//! Property tests for current-membership resolution.

use chrono::{Duration, NaiveDate, TimeZone, Utc};
use proptest::prelude::*;

use civic_watch::domain::foundation::{ContextId, DateWindow, MembershipId, Timestamp, UserId};
use civic_watch::domain::membership::{resolve_current, Membership, ReportScope};

fn epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
}

fn day(offset: i64) -> NaiveDate {
    epoch() + Duration::days(offset)
}

prop_compose! {
    fn arb_membership(id: i64)(
        context in 1i64..5,
        start in 0i64..365,
        length in proptest::option::of(0i64..200),
        active in proptest::bool::weighted(0.8),
        created_offset in 0i64..10_000,
    ) -> Membership {
        Membership {
            id: MembershipId::new(id),
            user_id: UserId::new(1),
            context_id: ContextId::new(context),
            window: DateWindow::new(day(start), length.map(|l| day(start + l))),
            active,
            created_at: Timestamp::from_datetime(
                Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap()
                    + Duration::minutes(created_offset),
            ),
        }
    }
}

fn arb_memberships() -> impl Strategy<Value = Vec<Membership>> {
    (0usize..8).prop_flat_map(|n| {
        (0..n)
            .map(|i| arb_membership(i as i64 + 1))
            .collect::<Vec<_>>()
    })
}

proptest! {
    #[test]
    fn resolved_membership_always_covers_the_date(
        memberships in arb_memberships(),
        as_of in 0i64..600,
    ) {
        let date = day(as_of);
        if let Some(current) = resolve_current(&memberships, date) {
            prop_assert!(current.active);
            prop_assert!(current.window.start() <= date);
            prop_assert!(current.window.end().map_or(true, |end| date <= end));
        } else {
            prop_assert!(memberships.iter().all(|m| !m.is_current_on(date)));
        }
    }

    #[test]
    fn resolution_does_not_depend_on_input_order(
        memberships in arb_memberships(),
        as_of in 0i64..600,
    ) {
        let date = day(as_of);
        let mut reversed = memberships.clone();
        reversed.reverse();

        let forward = resolve_current(&memberships, date).map(|m| m.id);
        let backward = resolve_current(&reversed, date).map(|m| m.id);
        prop_assert_eq!(forward, backward);
    }

    #[test]
    fn window_bounds_are_inclusive(start in 0i64..365, length in 0i64..200) {
        let membership = Membership {
            id: MembershipId::new(1),
            user_id: UserId::new(1),
            context_id: ContextId::new(1),
            window: DateWindow::new(day(start), Some(day(start + length))),
            active: true,
            created_at: Timestamp::now(),
        };
        let memberships = vec![membership];

        prop_assert!(resolve_current(&memberships, day(start)).is_some());
        prop_assert!(resolve_current(&memberships, day(start + length)).is_some());
        prop_assert!(resolve_current(&memberships, day(start - 1)).is_none());
        prop_assert!(resolve_current(&memberships, day(start + length + 1)).is_none());
    }

    #[test]
    fn report_scope_follows_resolution(
        memberships in arb_memberships(),
        as_of in 0i64..600,
    ) {
        let current = resolve_current(&memberships, day(as_of));
        let scope = ReportScope::for_membership(current);
        prop_assert_eq!(scope.context_id(), current.map(|m| m.context_id));
    }
}
