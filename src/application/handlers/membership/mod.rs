//! Membership query handlers.
//!
//! Both handlers resolve the current membership with the same domain
//! function; they differ only in what they hand back.

mod get_current_membership;
mod resolve_report_scope;

pub use get_current_membership::{GetCurrentMembershipHandler, GetCurrentMembershipQuery};
pub use resolve_report_scope::{ResolveReportScopeHandler, ResolveReportScopeQuery};
