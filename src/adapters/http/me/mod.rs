//! HTTP adapter for the caller's own membership and report scope.

mod dto;
mod handlers;
mod routes;

pub use dto::{CurrentMembershipResponse, MembershipView, ReportScopeResponse};
pub use handlers::{MeApiError, MeAppState};
pub use routes::me_routes;
