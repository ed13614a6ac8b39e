//! Axum router configuration for `/api/me` endpoints.

use axum::{routing::get, Router};

use super::handlers::{get_current_membership, get_report_scope, MeAppState};

/// - `GET /current-membership` - Membership covering today, or `null`
/// - `GET /report-scope` - Context filter for report queries
pub fn me_routes() -> Router<MeAppState> {
    Router::new()
        .route("/current-membership", get(get_current_membership))
        .route("/report-scope", get(get_report_scope))
}
