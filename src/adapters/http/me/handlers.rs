//! HTTP handlers for `/api/me` endpoints.

use std::sync::Arc;

use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::application::handlers::membership::{
    GetCurrentMembershipHandler, GetCurrentMembershipQuery, ResolveReportScopeHandler,
    ResolveReportScopeQuery,
};
use crate::domain::foundation::DomainError;
use crate::ports::MembershipReader;

use super::super::auth::AuthenticatedUser;
use super::super::error::ErrorResponse;
use super::dto::{CurrentMembershipResponse, MembershipView, ReportScopeResponse};

#[derive(Clone)]
pub struct MeAppState {
    pub membership_reader: Arc<dyn MembershipReader>,
}

impl MeAppState {
    pub fn current_membership_handler(&self) -> GetCurrentMembershipHandler {
        GetCurrentMembershipHandler::new(self.membership_reader.clone())
    }

    pub fn report_scope_handler(&self) -> ResolveReportScopeHandler {
        ResolveReportScopeHandler::new(self.membership_reader.clone())
    }
}

/// GET /api/me/current-membership
pub async fn get_current_membership(
    State(state): State<MeAppState>,
    user: AuthenticatedUser,
) -> Result<impl IntoResponse, MeApiError> {
    let current = state
        .current_membership_handler()
        .handle(GetCurrentMembershipQuery::today(user.user_id))
        .await?;

    Ok(Json(CurrentMembershipResponse {
        membership: current.map(MembershipView::from),
    }))
}

/// GET /api/me/report-scope
pub async fn get_report_scope(
    State(state): State<MeAppState>,
    user: AuthenticatedUser,
) -> Result<impl IntoResponse, MeApiError> {
    let scope = state
        .report_scope_handler()
        .handle(ResolveReportScopeQuery {
            user_id: user.user_id,
        })
        .await?;

    Ok(Json(ReportScopeResponse { scope }))
}

/// Only storage failures reach here; a missing membership is not an error.
#[derive(Debug)]
pub struct MeApiError(DomainError);

impl From<DomainError> for MeApiError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

impl IntoResponse for MeApiError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self.0, "membership lookup failed");
        let body = ErrorResponse::new(self.0.code.to_string(), "Internal server error");
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}
