//! HTTP handlers for program-cycle endpoints.

use std::sync::Arc;

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Json, Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::application::handlers::program_cycle::{
    CreateProgramCycleCommand, CreateProgramCycleHandler, FindActiveProgramCyclesHandler,
    FindActiveProgramCyclesQuery, GetProgramCycleHandler, GetProgramCycleQuery,
    RemoveProgramCycleCommand, RemoveProgramCycleHandler, UpdateProgramCycleCommand,
    UpdateProgramCycleHandler, UpdateProgramCycleStatusCommand, UpdateProgramCycleStatusHandler,
};
use crate::domain::foundation::ProgramCycleId;
use crate::domain::program_cycle::{ErrorKind, ProgramCycleError};
use crate::ports::{
    ContextLookup, EventPublisher, ProgramCycleRepository, ProgressCounter, ScopeLock, TrackLookup,
};

use super::super::auth::AuthenticatedUser;
use super::super::error::ErrorResponse;
use super::dto::{
    ActiveCyclesParams, CreateProgramCycleRequest, ProgramCycleListResponse, ProgramCycleResponse,
    UpdateProgramCycleRequest, UpdateStatusRequest,
};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Dependencies of the program-cycle endpoints.
#[derive(Clone)]
pub struct ProgramCycleAppState {
    pub repository: Arc<dyn ProgramCycleRepository>,
    pub tracks: Arc<dyn TrackLookup>,
    pub contexts: Arc<dyn ContextLookup>,
    pub progress: Arc<dyn ProgressCounter>,
    pub scope_lock: Arc<dyn ScopeLock>,
    pub event_publisher: Arc<dyn EventPublisher>,
}

impl ProgramCycleAppState {
    pub fn create_handler(&self) -> CreateProgramCycleHandler {
        CreateProgramCycleHandler::new(
            self.repository.clone(),
            self.tracks.clone(),
            self.contexts.clone(),
            self.scope_lock.clone(),
            self.event_publisher.clone(),
        )
    }

    pub fn update_status_handler(&self) -> UpdateProgramCycleStatusHandler {
        UpdateProgramCycleStatusHandler::new(
            self.repository.clone(),
            self.scope_lock.clone(),
            self.event_publisher.clone(),
        )
    }

    pub fn update_handler(&self) -> UpdateProgramCycleHandler {
        UpdateProgramCycleHandler::new(
            self.repository.clone(),
            self.scope_lock.clone(),
            self.event_publisher.clone(),
        )
    }

    pub fn remove_handler(&self) -> RemoveProgramCycleHandler {
        RemoveProgramCycleHandler::new(
            self.repository.clone(),
            self.progress.clone(),
            self.event_publisher.clone(),
        )
    }

    pub fn get_handler(&self) -> GetProgramCycleHandler {
        GetProgramCycleHandler::new(self.repository.clone())
    }

    pub fn find_active_handler(&self) -> FindActiveProgramCyclesHandler {
        FindActiveProgramCyclesHandler::new(self.repository.clone())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Query Handlers (GET endpoints)
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/program-cycles/active
pub async fn find_active_program_cycles(
    State(state): State<ProgramCycleAppState>,
    _user: AuthenticatedUser,
    Query(params): Query<ActiveCyclesParams>,
) -> Result<impl IntoResponse, ProgramCycleApiError> {
    let cycles = state
        .find_active_handler()
        .handle(FindActiveProgramCyclesQuery {
            context_id: params.context_id,
            track_id: params.track_id,
            as_of: params.as_of,
        })
        .await?;

    Ok(Json(ProgramCycleListResponse {
        program_cycles: cycles.iter().map(ProgramCycleResponse::from).collect(),
    }))
}

/// GET /api/program-cycles/:id
pub async fn get_program_cycle(
    State(state): State<ProgramCycleAppState>,
    _user: AuthenticatedUser,
    id: Result<Path<ProgramCycleId>, PathRejection>,
) -> Result<impl IntoResponse, ProgramCycleApiError> {
    let Path(id) = id?;
    let cycle = state.get_handler().handle(GetProgramCycleQuery { id }).await?;
    Ok(Json(ProgramCycleResponse::from(&cycle)))
}

// ════════════════════════════════════════════════════════════════════════════════
// Command Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/program-cycles
pub async fn create_program_cycle(
    State(state): State<ProgramCycleAppState>,
    user: AuthenticatedUser,
    body: Result<Json<CreateProgramCycleRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ProgramCycleApiError> {
    let Json(request) = body?;
    let cmd = CreateProgramCycleCommand {
        track_id: request.track_id,
        context_id: request.context_id,
        name: request.name,
        description: request.description,
        status: request.status,
        start_date: request.start_date,
        end_date: request.end_date,
    };

    let details = state.create_handler().handle(cmd, user.metadata()).await?;

    Ok((StatusCode::CREATED, Json(ProgramCycleResponse::from(details))))
}

/// PATCH /api/program-cycles/:id
pub async fn update_program_cycle(
    State(state): State<ProgramCycleAppState>,
    user: AuthenticatedUser,
    id: Result<Path<ProgramCycleId>, PathRejection>,
    body: Result<Json<UpdateProgramCycleRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ProgramCycleApiError> {
    let Path(id) = id?;
    let Json(request) = body?;
    let cmd = UpdateProgramCycleCommand {
        id,
        patch: request.into(),
    };

    let cycle = state.update_handler().handle(cmd, user.metadata()).await?;

    Ok(Json(ProgramCycleResponse::from(&cycle)))
}

/// PUT /api/program-cycles/:id/status
pub async fn update_program_cycle_status(
    State(state): State<ProgramCycleAppState>,
    user: AuthenticatedUser,
    id: Result<Path<ProgramCycleId>, PathRejection>,
    body: Result<Json<UpdateStatusRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ProgramCycleApiError> {
    let Path(id) = id?;
    let Json(request) = body?;
    let cmd = UpdateProgramCycleStatusCommand {
        id,
        status: request.status,
    };

    let cycle = state
        .update_status_handler()
        .handle(cmd, user.metadata())
        .await?;

    Ok(Json(ProgramCycleResponse::from(&cycle)))
}

/// DELETE /api/program-cycles/:id
pub async fn delete_program_cycle(
    State(state): State<ProgramCycleAppState>,
    user: AuthenticatedUser,
    id: Result<Path<ProgramCycleId>, PathRejection>,
) -> Result<impl IntoResponse, ProgramCycleApiError> {
    let Path(id) = id?;
    state
        .remove_handler()
        .handle(RemoveProgramCycleCommand { id }, user.metadata())
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that converts program-cycle errors to HTTP responses.
#[derive(Debug)]
pub struct ProgramCycleApiError(ProgramCycleError);

impl ProgramCycleApiError {
    pub fn status(&self) -> StatusCode {
        match self.0.kind() {
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::ValidationFailure => StatusCode::BAD_REQUEST,
            ErrorKind::Conflict => StatusCode::CONFLICT,
            ErrorKind::Infrastructure => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ProgramCycleError> for ProgramCycleApiError {
    fn from(err: ProgramCycleError) -> Self {
        Self(err)
    }
}

impl From<JsonRejection> for ProgramCycleApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self(ProgramCycleError::validation("body", rejection.body_text()))
    }
}

impl From<PathRejection> for ProgramCycleApiError {
    fn from(rejection: PathRejection) -> Self {
        Self(ProgramCycleError::validation("id", rejection.body_text()))
    }
}

impl IntoResponse for ProgramCycleApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self.0, "program cycle request failed");
        }

        let code = self.0.code().to_string();
        let message = match self.0.kind() {
            // Storage details stay in the logs.
            ErrorKind::Infrastructure => "Internal server error".to_string(),
            _ => self.0.message(),
        };
        let body = match &self.0 {
            ProgramCycleError::ActiveCycleExists {
                existing_id,
                existing_name,
                ..
            } => ErrorResponse::with_details(
                code,
                message,
                serde_json::json!({
                    "existing_id": existing_id,
                    "existing_name": existing_name,
                }),
            ),
            ProgramCycleError::HasProgress { count, .. } => ErrorResponse::with_details(
                code,
                message,
                serde_json::json!({ "progress_records": count }),
            ),
            _ => ErrorResponse::new(code, message),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{ContextId, DomainError, ErrorCode, TrackId};
    use crate::domain::program_cycle::CycleScope;

    fn status_of(err: ProgramCycleError) -> StatusCode {
        ProgramCycleApiError::from(err).into_response().status()
    }

    #[test]
    fn kinds_map_to_platform_status_codes() {
        let id = ProgramCycleId::new();
        let scope = CycleScope::new(TrackId::new(1), ContextId::new(1));

        assert_eq!(status_of(ProgramCycleError::not_found(id)), StatusCode::NOT_FOUND);
        assert_eq!(
            status_of(ProgramCycleError::has_progress(id, 1)),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(ProgramCycleError::name_taken(scope, "x")),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(ProgramCycleError::infrastructure("db down")),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn storage_conflict_reports_the_violated_rule() {
        let err = ProgramCycleError::from(DomainError::new(
            ErrorCode::ActiveProgramCycleExists,
            "Another program cycle in the scope is already active",
        ));
        let response = ProgramCycleApiError::from(err).into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error_code"], "ACTIVE_PROGRAM_CYCLE_EXISTS");
    }
}
