//! Axum router configuration for program-cycle endpoints.

use axum::{
    routing::{get, post, put},
    Router,
};

use super::handlers::{
    create_program_cycle, delete_program_cycle, find_active_program_cycles, get_program_cycle,
    update_program_cycle, update_program_cycle_status, ProgramCycleAppState,
};

/// Create the program-cycle router, mounted at `/api/program-cycles`.
///
/// # Routes
///
/// - `POST /` - Create a cycle
/// - `GET /active` - Cycles running today, filterable by context and track
/// - `GET /:id` - Fetch one cycle
/// - `PATCH /:id` - Update name, description or dates
/// - `PUT /:id/status` - Change status
/// - `DELETE /:id` - Hard delete (refused while progress exists)
pub fn program_cycle_routes() -> Router<ProgramCycleAppState> {
    Router::new()
        .route("/", post(create_program_cycle))
        .route("/active", get(find_active_program_cycles))
        .route(
            "/:id",
            get(get_program_cycle)
                .patch(update_program_cycle)
                .delete(delete_program_cycle),
        )
        .route("/:id/status", put(update_program_cycle_status))
}
