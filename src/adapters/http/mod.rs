//! HTTP adapters - REST API implementations.
//!
//! Each domain module has its own HTTP adapter for endpoint exposure.
//! [`api_router`] nests them under `/api`.

pub mod auth;
pub mod error;
pub mod me;
pub mod program_cycle;

use axum::Router;

pub use auth::{AuthenticatedUser, AuthenticationRequired};
pub use error::ErrorResponse;
pub use me::{me_routes, MeAppState};
pub use program_cycle::{program_cycle_routes, ProgramCycleAppState};

/// All API routes, each nested router bound to its own state.
pub fn api_router(program_cycles: ProgramCycleAppState, me: MeAppState) -> Router {
    let api = Router::new()
        .nest("/program-cycles", program_cycle_routes().with_state(program_cycles))
        .nest("/me", me_routes().with_state(me));

    Router::new().nest("/api", api)
}
