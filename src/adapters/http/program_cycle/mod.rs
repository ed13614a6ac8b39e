//! HTTP adapter for program-cycle endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    ActiveCyclesParams, CreateProgramCycleRequest, ProgramCycleListResponse, ProgramCycleResponse,
    UpdateProgramCycleRequest, UpdateStatusRequest,
};
pub use handlers::{ProgramCycleApiError, ProgramCycleAppState};
pub use routes::program_cycle_routes;
