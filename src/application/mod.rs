//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Command handlers (write) are kept apart from query handlers (read).

pub mod handlers;

pub use handlers::membership::{
    GetCurrentMembershipHandler, GetCurrentMembershipQuery, ResolveReportScopeHandler,
    ResolveReportScopeQuery,
};
pub use handlers::program_cycle::{
    CreateProgramCycleCommand, CreateProgramCycleHandler, FindActiveProgramCyclesHandler,
    FindActiveProgramCyclesQuery, GetProgramCycleHandler, GetProgramCycleQuery,
    ProgramCycleDetails, RemoveProgramCycleCommand, RemoveProgramCycleHandler,
    UpdateProgramCycleCommand, UpdateProgramCycleHandler, UpdateProgramCycleStatusCommand,
    UpdateProgramCycleStatusHandler,
};
