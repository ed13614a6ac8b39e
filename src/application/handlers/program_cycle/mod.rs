//! Program-cycle command and query handlers.

mod create_program_cycle;
mod find_active_program_cycles;
mod get_program_cycle;
mod remove_program_cycle;
mod update_program_cycle;
mod update_program_cycle_status;

pub use create_program_cycle::{CreateProgramCycleCommand, CreateProgramCycleHandler};
pub use find_active_program_cycles::{FindActiveProgramCyclesHandler, FindActiveProgramCyclesQuery};
pub use get_program_cycle::{GetProgramCycleHandler, GetProgramCycleQuery};
pub use remove_program_cycle::{RemoveProgramCycleCommand, RemoveProgramCycleHandler};
pub use update_program_cycle::{UpdateProgramCycleCommand, UpdateProgramCycleHandler};
pub use update_program_cycle_status::{
    UpdateProgramCycleStatusCommand, UpdateProgramCycleStatusHandler,
};

use crate::domain::program_cycle::ProgramCycle;
use crate::ports::{ContextRef, TrackRef};

/// A cycle together with the track and context it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramCycleDetails {
    pub cycle: ProgramCycle,
    pub track: TrackRef,
    pub context: ContextRef,
}
