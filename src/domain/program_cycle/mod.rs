//! Program-cycle domain module.
//!
//! # Module Structure
//!
//! - `aggregate` - ProgramCycle, its scope and partial-update types
//! - `status` - Lifecycle status
//! - `errors` - Error type and caller-facing kinds
//! - `events` - Domain events published after writes

mod aggregate;
mod errors;
mod events;
mod status;

pub use aggregate::{CycleScope, NewProgramCycle, ProgramCycle, ProgramCyclePatch};
pub use errors::{ErrorKind, ProgramCycleError};
pub use events::{
    ProgramCycleCreated, ProgramCycleDeleted, ProgramCycleStatusChanged, ProgramCycleUpdated,
};
pub use status::ProgramCycleStatus;
