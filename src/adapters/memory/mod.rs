//! In-memory adapters for every persistence port.
//!
//! Used by the tests and by local runs without a database.

mod membership_reader;
mod program_cycle_repository;
mod progress_counter;
mod reference_lookup;

pub use membership_reader::InMemoryMembershipReader;
pub use program_cycle_repository::InMemoryProgramCycleRepository;
pub use progress_counter::InMemoryProgressCounter;
pub use reference_lookup::InMemoryReferenceLookup;
