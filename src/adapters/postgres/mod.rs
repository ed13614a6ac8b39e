//! PostgreSQL adapters - Database implementations for the persistence ports.
//!
//! - `PostgresProgramCycleRepository` - Program cycle storage
//! - `PostgresMembershipReader` - Membership rows for window resolution
//! - `PostgresReferenceLookup` - Track and context existence
//! - `PostgresProgressCounter` - Progress records per cycle

mod membership_reader;
mod program_cycle_repository;
mod progress_counter;
mod reference_lookup;

pub use membership_reader::PostgresMembershipReader;
pub use program_cycle_repository::PostgresProgramCycleRepository;
pub use progress_counter::PostgresProgressCounter;
pub use reference_lookup::PostgresReferenceLookup;
