//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (ids, dates, errors, events)
//! - `membership` - Membership records and current-membership resolution
//! - `program_cycle` - Program cycle aggregate and lifecycle rules

pub mod foundation;
pub mod membership;
pub mod program_cycle;
