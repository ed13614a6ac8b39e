//! Civic Watch - participatory surveillance platform core.
//!
//! This crate holds two pieces of the platform's people and program model:
//! resolution of a user's current membership from its date window, and the
//! lifecycle of program cycles (dated offerings of a track within a context).

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
