//! Membership domain module.
//!
//! Memberships are read-only here; this module decides which one is current.
//!
//! # Module Structure
//!
//! - `aggregate` - Membership record
//! - `window` - Current-membership resolution by date
//! - `scope` - Reporting scope derived from the current membership

mod aggregate;
mod scope;
mod window;

pub use aggregate::Membership;
pub use scope::ReportScope;
pub use window::resolve_current;
