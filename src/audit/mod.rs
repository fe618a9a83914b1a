//! Audit trail
//!
//! Every accepted write is appended to `audit.log` as one JSON line with
//! the before/after bodies and a short diff. `wedplan history` reads it back.

mod diff;
mod entry;
mod logger;

pub use diff::generate_diff;
pub use entry::{AuditEntry, Operation};
pub use logger::AuditLogger;
