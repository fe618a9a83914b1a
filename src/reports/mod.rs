//! Reports module for the wedding planner
//!
//! Derived views over the mirrored data: the budget summary, the
//! checklist and the vendor directory.

pub mod checklist;
pub mod directory;
pub mod index;
pub mod summary;

pub use checklist::{ChecklistEntry, ChecklistReport, StageProgress, Urgency, DUE_SOON_DAYS};
pub use directory::{DirectorySection, VendorDirectory};
pub use index::CategoryIndex;
pub use summary::{BudgetSummaryReport, RowState, SummaryRow, NEAR_LIMIT_PERCENT};
