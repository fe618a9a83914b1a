//! Display formatting for terminal output
//!
//! Renders the summary, budget items, checklist and vendor directory as
//! tables, with Indonesian headers and long-form dates.

pub mod budget_item;
pub mod format;
pub mod summary;
mod table;
pub mod todo;
pub mod vendor;

pub use budget_item::{format_item_list, ITEMS_TITLE, NO_ITEMS};
pub use summary::{format_summary, SUMMARY_TITLE};
pub use todo::{format_checklist, NO_TODOS, TODOS_TITLE};
pub use vendor::{format_vendor_directory, format_vendor_list, NO_VENDORS, VENDORS_TITLE};
