//! Service layer for the wedding planner
//!
//! Commands validate raw form input, write to the document store and
//! report a notice. They never touch the mirrors; the live subscription
//! delivers the written state.

pub mod budget;
pub mod budget_item;
pub mod records;
pub mod session;
pub mod todo;
pub mod validation;
pub mod vendor;

pub use budget::BudgetService;
pub use budget_item::{BudgetItemForm, BudgetItemService};
pub use records::{Committed, DeleteConfirmation};
pub use session::Session;
pub use todo::{TodoForm, TodoService};
pub use validation::FormMode;
pub use vendor::{VendorForm, VendorService};
