//! Core data models for the wedding planner
//!
//! This module contains the data structures of the planning domain: the
//! fixed value sets, the four kinds of stored data, money, and notices.

pub mod budget_item;
pub mod budget_setting;
pub mod category;
pub mod choice;
pub mod ids;
pub mod money;
pub mod notice;
pub mod record;
pub mod todo;
pub mod vendor;

pub use budget_item::{BudgetItem, PaymentMethod, PaymentStatus};
pub use budget_setting::{BudgetSetting, BUDGET_DOCUMENT_ID};
pub use category::Category;
pub use choice::ChoiceParseError;
pub use ids::{BudgetItemId, TodoId, UserId, VendorId};
pub use money::Money;
pub use notice::{Notice, NoticeKind};
pub use record::{sort_for_presentation, Entity, EntityKind, Stored};
pub use todo::{Priority, Stage, TaskStatus, TodoItem};
pub use vendor::Vendor;
