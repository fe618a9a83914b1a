//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod budget;
pub mod context;
pub mod export;
pub mod history;
pub mod item;
pub mod setup;
pub mod todo;
pub mod vendor;

pub use budget::{handle_budget_command, handle_summary_command, BudgetCommands};
pub use context::CliContext;
pub use export::{handle_export_command, ExportArgs, ExportFormat};
pub use history::handle_history_command;
pub use item::{handle_item_command, ItemCommands};
pub use setup::{
    handle_config_command, handle_init_command, handle_signout_command, handle_whoami_command,
    InitArgs,
};
pub use todo::{handle_todo_command, TodoCommands};
pub use vendor::{handle_vendor_command, VendorCommands};
