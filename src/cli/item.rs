//! Budget item CLI commands
//!
//! Adds, edits, deletes and lists the spending records under the budget.

use clap::Subcommand;

use super::context::{confirm_delete, CliContext};
use crate::display::format::format_currency;
use crate::display::{format_item_list, ITEMS_TITLE};
use crate::error::{PlannerError, PlannerResult};
use crate::models::{BudgetItem, Money};
use crate::services::{BudgetItemForm, BudgetItemService};
use crate::sync::Mirrored;

/// Budget item subcommands
#[derive(Subcommand)]
pub enum ItemCommands {
    /// Record a budget item
    Add {
        /// Category label, e.g. "Katering"
        category: String,
        /// What was bought or booked
        description: String,
        /// Amount in rupiah
        amount: String,
        /// Date (YYYY-MM-DD), today if omitted
        #[arg(short, long)]
        date: Option<String>,
        /// Vendor name
        #[arg(long)]
        vendor: Option<String>,
        /// Payment method, e.g. "Transfer Bank"
        #[arg(short, long)]
        method: Option<String>,
        /// Payment status, e.g. "DP"
        #[arg(short, long)]
        status: Option<String>,
    },

    /// Change fields of a budget item
    Edit {
        /// Item ID or a unique prefix of it
        id: String,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        amount: Option<String>,
        #[arg(short, long)]
        date: Option<String>,
        #[arg(long)]
        vendor: Option<String>,
        #[arg(short, long)]
        method: Option<String>,
        #[arg(short, long)]
        status: Option<String>,
    },

    /// Delete a budget item
    Delete {
        /// Item ID or a unique prefix of it
        id: String,
        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// List budget items, newest first
    List {
        /// Only items in this category
        #[arg(short, long)]
        category: Option<String>,
    },
}

/// Handle a budget item command
pub fn handle_item_command(ctx: &mut CliContext, cmd: ItemCommands) -> PlannerResult<()> {
    match cmd {
        ItemCommands::Add {
            category,
            description,
            amount,
            date,
            vendor,
            method,
            status,
        } => {
            let mut form = BudgetItemForm::new(ctx.today());
            form.category = category;
            form.description = description;
            form.amount = amount;
            if let Some(date) = date {
                form.date = date;
            }
            if let Some(vendor) = vendor {
                form.vendor = vendor;
            }
            if let Some(method) = method {
                form.payment_method = method;
            }
            if let Some(status) = status {
                form.status = status;
            }

            let committed = BudgetItemService::new(&ctx.app.session()).create(&form)?;
            ctx.commit(committed);
        }

        ItemCommands::Edit {
            id,
            category,
            description,
            amount,
            date,
            vendor,
            method,
            status,
        } => {
            let id = ctx.resolve_id::<BudgetItem>(&id)?;
            let existing = BudgetItem::find(ctx.app.mirrors(), &id)
                .ok_or_else(|| PlannerError::budget_item_not_found(id.as_str()))?;

            let mut form = BudgetItemForm::from_item(&existing);
            if let Some(category) = category {
                form.category = category;
            }
            if let Some(description) = description {
                form.description = description;
            }
            if let Some(amount) = amount {
                form.amount = amount;
            }
            if let Some(date) = date {
                form.date = date;
            }
            if let Some(vendor) = vendor {
                form.vendor = vendor;
            }
            if let Some(method) = method {
                form.payment_method = method;
            }
            if let Some(status) = status {
                form.status = status;
            }

            let committed = BudgetItemService::new(&ctx.app.session()).update(&id, &form)?;
            ctx.commit(committed);
        }

        ItemCommands::Delete { id, yes } => {
            let id = ctx.resolve_id::<BudgetItem>(&id)?;
            let Some(confirmation) = confirm_delete::<BudgetItem>(yes) else {
                println!("Dibatalkan.");
                return Ok(());
            };
            let committed =
                BudgetItemService::new(&ctx.app.session()).delete(&id, confirmation)?;
            ctx.commit(committed);
        }

        ItemCommands::List { category } => {
            let mut items = ctx.app.items();
            if let Some(category) = category {
                let category = super::budget::parse_category(&category)?;
                items.retain(|item| item.category == category);
            }

            println!("{}", ITEMS_TITLE);
            println!("{}", format_item_list(&items));
            if !items.is_empty() {
                let total: Money = items.iter().map(|item| item.amount).sum();
                println!("\n{} item, total {}", items.len(), format_currency(total));
            }
            ctx.flush_notices();
        }
    }
    Ok(())
}
