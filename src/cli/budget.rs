//! Initial budget and summary commands

use std::str::FromStr;

use clap::Subcommand;

use super::context::CliContext;
use crate::display::format_summary;
use crate::error::{PlannerError, PlannerResult};
use crate::models::Category;
use crate::services::BudgetService;

/// Budget subcommands
#[derive(Subcommand)]
pub enum BudgetCommands {
    /// Set the planned amount for a category (blank means zero)
    Set {
        /// Category label, e.g. "Katering"
        category: String,
        /// Amount in rupiah
        amount: String,
    },

    /// Set a category's planned amount back to zero
    Reset {
        /// Category label
        category: String,
    },

    /// List the category labels
    Categories,
}

pub(crate) fn parse_category(value: &str) -> PlannerResult<Category> {
    Category::from_str(value).map_err(|e| PlannerError::Validation(e.to_string()))
}

/// Handle a budget command
pub fn handle_budget_command(ctx: &mut CliContext, cmd: BudgetCommands) -> PlannerResult<()> {
    match cmd {
        BudgetCommands::Set { category, amount } => {
            let category = parse_category(&category)?;
            let committed = BudgetService::new(&ctx.app.session()).set_planned(category, &amount)?;
            ctx.commit(committed);
        }
        BudgetCommands::Reset { category } => {
            let category = parse_category(&category)?;
            let committed = BudgetService::new(&ctx.app.session()).reset(category)?;
            ctx.commit(committed);
        }
        BudgetCommands::Categories => {
            for category in Category::ALL {
                println!("{}", category);
            }
        }
    }
    Ok(())
}

/// Print the summary table, or CSV with `csv`
pub fn handle_summary_command(ctx: &mut CliContext, csv: bool) -> PlannerResult<()> {
    let report = ctx.app.summary();
    if csv {
        report.export_csv(std::io::stdout().lock())?;
        return Ok(());
    }

    let user = ctx.app.user().map(|u| u.to_string());
    println!("{}", format_summary(&report, user.as_deref()));

    let rejected = ctx.app.rejected_documents();
    if rejected > 0 {
        eprintln!("{} dokumen tidak valid diabaikan.", rejected);
    }
    ctx.flush_notices();
    Ok(())
}
