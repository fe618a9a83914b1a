//! To-do checklist CLI commands

use clap::Subcommand;

use super::context::{confirm_delete, CliContext};
use crate::display::{format_checklist, TODOS_TITLE};
use crate::error::{PlannerError, PlannerResult};
use crate::models::{TaskStatus, TodoId, TodoItem};
use crate::reports::Urgency;
use crate::services::{TodoForm, TodoService};
use crate::sync::Mirrored;

/// To-do subcommands
#[derive(Subcommand)]
pub enum TodoCommands {
    /// Add a task to the checklist
    Add {
        /// What needs doing
        task: String,
        /// Who is responsible
        responsible: String,
        /// Due date (YYYY-MM-DD), a week from today if omitted
        #[arg(short, long)]
        due: Option<String>,
        /// Wedding stage, e.g. "Pemberkatan"
        #[arg(long)]
        stage: Option<String>,
        /// Priority: Tinggi, Sedang or Rendah
        #[arg(short, long)]
        priority: Option<String>,
    },

    /// Change fields of a task
    Edit {
        /// Task ID or a unique prefix of it
        id: String,
        #[arg(long)]
        task: Option<String>,
        #[arg(long)]
        responsible: Option<String>,
        #[arg(short, long)]
        due: Option<String>,
        #[arg(long)]
        stage: Option<String>,
        #[arg(short, long)]
        status: Option<String>,
        #[arg(short, long)]
        priority: Option<String>,
    },

    /// Mark a task as done
    Done {
        /// Task ID or a unique prefix of it
        id: String,
    },

    /// Delete a task
    Delete {
        /// Task ID or a unique prefix of it
        id: String,
        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// Show the checklist with per-stage progress
    List {
        /// Only tasks that are past due
        #[arg(long)]
        overdue: bool,
    },
}

fn existing(ctx: &CliContext, given: &str) -> PlannerResult<(TodoId, TodoForm)> {
    let id = ctx.resolve_id::<TodoItem>(given)?;
    let todo = TodoItem::find(ctx.app.mirrors(), &id)
        .ok_or_else(|| PlannerError::todo_not_found(id.as_str()))?;
    Ok((id, TodoForm::from_item(&todo)))
}

/// Handle a to-do command
pub fn handle_todo_command(ctx: &mut CliContext, cmd: TodoCommands) -> PlannerResult<()> {
    match cmd {
        TodoCommands::Add {
            task,
            responsible,
            due,
            stage,
            priority,
        } => {
            let mut form = TodoForm::new(ctx.today());
            form.task = task;
            form.responsible = responsible;
            if let Some(due) = due {
                form.due_date = due;
            }
            if let Some(stage) = stage {
                form.stage = stage;
            }
            if let Some(priority) = priority {
                form.priority = priority;
            }

            let committed = TodoService::new(&ctx.app.session()).create(&form)?;
            ctx.commit(committed);
        }

        TodoCommands::Edit {
            id,
            task,
            responsible,
            due,
            stage,
            status,
            priority,
        } => {
            let (id, mut form) = existing(ctx, &id)?;
            if let Some(task) = task {
                form.task = task;
            }
            if let Some(responsible) = responsible {
                form.responsible = responsible;
            }
            if let Some(due) = due {
                form.due_date = due;
            }
            if let Some(stage) = stage {
                form.stage = stage;
            }
            if let Some(status) = status {
                form.status = status;
            }
            if let Some(priority) = priority {
                form.priority = priority;
            }

            let committed = TodoService::new(&ctx.app.session()).update(&id, &form)?;
            ctx.commit(committed);
        }

        TodoCommands::Done { id } => {
            let (id, mut form) = existing(ctx, &id)?;
            form.status = TaskStatus::Done.to_string();
            let committed = TodoService::new(&ctx.app.session()).update(&id, &form)?;
            ctx.commit(committed);
        }

        TodoCommands::Delete { id, yes } => {
            let id = ctx.resolve_id::<TodoItem>(&id)?;
            let Some(confirmation) = confirm_delete::<TodoItem>(yes) else {
                println!("Dibatalkan.");
                return Ok(());
            };
            let committed = TodoService::new(&ctx.app.session()).delete(&id, confirmation)?;
            ctx.commit(committed);
        }

        TodoCommands::List { overdue } => {
            let mut report = ctx.app.checklist(ctx.today());
            if overdue {
                report.entries.retain(|entry| entry.urgency == Urgency::PastDue);
            }

            println!("{}", TODOS_TITLE);
            println!("{}", format_checklist(&report));

            let late = report.count(Urgency::PastDue);
            if late > 0 {
                println!("{} tugas melewati batas waktu.", late);
            }
            ctx.flush_notices();
        }
    }
    Ok(())
}
