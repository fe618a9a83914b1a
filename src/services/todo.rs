//! To-do service

use chrono::{Duration, NaiveDate};

use super::records::{create_record, delete_record, update_record, Committed, DeleteConfirmation};
use super::session::Session;
use super::validation::{parse_choice, parse_date, require, FormMode};
use crate::display::format::format_input_date;
use crate::error::PlannerResult;
use crate::models::{Priority, Stage, TaskStatus, TodoId, TodoItem};

/// Task form as typed by the user
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TodoForm {
    pub stage: String,
    pub task: String,
    pub responsible: String,
    pub due_date: String,
    pub status: String,
    pub priority: String,
}

impl TodoForm {
    /// A blank form due a week from `today`
    pub fn new(today: NaiveDate) -> Self {
        Self {
            stage: Stage::first().label().to_string(),
            task: String::new(),
            responsible: String::new(),
            due_date: format_input_date(today + Duration::days(7)),
            status: TaskStatus::NotStarted.label().to_string(),
            priority: Priority::Medium.label().to_string(),
        }
    }

    pub fn from_item(item: &TodoItem) -> Self {
        Self {
            stage: item.stage.label().to_string(),
            task: item.task.clone(),
            responsible: item.responsible.clone(),
            due_date: format_input_date(item.due_date),
            status: item.status.label().to_string(),
            priority: item.priority.label().to_string(),
        }
    }

    pub fn validate(&self, mode: FormMode) -> PlannerResult<TodoItem> {
        require(
            mode,
            &[
                self.task.as_str(),
                self.responsible.as_str(),
                self.due_date.as_str(),
            ],
            "Tugas, penanggung jawab, dan batas waktu harus diisi",
        )?;

        Ok(TodoItem {
            stage: parse_choice(&self.stage)?,
            task: self.task.trim().to_string(),
            responsible: self.responsible.trim().to_string(),
            due_date: parse_date(mode, &self.due_date)?,
            status: parse_choice(&self.status)?,
            priority: parse_choice(&self.priority)?,
        })
    }
}

/// Service for checklist tasks
pub struct TodoService<'a> {
    session: &'a Session,
}

impl<'a> TodoService<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    pub fn create(&self, form: &TodoForm) -> PlannerResult<Committed> {
        let item = form.validate(FormMode::Create)?;
        create_record(self.session, &item)
    }

    pub fn update(&self, id: &TodoId, form: &TodoForm) -> PlannerResult<Committed> {
        let item = form.validate(FormMode::Edit)?;
        update_record(self.session, id, &item)
    }

    pub fn delete(
        &self,
        id: &TodoId,
        confirmation: DeleteConfirmation<TodoItem>,
    ) -> PlannerResult<Committed> {
        delete_record(self.session, id, confirmation)
    }
}
