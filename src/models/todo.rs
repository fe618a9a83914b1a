//! To-do item model
//!
//! Checklist entries grouped by wedding stage.

use std::cmp::Ordering;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::choice::fixed_choice;
use super::ids::TodoId;
use super::record::{Entity, EntityKind, Stored};

fixed_choice! {
    /// Phase of the wedding timeline
    pub enum Stage ("tahap") {
        PreWedding => "Pra-Pernikahan",
        Blessing => "Pemberkatan",
        CustomaryFeast => "Pesta Adat (Maneat Horja)",
        PostWedding => "Pasca-Pernikahan",
    }
}

fixed_choice! {
    /// Progress of a task
    pub enum TaskStatus ("status tugas") {
        NotStarted => "Belum Mulai",
        InProgress => "Sedang Berlangsung",
        Done => "Selesai",
        OnHold => "Tertunda",
    }
}

fixed_choice! {
    /// Task priority
    pub enum Priority ("prioritas") {
        High => "Tinggi",
        Medium => "Sedang",
        Low => "Rendah",
    }
}

/// A checklist task
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoItem {
    /// Wedding stage the task belongs to
    pub stage: Stage,

    /// What needs doing
    pub task: String,

    /// Who is responsible, free text
    pub responsible: String,

    /// Deadline
    pub due_date: NaiveDate,

    /// Progress
    pub status: TaskStatus,

    /// Priority
    pub priority: Priority,
}

impl TodoItem {
    /// Create a task that has not been started, at medium priority
    pub fn new(
        stage: Stage,
        task: impl Into<String>,
        responsible: impl Into<String>,
        due_date: NaiveDate,
    ) -> Self {
        Self {
            stage,
            task: task.into(),
            responsible: responsible.into(),
            due_date,
            status: TaskStatus::NotStarted,
            priority: Priority::Medium,
        }
    }

    /// Check if the task is finished
    pub fn is_complete(&self) -> bool {
        self.status == TaskStatus::Done
    }
}

impl Entity for TodoItem {
    type Id = TodoId;
    const KIND: EntityKind = EntityKind::Todo;

    /// Earliest deadline first
    fn presentation_order(a: &Stored<Self>, b: &Stored<Self>) -> Ordering {
        a.due_date.cmp(&b.due_date).then_with(|| a.id.cmp(&b.id))
    }

    fn summary(&self) -> String {
        format!("{} ({})", self.task, self.due_date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::record::sort_for_presentation;
    use serde_json::json;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_document_field_names() {
        let todo = TodoItem::new(Stage::PreWedding, "Atur pertemuan dengan WO", "Ani", date(2025, 2, 10));
        let doc = todo.to_document().unwrap();

        assert_eq!(doc["stage"], json!("Pra-Pernikahan"));
        assert_eq!(doc["responsible"], json!("Ani"));
        assert_eq!(doc["dueDate"], json!("2025-02-10"));
        assert_eq!(doc["status"], json!("Belum Mulai"));
        assert_eq!(doc["priority"], json!("Sedang"));
    }

    #[test]
    fn test_oldest_due_first() {
        let mut todos = vec![
            Stored::new(
                TodoId::new("late"),
                TodoItem::new(Stage::Blessing, "b", "x", date(2025, 5, 1)),
            ),
            Stored::new(
                TodoId::new("early"),
                TodoItem::new(Stage::Blessing, "a", "x", date(2025, 1, 1)),
            ),
        ];
        sort_for_presentation(&mut todos);
        assert_eq!(todos[0].id.as_str(), "early");
    }

    #[test]
    fn test_is_complete() {
        let mut todo = TodoItem::new(Stage::PostWedding, "Kirim ucapan", "Budi", date(2025, 7, 1));
        assert!(!todo.is_complete());
        todo.status = TaskStatus::Done;
        assert!(todo.is_complete());
    }
}
