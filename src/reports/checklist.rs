//! Checklist report
//!
//! Classifies open tasks against a reference date and counts progress per
//! wedding stage.

use chrono::{Duration, NaiveDate};

use crate::models::{Stage, Stored, TodoItem};

/// Default window for "due soon"
pub const DUE_SOON_DAYS: i64 = 7;

/// Where a task stands relative to today
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Urgency {
    /// Marked "Selesai", whatever the date
    Complete,
    PastDue,
    DueSoon,
    Upcoming,
}

impl Urgency {
    pub fn classify(todo: &TodoItem, today: NaiveDate, due_soon_days: i64) -> Self {
        if todo.is_complete() {
            Self::Complete
        } else if todo.due_date < today {
            Self::PastDue
        } else {
            // A window too large for the calendar counts nothing as due soon
            let horizon =
                Duration::try_days(due_soon_days).and_then(|d| today.checked_add_signed(d));
            match horizon {
                Some(horizon) if todo.due_date <= horizon => Self::DueSoon,
                _ => Self::Upcoming,
            }
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Complete => "Selesai",
            Self::PastDue => "Terlambat",
            Self::DueSoon => "Segera",
            Self::Upcoming => "",
        }
    }
}

/// Task counts for one stage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageProgress {
    pub stage: Stage,
    pub total: usize,
    pub completed: usize,
}

impl StageProgress {
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.completed as f64 / self.total as f64 * 100.0
        }
    }
}

/// A task with its urgency
#[derive(Debug, Clone)]
pub struct ChecklistEntry {
    pub todo: Stored<TodoItem>,
    pub urgency: Urgency,
}

/// Checklist as of one date
#[derive(Debug, Clone)]
pub struct ChecklistReport {
    pub today: NaiveDate,
    /// In presentation order (earliest deadline first)
    pub entries: Vec<ChecklistEntry>,
    /// Every stage, in stage order
    pub stages: Vec<StageProgress>,
}

impl ChecklistReport {
    pub fn generate(todos: &[Stored<TodoItem>], today: NaiveDate, due_soon_days: i64) -> Self {
        let entries = todos
            .iter()
            .map(|todo| ChecklistEntry {
                urgency: Urgency::classify(todo, today, due_soon_days),
                todo: todo.clone(),
            })
            .collect();

        let stages = Stage::ALL
            .iter()
            .map(|&stage| {
                let in_stage = todos.iter().filter(|t| t.stage == stage);
                StageProgress {
                    stage,
                    total: in_stage.clone().count(),
                    completed: in_stage.filter(|t| t.is_complete()).count(),
                }
            })
            .collect();

        Self {
            today,
            entries,
            stages,
        }
    }

    pub fn count(&self, urgency: Urgency) -> usize {
        self.entries.iter().filter(|e| e.urgency == urgency).count()
    }

    /// Tasks that are late and not done
    pub fn past_due(&self) -> impl Iterator<Item = &ChecklistEntry> {
        self.entries
            .iter()
            .filter(|e| e.urgency == Urgency::PastDue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{TaskStatus, TodoId};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn todo(id: &str, stage: Stage, due: NaiveDate, status: TaskStatus) -> Stored<TodoItem> {
        let mut item = TodoItem::new(stage, format!("Tugas {}", id), "Ani", due);
        item.status = status;
        Stored::new(TodoId::new(id), item)
    }

    #[test]
    fn test_past_due_unless_done() {
        let today = date(2025, 5, 1);
        let late = todo("a", Stage::PreWedding, date(2025, 4, 1), TaskStatus::InProgress);
        assert_eq!(Urgency::classify(&late, today, DUE_SOON_DAYS), Urgency::PastDue);

        let done = todo("a", Stage::PreWedding, date(2025, 4, 1), TaskStatus::Done);
        assert_eq!(Urgency::classify(&done, today, DUE_SOON_DAYS), Urgency::Complete);
    }

    #[test]
    fn test_due_soon_window() {
        let today = date(2025, 5, 1);
        let check = |due| {
            let t = todo("a", Stage::Blessing, due, TaskStatus::NotStarted);
            Urgency::classify(&t, today, DUE_SOON_DAYS)
        };
        assert_eq!(check(date(2025, 5, 1)), Urgency::DueSoon);
        assert_eq!(check(date(2025, 5, 8)), Urgency::DueSoon);
        assert_eq!(check(date(2025, 5, 9)), Urgency::Upcoming);
    }

    #[test]
    fn test_oversized_window_does_not_panic() {
        let today = date(2025, 5, 1);
        let t = todo("a", Stage::Blessing, date(2025, 6, 1), TaskStatus::NotStarted);
        assert_eq!(Urgency::classify(&t, today, i64::MAX), Urgency::Upcoming);
        assert_eq!(Urgency::classify(&t, today, i64::MIN), Urgency::Upcoming);

        let report = ChecklistReport::generate(&[t], today, i64::MAX);
        assert_eq!(report.count(Urgency::Upcoming), 1);
    }

    #[test]
    fn test_stage_progress() {
        let today = date(2025, 5, 1);
        let todos = vec![
            todo("a", Stage::PreWedding, date(2025, 4, 1), TaskStatus::Done),
            todo("b", Stage::PreWedding, date(2025, 4, 20), TaskStatus::OnHold),
            todo("c", Stage::CustomaryFeast, date(2025, 6, 1), TaskStatus::NotStarted),
        ];

        let report = ChecklistReport::generate(&todos, today, DUE_SOON_DAYS);
        assert_eq!(report.stages.len(), 4);
        assert_eq!(
            report.stages[0],
            StageProgress {
                stage: Stage::PreWedding,
                total: 2,
                completed: 1
            }
        );
        assert_eq!(report.stages[0].percent(), 50.0);
        assert_eq!(report.stages[1].total, 0);
        assert_eq!(report.stages[1].percent(), 0.0);

        assert_eq!(report.count(Urgency::Complete), 1);
        assert_eq!(report.count(Urgency::PastDue), 1);
        assert_eq!(report.past_due().next().unwrap().todo.id, TodoId::new("b"));
        assert_eq!(report.count(Urgency::Upcoming), 1);
    }
}
