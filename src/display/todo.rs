//! Checklist display

use tabled::Tabled;

use super::format::{format_display_date, format_percent, truncate};
use super::table::render;
use crate::reports::{ChecklistReport, Urgency};

pub const TODOS_TITLE: &str = "Daftar Tugas Pernikahan";
pub const NO_TODOS: &str = "Belum ada tugas yang tercatat.";

#[derive(Tabled)]
struct TodoLine {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Tahap Acara")]
    stage: String,
    #[tabled(rename = "Tugas")]
    task: String,
    #[tabled(rename = "Penanggung Jawab")]
    responsible: String,
    #[tabled(rename = "Batas Waktu")]
    due_date: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Prioritas")]
    priority: String,
    #[tabled(rename = "")]
    urgency: String,
}

/// Format the checklist with per-stage progress
pub fn format_checklist(report: &ChecklistReport) -> String {
    if report.entries.is_empty() {
        return NO_TODOS.to_string();
    }

    let lines: Vec<TodoLine> = report
        .entries
        .iter()
        .map(|entry| {
            let todo = &entry.todo;
            TodoLine {
                id: todo.id.short().to_string(),
                stage: todo.stage.to_string(),
                task: truncate(&todo.task, 40),
                responsible: truncate(&todo.responsible, 20),
                due_date: format_display_date(todo.due_date),
                status: todo.status.to_string(),
                priority: todo.priority.to_string(),
                urgency: match entry.urgency {
                    Urgency::Complete | Urgency::Upcoming => String::new(),
                    other => other.label().to_string(),
                },
            }
        })
        .collect();

    let mut output = render(lines);
    output.push_str("\n\n");
    for progress in &report.stages {
        output.push_str(&format!(
            "{:<28} {:>2}/{:<2} {:>8}\n",
            progress.stage.label(),
            progress.completed,
            progress.total,
            format_percent(progress.percent())
        ));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Stage, Stored, TodoId, TodoItem};
    use crate::reports::DUE_SOON_DAYS;
    use chrono::NaiveDate;

    #[test]
    fn test_empty_checklist() {
        let report = ChecklistReport::generate(
            &[],
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            DUE_SOON_DAYS,
        );
        assert_eq!(format_checklist(&report), NO_TODOS);
    }

    #[test]
    fn test_past_due_is_marked() {
        let todos = vec![Stored::new(
            TodoId::new("t1"),
            TodoItem::new(
                Stage::PreWedding,
                "Pesan gedung",
                "Ani",
                NaiveDate::from_ymd_opt(2025, 1, 5).unwrap(),
            ),
        )];
        let report = ChecklistReport::generate(
            &todos,
            NaiveDate::from_ymd_opt(2025, 2, 1).unwrap(),
            DUE_SOON_DAYS,
        );
        let output = format_checklist(&report);

        assert!(output.contains("Penanggung Jawab"));
        assert!(output.contains("5 Januari 2025"));
        assert!(output.contains("Terlambat"));
        assert!(output.contains("Pra-Pernikahan"));
        assert!(output.contains("0/1"));
    }
}
