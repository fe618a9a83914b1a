//! Budget summary display

use tabled::Tabled;

use super::format::{format_currency, format_percent};
use super::table::render_amounts;
use crate::reports::{BudgetSummaryReport, RowState, SummaryRow};

pub const SUMMARY_TITLE: &str = "Ringkasan Anggaran Pernikahan Adat Batak Toba";

#[derive(Tabled)]
struct SummaryLine {
    #[tabled(rename = "Kategori")]
    category: String,
    #[tabled(rename = "Anggaran Awal")]
    planned: String,
    #[tabled(rename = "Pengeluaran Aktual")]
    actual: String,
    #[tabled(rename = "Selisih")]
    difference: String,
    #[tabled(rename = "% Terpakai")]
    percent: String,
}

fn marker(state: RowState) -> &'static str {
    match state {
        RowState::OverBudget => " !",
        RowState::NearLimit => " ~",
        RowState::Normal => "",
    }
}

fn line(label: &str, row: &SummaryRow) -> SummaryLine {
    SummaryLine {
        category: label.to_string(),
        planned: format_currency(row.planned),
        actual: format_currency(row.actual),
        difference: format_currency(row.difference),
        percent: format!("{}{}", format_percent(row.percent_used), marker(row.state)),
    }
}

/// Format the summary table with a total row
pub fn format_summary(report: &BudgetSummaryReport, user: Option<&str>) -> String {
    let mut output = String::new();
    output.push_str(SUMMARY_TITLE);
    output.push('\n');
    if let Some(user) = user {
        output.push_str(&format!("Pengguna Aktif: {}\n", user));
    }
    output.push('\n');

    let lines: Vec<SummaryLine> = report
        .rows
        .iter()
        .map(|(category, row)| line(category.label(), row))
        .chain(std::iter::once(line("Total", &report.total)))
        .collect();
    output.push_str(&render_amounts(lines, 1..));
    output.push_str("\n\n! = melebihi anggaran   ~ = mendekati batas\n");

    output
}
