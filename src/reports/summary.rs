//! Budget summary report
//!
//! Planned vs. actual spending for every category, with totals. Pure: the
//! report is recomputed from the current budget and items on every read.

use std::io::Write;

use super::index::CategoryIndex;
use crate::error::{PlannerError, PlannerResult};
use crate::models::{BudgetItem, BudgetSetting, Category, Money, Stored};

/// Default percent used at which a row is flagged as near its limit
pub const NEAR_LIMIT_PERCENT: f64 = 90.0;

/// How close a row is to its planned amount
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowState {
    /// Spent more than planned, or all of it
    OverBudget,
    /// At or past the near-limit threshold (90% by default)
    NearLimit,
    Normal,
}

impl RowState {
    /// Over-budget wins over near-limit
    pub fn classify(difference: Money, percent_used: f64, near_limit_percent: f64) -> Self {
        if difference.is_negative() || percent_used >= 100.0 {
            Self::OverBudget
        } else if percent_used >= near_limit_percent {
            Self::NearLimit
        } else {
            Self::Normal
        }
    }
}

/// Planned and actual amounts for one category (or the total)
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryRow {
    pub planned: Money,
    pub actual: Money,
    pub difference: Money,
    pub percent_used: f64,
    pub state: RowState,
}

impl SummaryRow {
    pub fn new(planned: Money, actual: Money) -> Self {
        Self::with_threshold(planned, actual, NEAR_LIMIT_PERCENT)
    }

    pub fn with_threshold(planned: Money, actual: Money, near_limit_percent: f64) -> Self {
        let difference = planned - actual;
        let percent_used = actual.percent_of(planned);
        Self {
            planned,
            actual,
            difference,
            percent_used,
            state: RowState::classify(difference, percent_used, near_limit_percent),
        }
    }
}

/// One row per category plus totals
#[derive(Debug, Clone)]
pub struct BudgetSummaryReport {
    /// All categories, in category order
    pub rows: Vec<(Category, SummaryRow)>,
    pub total: SummaryRow,
    /// Number of budget items counted
    pub item_count: usize,
}

impl BudgetSummaryReport {
    /// Aggregate `items` against `budget`
    pub fn generate(budget: &BudgetSetting, items: &[Stored<BudgetItem>]) -> Self {
        Self::generate_with_threshold(budget, items, NEAR_LIMIT_PERCENT)
    }

    /// Same as [`generate`](Self::generate) with a custom near-limit threshold
    pub fn generate_with_threshold(
        budget: &BudgetSetting,
        items: &[Stored<BudgetItem>],
        near_limit_percent: f64,
    ) -> Self {
        let index = CategoryIndex::build(items, |item: &Stored<BudgetItem>| item.category);

        let rows: Vec<(Category, SummaryRow)> = Category::ALL
            .iter()
            .map(|&category| {
                let actual = index.get(category).iter().map(|item| item.amount).sum();
                let planned = budget.planned(category);
                (category, SummaryRow::with_threshold(planned, actual, near_limit_percent))
            })
            .collect();

        let total_planned = rows.iter().map(|(_, row)| row.planned).sum();
        let total_actual = rows.iter().map(|(_, row)| row.actual).sum();

        Self {
            rows,
            total: SummaryRow::with_threshold(total_planned, total_actual, near_limit_percent),
            item_count: items.len(),
        }
    }

    /// Row for one category
    pub fn row(&self, category: Category) -> Option<&SummaryRow> {
        self.rows
            .iter()
            .find(|(c, _)| *c == category)
            .map(|(_, row)| row)
    }

    /// Categories that are over budget
    pub fn over_budget(&self) -> Vec<Category> {
        self.rows
            .iter()
            .filter(|(_, row)| row.state == RowState::OverBudget)
            .map(|(c, _)| *c)
            .collect()
    }

    /// Write the report as CSV, one line per category plus a total line
    pub fn export_csv<W: Write>(&self, writer: W) -> PlannerResult<()> {
        let mut out = csv::Writer::from_writer(writer);
        let export_err = |e: csv::Error| PlannerError::Export(e.to_string());

        out.write_record([
            "Kategori",
            "Anggaran Awal",
            "Pengeluaran Aktual",
            "Selisih",
            "% Terpakai",
        ])
        .map_err(export_err)?;

        let lines = self
            .rows
            .iter()
            .map(|(c, row)| (c.label(), row))
            .chain(std::iter::once(("Total", &self.total)));
        for (label, row) in lines {
            out.write_record([
                label.to_string(),
                format!("{:.2}", row.planned.as_f64()),
                format!("{:.2}", row.actual.as_f64()),
                format!("{:.2}", row.difference.as_f64()),
                format!("{:.2}", row.percent_used),
            ])
            .map_err(export_err)?;
        }

        out.flush()
            .map_err(|e| PlannerError::Export(e.to_string()))?;
        Ok(())
    }
}
