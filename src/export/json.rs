//! JSON export
//!
//! Writes everything the signed-in user has (initial budget, budget items,
//! tasks and vendors) as one versioned document.

use std::io::Write;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::app::PlannerApp;
use crate::error::{PlannerError, PlannerResult};
use crate::models::{BudgetItem, BudgetSetting, Money, Stored, TodoItem, Vendor};

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Everything one user has planned
#[derive(Debug, Clone, Serialize)]
pub struct FullExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    pub app_id: String,
    pub user_id: String,

    /// Planned amount per category label
    pub initial_budget: BudgetSetting,

    pub budget_items: Vec<Stored<BudgetItem>>,
    pub todos: Vec<Stored<TodoItem>>,
    pub vendors: Vec<Stored<Vendor>>,

    pub metadata: ExportMetadata,
}

/// Counts and ranges for a quick look at the export
#[derive(Debug, Clone, Serialize)]
pub struct ExportMetadata {
    pub budget_item_count: usize,
    pub todo_count: usize,
    pub vendor_count: usize,
    pub total_planned: Money,
    pub total_spent: Money,
    pub earliest_expense: Option<NaiveDate>,
    pub latest_expense: Option<NaiveDate>,
}

impl FullExport {
    /// Assemble an export from mirrored data
    pub fn new(
        app_id: impl Into<String>,
        user_id: impl Into<String>,
        initial_budget: BudgetSetting,
        budget_items: Vec<Stored<BudgetItem>>,
        todos: Vec<Stored<TodoItem>>,
        vendors: Vec<Stored<Vendor>>,
    ) -> Self {
        let metadata = ExportMetadata {
            budget_item_count: budget_items.len(),
            todo_count: todos.len(),
            vendor_count: vendors.len(),
            total_planned: initial_budget.total(),
            total_spent: budget_items.iter().map(|item| item.amount).sum(),
            earliest_expense: budget_items.iter().map(|item| item.date).min(),
            latest_expense: budget_items.iter().map(|item| item.date).max(),
        };

        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            app_id: app_id.into(),
            user_id: user_id.into(),
            initial_budget,
            budget_items,
            todos,
            vendors,
            metadata,
        }
    }

    /// Export what the app currently mirrors
    pub fn from_app(app: &PlannerApp) -> PlannerResult<Self> {
        let namespace = app.namespace().ok_or(PlannerError::NotReady)?;
        Ok(Self::new(
            namespace.app_id(),
            namespace.user_id().as_str(),
            app.budget(),
            app.items(),
            app.todos(),
            app.vendors(),
        ))
    }
}

/// Write the export as JSON
pub fn export_full_json<W: Write>(
    export: &FullExport,
    writer: &mut W,
    pretty: bool,
) -> PlannerResult<()> {
    if pretty {
        serde_json::to_writer_pretty(writer, export)
    } else {
        serde_json::to_writer(writer, export)
    }
    .map_err(|e| PlannerError::Export(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::models::{BudgetItemId, Category, Stage, TodoId, VendorId};

    pub(crate) fn sample_export() -> FullExport {
        let date = |d| NaiveDate::from_ymd_opt(2025, 3, d).unwrap();
        FullExport::new(
            "horja",
            "u1",
            BudgetSetting::new().with(Category::Catering, Money::from_rupiah(10_000_000)),
            vec![
                Stored::new(
                    BudgetItemId::new("i2"),
                    BudgetItem::new(date(9), Category::Catering, "Pelunasan", Money::from_rupiah(4_500_000)),
                ),
                Stored::new(
                    BudgetItemId::new("i1"),
                    BudgetItem::new(date(1), Category::Catering, "DP katering, \"menu A\"", Money::from_rupiah(3_000_000))
                        .with_vendor("Catering Horas"),
                ),
            ],
            vec![Stored::new(
                TodoId::new("t1"),
                TodoItem::new(Stage::PreWedding, "Cetak undangan", "Ani", date(20)),
            )],
            vec![Stored::new(
                VendorId::new("v1"),
                Vendor::new(Category::Catering, "Catering Horas"),
            )],
        )
    }

    #[test]
    fn test_metadata() {
        let export = sample_export();
        assert_eq!(export.metadata.budget_item_count, 2);
        assert_eq!(export.metadata.total_spent, Money::from_rupiah(7_500_000));
        assert_eq!(export.metadata.total_planned, Money::from_rupiah(10_000_000));
        assert_eq!(export.metadata.earliest_expense, NaiveDate::from_ymd_opt(2025, 3, 1));
    }

    #[test]
    fn test_json_uses_document_field_names() {
        let mut output = Vec::new();
        export_full_json(&sample_export(), &mut output, true).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&output).unwrap();

        assert_eq!(value["schema_version"], EXPORT_SCHEMA_VERSION);
        assert_eq!(value["initial_budget"]["Katering"], 10_000_000);
        assert_eq!(value["budget_items"][1]["id"], "i1");
        assert_eq!(value["budget_items"][1]["item"], "DP katering, \"menu A\"");
        assert_eq!(value["budget_items"][1]["paymentMethod"], "Tunai");
        assert_eq!(value["todos"][0]["dueDate"], "2025-03-20");
        assert_eq!(value["vendors"][0]["name"], "Catering Horas");
    }
}
