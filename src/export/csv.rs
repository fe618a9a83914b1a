//! CSV export
//!
//! Budget items for spreadsheets, one row per expense. Amounts are plain
//! rupiah numbers so they can be summed.

use std::io::Write;

use crate::error::{PlannerError, PlannerResult};
use crate::models::{BudgetItem, Stored};

/// Export budget items to CSV
pub fn export_items_csv<W: Write>(items: &[Stored<BudgetItem>], writer: W) -> PlannerResult<()> {
    let mut out = csv::Writer::from_writer(writer);
    let export_err = |e: csv::Error| PlannerError::Export(e.to_string());

    out.write_record([
        "ID", "Tanggal", "Kategori", "Item", "Vendor", "Jumlah", "Metode", "Status",
    ])
    .map_err(export_err)?;

    for item in items {
        out.write_record([
            item.id.as_str(),
            &item.date.to_string(),
            item.category.label(),
            &item.description,
            &item.vendor,
            &format!("{:.2}", item.amount.as_f64()),
            item.payment_method.label(),
            item.status.label(),
        ])
        .map_err(export_err)?;
    }

    out.flush().map_err(|e| PlannerError::Export(e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::json::tests::sample_export;

    #[test]
    fn test_items_csv_quotes_fields() {
        let export = sample_export();
        let mut output = Vec::new();
        export_items_csv(&export.budget_items, &mut output).unwrap();
        let text = String::from_utf8(output).unwrap();

        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("ID,Tanggal,Kategori,Item,Vendor,Jumlah,Metode,Status")
        );
        assert_eq!(
            lines.next(),
            Some("i2,2025-03-09,Katering,Pelunasan,,4500000.00,Tunai,Lunas")
        );
        assert_eq!(
            lines.next(),
            Some("i1,2025-03-01,Katering,\"DP katering, \"\"menu A\"\"\",Catering Horas,3000000.00,Tunai,Lunas")
        );
    }

    #[test]
    fn test_empty_items_has_header_only() {
        let mut output = Vec::new();
        export_items_csv(&[], &mut output).unwrap();
        assert_eq!(String::from_utf8(output).unwrap().lines().count(), 1);
    }
}
