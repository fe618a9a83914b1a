//! Budget item display

use tabled::Tabled;

use super::format::{format_currency, format_display_date, truncate};
use super::table::render_amounts;
use crate::models::{BudgetItem, Stored};

pub const ITEMS_TITLE: &str = "Detail Anggaran & Pelacakan Pengeluaran";
pub const NO_ITEMS: &str = "Belum ada pengeluaran yang tercatat.";

#[derive(Tabled)]
struct ItemLine {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Tanggal")]
    date: String,
    #[tabled(rename = "Kategori")]
    category: String,
    #[tabled(rename = "Item")]
    description: String,
    #[tabled(rename = "Vendor")]
    vendor: String,
    #[tabled(rename = "Jumlah")]
    amount: String,
    #[tabled(rename = "Metode")]
    payment_method: String,
    #[tabled(rename = "Status")]
    status: String,
}

/// Format budget items, newest first as mirrored
pub fn format_item_list(items: &[Stored<BudgetItem>]) -> String {
    if items.is_empty() {
        return NO_ITEMS.to_string();
    }

    let lines: Vec<ItemLine> = items
        .iter()
        .map(|item| ItemLine {
            id: item.id.short().to_string(),
            date: format_display_date(item.date),
            category: item.category.to_string(),
            description: truncate(&item.description, 40),
            vendor: truncate(&item.vendor, 30),
            amount: format_currency(item.amount),
            payment_method: item.payment_method.to_string(),
            status: item.status.to_string(),
        })
        .collect();
    render_amounts(lines, 5..6)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BudgetItemId, Category, Money};
    use chrono::NaiveDate;

    #[test]
    fn test_empty_list() {
        assert_eq!(format_item_list(&[]), NO_ITEMS);
    }

    #[test]
    fn test_item_row() {
        let items = vec![Stored::new(
            BudgetItemId::new("0123456789abcdef"),
            BudgetItem::new(
                NaiveDate::from_ymd_opt(2025, 3, 5).unwrap(),
                Category::Venue,
                "Sewa Gedung",
                Money::from_rupiah(5_000_000),
            )
            .with_vendor("Gedung Sejahtera"),
        )];
        let output = format_item_list(&items);

        assert!(output.contains("Tanggal"));
        assert!(output.contains("01234567"));
        assert!(!output.contains("0123456789"));
        assert!(output.contains("5 Maret 2025"));
        assert!(output.contains("Rp 5.000.000"));
        assert!(output.contains("Gedung Sejahtera"));
        assert!(output.contains("Lunas"));
    }
}
