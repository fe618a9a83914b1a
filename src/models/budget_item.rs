//! Budget item model
//!
//! A single expense line: what was bought, from whom, for how much and how
//! it was paid. Budget items are the "actual" side of the budget summary.

use std::cmp::Ordering;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::category::Category;
use super::choice::fixed_choice;
use super::ids::BudgetItemId;
use super::money::{deserialize_non_negative, Money};
use super::record::{Entity, EntityKind, Stored};

fixed_choice! {
    /// How an expense was (or will be) paid
    pub enum PaymentMethod ("metode pembayaran") {
        Cash => "Tunai",
        BankTransfer => "Transfer Bank",
        Debit => "Debit",
        CreditCard => "Kartu Kredit",
        Other => "Lainnya",
    }
}

fixed_choice! {
    /// Settlement state of an expense
    pub enum PaymentStatus ("status pembayaran") {
        Paid => "Lunas",
        DownPayment => "DP",
        Unpaid => "Belum Dibayar",
    }
}

/// A recorded wedding expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetItem {
    /// Date of the expense
    pub date: NaiveDate,

    /// Expense category
    pub category: Category,

    /// What was bought
    #[serde(rename = "item")]
    pub description: String,

    /// Vendor name, free text
    #[serde(default)]
    pub vendor: String,

    /// Amount in rupiah, never negative
    #[serde(deserialize_with = "deserialize_non_negative")]
    pub amount: Money,

    /// Payment method
    pub payment_method: PaymentMethod,

    /// Payment status
    pub status: PaymentStatus,
}

impl BudgetItem {
    /// Create a budget item with the default payment method and status
    pub fn new(
        date: NaiveDate,
        category: Category,
        description: impl Into<String>,
        amount: Money,
    ) -> Self {
        Self {
            date,
            category,
            description: description.into(),
            vendor: String::new(),
            amount,
            payment_method: PaymentMethod::first(),
            status: PaymentStatus::first(),
        }
    }

    /// Set the vendor name
    pub fn with_vendor(mut self, vendor: impl Into<String>) -> Self {
        self.vendor = vendor.into();
        self
    }

    /// Check if the expense is fully paid
    pub fn is_paid(&self) -> bool {
        self.status == PaymentStatus::Paid
    }
}

impl Entity for BudgetItem {
    type Id = BudgetItemId;
    const KIND: EntityKind = EntityKind::BudgetItem;

    /// Newest first
    fn presentation_order(a: &Stored<Self>, b: &Stored<Self>) -> Ordering {
        b.date.cmp(&a.date).then_with(|| a.id.cmp(&b.id))
    }

    fn summary(&self) -> String {
        format!("{} {}", self.date, self.description)
    }
}
