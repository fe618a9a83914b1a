//! Budget item service
//!
//! Validates expense forms and writes budget items.

use chrono::NaiveDate;

use super::records::{create_record, delete_record, update_record, Committed, DeleteConfirmation};
use super::session::Session;
use super::validation::{parse_amount, parse_choice, parse_date, require, FormMode};
use crate::display::format::format_input_date;
use crate::error::PlannerResult;
use crate::models::{BudgetItem, BudgetItemId, Category, PaymentMethod, PaymentStatus};

/// Expense form as typed by the user
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BudgetItemForm {
    pub date: String,
    pub category: String,
    pub description: String,
    pub vendor: String,
    pub amount: String,
    pub payment_method: String,
    pub status: String,
}

impl BudgetItemForm {
    /// A blank form: dated today, first category, paid in cash
    pub fn new(today: NaiveDate) -> Self {
        Self {
            date: format_input_date(today),
            category: Category::first().label().to_string(),
            description: String::new(),
            vendor: String::new(),
            amount: String::new(),
            payment_method: PaymentMethod::first().label().to_string(),
            status: PaymentStatus::first().label().to_string(),
        }
    }

    /// A form pre-filled from an existing item
    pub fn from_item(item: &BudgetItem) -> Self {
        Self {
            date: format_input_date(item.date),
            category: item.category.label().to_string(),
            description: item.description.clone(),
            vendor: item.vendor.clone(),
            amount: item.amount.as_f64().to_string(),
            payment_method: item.payment_method.label().to_string(),
            status: item.status.label().to_string(),
        }
    }

    /// Check the form and build the item
    pub fn validate(&self, mode: FormMode) -> PlannerResult<BudgetItem> {
        require(
            mode,
            &[
                self.description.as_str(),
                self.amount.as_str(),
                self.category.as_str(),
            ],
            "Nama item, jumlah, dan kategori harus diisi",
        )?;
        let amount = parse_amount(mode, &self.amount)?;
        let date = parse_date(mode, &self.date)?;

        Ok(BudgetItem {
            date,
            category: parse_choice(&self.category)?,
            description: self.description.trim().to_string(),
            vendor: self.vendor.trim().to_string(),
            amount,
            payment_method: parse_choice(&self.payment_method)?,
            status: parse_choice(&self.status)?,
        })
    }
}

/// Service for budget items
pub struct BudgetItemService<'a> {
    session: &'a Session,
}

impl<'a> BudgetItemService<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    /// Add an expense
    pub fn create(&self, form: &BudgetItemForm) -> PlannerResult<Committed> {
        let item = form.validate(FormMode::Create)?;
        create_record(self.session, &item)
    }

    /// Replace an expense with the form contents
    pub fn update(&self, id: &BudgetItemId, form: &BudgetItemForm) -> PlannerResult<Committed> {
        let item = form.validate(FormMode::Edit)?;
        update_record(self.session, id, &item)
    }

    pub fn delete(
        &self,
        id: &BudgetItemId,
        confirmation: DeleteConfirmation<BudgetItem>,
    ) -> PlannerResult<Committed> {
        delete_record(self.session, id, confirmation)
    }
}
