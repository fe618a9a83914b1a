//! Initial budget (planned amounts per category)
//!
//! Stored as a single document mapping category labels to rupiah amounts.
//! Categories without an entry are planned at zero.

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

use super::category::Category;
use super::money::Money;

/// Id of the budget document inside the settings collection
pub const BUDGET_DOCUMENT_ID: &str = "initial_budget";

/// Planned amount per category
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BudgetSetting {
    planned: BTreeMap<Category, Money>,
}

impl BudgetSetting {
    /// Create an empty budget
    pub fn new() -> Self {
        Self::default()
    }

    /// Planned amount for a category (zero if never set)
    pub fn planned(&self, category: Category) -> Money {
        self.planned.get(&category).copied().unwrap_or_default()
    }

    /// Set the planned amount for a category
    pub fn set(&mut self, category: Category, amount: Money) {
        self.planned.insert(category, amount);
    }

    /// Builder form of [`set`](Self::set)
    pub fn with(mut self, category: Category, amount: Money) -> Self {
        self.set(category, amount);
        self
    }

    /// Sum of planned amounts across all categories
    pub fn total(&self) -> Money {
        self.planned.values().sum()
    }

    /// Categories that have an explicit entry, in category order
    pub fn iter(&self) -> impl Iterator<Item = (Category, Money)> + '_ {
        self.planned.iter().map(|(c, m)| (*c, *m))
    }

    /// Check if no category has been set
    pub fn is_empty(&self) -> bool {
        self.planned.is_empty()
    }

    /// Decode the budget document, skipping entries that are not valid
    ///
    /// Returns the budget and the number of rejected entries. An entry is
    /// rejected when its key is not a known category label or its value is
    /// not a non-negative number.
    pub fn from_document(body: &Map<String, Value>) -> (Self, usize) {
        let mut budget = Self::new();
        let mut rejected = 0;

        for (key, value) in body {
            let category = match Category::from_str(key) {
                Ok(category) => category,
                Err(e) => {
                    warn!(key = %key, "Ignoring budget entry: {}", e);
                    rejected += 1;
                    continue;
                }
            };

            match serde_json::from_value::<Money>(value.clone()) {
                Ok(amount) if !amount.is_negative() => budget.set(category, amount),
                Ok(amount) => {
                    warn!(category = %category, "Ignoring negative planned amount {}", amount);
                    rejected += 1;
                }
                Err(e) => {
                    warn!(category = %category, "Ignoring planned amount {}: {}", value, e);
                    rejected += 1;
                }
            }
        }

        (budget, rejected)
    }

    /// Encode a single-category patch for a merge write
    pub fn patch(category: Category, amount: Money) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert(
            category.label().to_string(),
            serde_json::to_value(amount).unwrap_or(Value::Null),
        );
        map
    }
}
