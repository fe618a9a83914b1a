//! Vendor directory grouped by category

use super::index::CategoryIndex;
use crate::models::{Category, Stored, Vendor};

/// Vendors in one category
#[derive(Debug, Clone)]
pub struct DirectorySection {
    pub category: Category,
    pub vendors: Vec<Stored<Vendor>>,
}

/// Non-empty categories in category order
#[derive(Debug, Clone, Default)]
pub struct VendorDirectory {
    pub sections: Vec<DirectorySection>,
}

impl VendorDirectory {
    pub fn generate(vendors: &[Stored<Vendor>]) -> Self {
        let index = CategoryIndex::build(vendors, |vendor: &Stored<Vendor>| vendor.category);
        let sections = index
            .iter()
            .map(|(category, vendors)| DirectorySection {
                category,
                vendors: vendors.iter().map(|v| (*v).clone()).collect(),
            })
            .collect();
        Self { sections }
    }

    /// Vendors serving `category`
    pub fn section(&self, category: Category) -> Option<&DirectorySection> {
        self.sections.iter().find(|s| s.category == category)
    }

    pub fn vendor_count(&self) -> usize {
        self.sections.iter().map(|s| s.vendors.len()).sum()
    }
}
