//! Vendor model
//!
//! Contact directory entries, classified with the budget categories.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::category::Category;
use super::ids::VendorId;
use super::record::{Entity, EntityKind, Stored};

/// A vendor contact
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vendor {
    /// Category the vendor serves
    pub category: Category,

    /// Vendor name
    pub name: String,

    #[serde(default)]
    pub contact_person: String,

    #[serde(default)]
    pub phone: String,

    #[serde(default)]
    pub email: String,

    #[serde(default)]
    pub address: String,

    #[serde(default)]
    pub notes: String,
}

impl Vendor {
    /// Create a vendor with no contact details
    pub fn new(category: Category, name: impl Into<String>) -> Self {
        Self {
            category,
            name: name.into(),
            contact_person: String::new(),
            phone: String::new(),
            email: String::new(),
            address: String::new(),
            notes: String::new(),
        }
    }
}

impl Entity for Vendor {
    type Id = VendorId;
    const KIND: EntityKind = EntityKind::Vendor;

    /// By category label, then by name
    fn presentation_order(a: &Stored<Self>, b: &Stored<Self>) -> Ordering {
        a.category
            .label()
            .to_lowercase()
            .cmp(&b.category.label().to_lowercase())
            .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
            .then_with(|| a.id.cmp(&b.id))
    }

    fn summary(&self) -> String {
        format!("{} ({})", self.name, self.category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::record::sort_for_presentation;
    use serde_json::json;

    #[test]
    fn test_sorted_by_category_label() {
        let mut vendors = vec![
            Stored::new(VendorId::new("1"), Vendor::new(Category::Transportation, "Bus Horas")),
            Stored::new(VendorId::new("2"), Vendor::new(Category::Catering, "Catering Horas")),
            Stored::new(VendorId::new("3"), Vendor::new(Category::Decoration, "Dekor Indah")),
        ];
        sort_for_presentation(&mut vendors);

        let order: Vec<_> = vendors.iter().map(|v| v.id.as_str()).collect();
        // "Dekorasi" < "Katering" < "Transportasi"
        assert_eq!(order, vec!["3", "2", "1"]);
    }

    #[test]
    fn test_missing_contact_fields_default_to_empty() {
        let body = json!({"category": "Katering", "name": "Catering Horas"});
        let stored = Stored::<Vendor>::from_document("v", body.as_object().unwrap()).unwrap();
        assert_eq!(stored.contact_person, "");
        assert_eq!(stored.name, "Catering Horas");
    }

    #[test]
    fn test_document_field_names() {
        let mut vendor = Vendor::new(Category::Catering, "Catering Horas");
        vendor.contact_person = "Bapak Hutagalung".into();
        let doc = vendor.to_document().unwrap();
        assert_eq!(doc["contactPerson"], json!("Bapak Hutagalung"));
    }
}
