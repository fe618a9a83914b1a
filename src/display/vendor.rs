//! Vendor directory display

use tabled::Tabled;

use super::format::truncate;
use super::table::render;
use crate::models::{Stored, Vendor};
use crate::reports::VendorDirectory;

pub const VENDORS_TITLE: &str = "Daftar Vendor & Kontak Penting";
pub const NO_VENDORS: &str = "Belum ada vendor yang tercatat.";

#[derive(Tabled)]
struct VendorLine {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Kategori")]
    category: String,
    #[tabled(rename = "Nama Vendor")]
    name: String,
    #[tabled(rename = "Kontak Person")]
    contact_person: String,
    #[tabled(rename = "Telepon")]
    phone: String,
    #[tabled(rename = "Email")]
    email: String,
    #[tabled(rename = "Alamat")]
    address: String,
    #[tabled(rename = "Catatan")]
    notes: String,
}

fn vendor_line(vendor: &Stored<Vendor>) -> VendorLine {
    VendorLine {
        id: vendor.id.short().to_string(),
        category: vendor.category.to_string(),
        name: vendor.name.clone(),
        contact_person: vendor.contact_person.clone(),
        phone: vendor.phone.clone(),
        email: vendor.email.clone(),
        address: truncate(&vendor.address, 30),
        notes: truncate(&vendor.notes, 30),
    }
}

/// Format vendors as one table
pub fn format_vendor_list(vendors: &[Stored<Vendor>]) -> String {
    if vendors.is_empty() {
        return NO_VENDORS.to_string();
    }
    render(vendors.iter().map(vendor_line).collect())
}

/// Format vendors as one section per category
pub fn format_vendor_directory(directory: &VendorDirectory) -> String {
    if directory.sections.is_empty() {
        return NO_VENDORS.to_string();
    }

    let mut output = String::new();
    for section in &directory.sections {
        output.push_str(&format!("{} ({})\n", section.category, section.vendors.len()));
        for vendor in &section.vendors {
            output.push_str(&format!("  {}  {}", vendor.id.short(), vendor.name));
            if !vendor.contact_person.is_empty() {
                output.push_str(&format!(", {}", vendor.contact_person));
            }
            if !vendor.phone.is_empty() {
                output.push_str(&format!(", {}", vendor.phone));
            }
            output.push('\n');
        }
    }
    output
}
