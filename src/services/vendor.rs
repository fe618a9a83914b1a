//! Vendor service

use super::records::{create_record, delete_record, update_record, Committed, DeleteConfirmation};
use super::session::Session;
use super::validation::{parse_choice, require, FormMode};
use crate::error::PlannerResult;
use crate::models::{Category, Vendor, VendorId};

/// Vendor form as typed by the user
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VendorForm {
    pub category: String,
    pub name: String,
    pub contact_person: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub notes: String,
}

impl VendorForm {
    /// A blank form in the first category
    pub fn new() -> Self {
        Self {
            category: Category::first().label().to_string(),
            ..Self::default()
        }
    }

    pub fn from_vendor(vendor: &Vendor) -> Self {
        Self {
            category: vendor.category.label().to_string(),
            name: vendor.name.clone(),
            contact_person: vendor.contact_person.clone(),
            phone: vendor.phone.clone(),
            email: vendor.email.clone(),
            address: vendor.address.clone(),
            notes: vendor.notes.clone(),
        }
    }

    pub fn validate(&self, mode: FormMode) -> PlannerResult<Vendor> {
        require(
            mode,
            &[self.name.as_str(), self.category.as_str()],
            "Nama vendor dan kategori harus diisi",
        )?;

        Ok(Vendor {
            category: parse_choice(&self.category)?,
            name: self.name.trim().to_string(),
            contact_person: self.contact_person.trim().to_string(),
            phone: self.phone.trim().to_string(),
            email: self.email.trim().to_string(),
            address: self.address.trim().to_string(),
            notes: self.notes.trim().to_string(),
        })
    }
}

/// Service for the vendor directory
pub struct VendorService<'a> {
    session: &'a Session,
}

impl<'a> VendorService<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    pub fn create(&self, form: &VendorForm) -> PlannerResult<Committed> {
        let vendor = form.validate(FormMode::Create)?;
        create_record(self.session, &vendor)
    }

    pub fn update(&self, id: &VendorId, form: &VendorForm) -> PlannerResult<Committed> {
        let vendor = form.validate(FormMode::Edit)?;
        update_record(self.session, id, &vendor)
    }

    pub fn delete(
        &self,
        id: &VendorId,
        confirmation: DeleteConfirmation<Vendor>,
    ) -> PlannerResult<Committed> {
        delete_record(self.session, id, confirmation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::AuditLogger;
    use crate::error::PlannerError;
    use crate::models::UserId;
    use crate::remote::{LocalStore, Namespace};
    use crate::sync::{LiveSync, Mirrors};
    use std::sync::Arc;
    use tempfile::TempDir;

    fn horas_form() -> VendorForm {
        VendorForm {
            category: "Katering".into(),
            name: "Catering Horas".into(),
            contact_person: "Bapak Hutagalung".into(),
            phone: "0812-0000-1111".into(),
            ..VendorForm::new()
        }
    }

    #[test]
    fn test_required_fields() {
        let form = VendorForm::new();
        let err = form.validate(FormMode::Create).unwrap_err();
        assert_eq!(err.notice().message, "Nama vendor dan kategori harus diisi.");
    }

    #[test]
    fn test_update_audit_has_diff() {
        let temp_dir = TempDir::new().unwrap();
        let store = Arc::new(LocalStore::in_memory());
        let namespace = Namespace::new("horja", UserId::new("u1"));
        let mirrors = Mirrors::new();
        let _sync = LiveSync::attach(store.as_ref(), namespace.clone(), &mirrors).unwrap();
        let session = Session::new(store, namespace)
            .with_audit(AuditLogger::new(temp_dir.path().join("audit.log")))
            .with_mirrors(mirrors);

        let service = VendorService::new(&session);
        let committed = service.create(&horas_form()).unwrap();
        let form = VendorForm {
            phone: "0813-2222-3333".into(),
            ..horas_form()
        };
        service
            .update(&VendorId::new(committed.write.id), &form)
            .unwrap();

        let entries = AuditLogger::new(temp_dir.path().join("audit.log")).read_all().unwrap();
        assert_eq!(
            entries[1].diff_summary.as_deref(),
            Some("phone: \"0812-0000-1111\" -> \"0813-2222-3333\"")
        );
    }

    #[test]
    fn test_remote_failure_is_reported_with_context() {
        let temp_dir = TempDir::new().unwrap();
        let store_path = temp_dir.path().join("store.json");
        let store = Arc::new(LocalStore::open(store_path.clone()).unwrap());
        // The temp file cannot be created over a directory
        std::fs::create_dir_all(store_path.with_extension("json.tmp")).unwrap();

        let session = Session::new(store.clone(), Namespace::new("horja", UserId::new("u1")));
        let err = VendorService::new(&session).create(&horas_form()).unwrap_err();
        assert!(matches!(err, PlannerError::Remote { .. }));
        assert!(err.to_string().starts_with("Gagal menambahkan vendor: "));
        assert_eq!(store.revision().unwrap(), 0);
    }

    #[test]
    fn test_delete_declined_never_reaches_store() {
        assert!(DeleteConfirmation::<Vendor>::ask(|question| {
            assert_eq!(question, "Apakah Anda yakin ingin menghapus vendor ini?");
            false
        })
        .is_none());
    }
}
