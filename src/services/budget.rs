//! Initial budget service
//!
//! Planned amounts live in one document keyed by category label. Each
//! change is a single-key merge, so the document is created on first use.

use tracing::{error, info};

use super::records::Committed;
use super::session::Session;
use super::validation::{parse_amount, FormMode};
use crate::audit::AuditEntry;
use crate::error::{PlannerError, PlannerResult};
use crate::models::{BudgetSetting, Category, EntityKind, Money, Notice, BUDGET_DOCUMENT_ID};
use crate::remote::WriteMode;
use crate::sync::PendingWrite;

/// Service for planned amounts
pub struct BudgetService<'a> {
    session: &'a Session,
}

impl<'a> BudgetService<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    /// Set the planned amount for a category from user input
    ///
    /// Blank input plans zero.
    pub fn set_planned(&self, category: Category, amount: &str) -> PlannerResult<Committed> {
        let amount = if amount.trim().is_empty() {
            Money::zero()
        } else {
            parse_amount(FormMode::Create, amount)?
        };
        self.write(category, amount)
    }

    /// Plan zero for a category
    pub fn reset(&self, category: Category) -> PlannerResult<Committed> {
        self.write(category, Money::zero())
    }

    fn write(&self, category: Category, amount: Money) -> PlannerResult<Committed> {
        let (store, namespace) = self.session.ready()?;
        let before = self
            .session
            .mirrors()
            .map(|m| BudgetSetting::patch(category, m.budget.current_snapshot().planned(category)));

        let ack = store
            .set_document(
                &namespace.budget_document(),
                BudgetSetting::patch(category, amount),
                WriteMode::Merge,
            )
            .map_err(|e| {
                error!(category = %category, "Error updating initial budget: {}", e);
                PlannerError::remote("Gagal memperbarui anggaran awal", e)
            })?;
        info!(category = %category, revision = ack.revision, "Planned {}", amount);

        self.session.audit(
            AuditEntry::update(
                EntityKind::BudgetSetting,
                BUDGET_DOCUMENT_ID,
                Some(category.label().to_string()),
                before.as_ref(),
                &BudgetSetting::patch(category, amount),
            )
            .at_revision(ack.revision),
        );

        Ok(Committed {
            notice: Notice::success(format!("Anggaran awal untuk {} diperbarui.", category)),
            write: PendingWrite::new(EntityKind::BudgetSetting, ack),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::{AuditLogger, Operation};
    use crate::models::UserId;
    use crate::remote::{LocalStore, Namespace};
    use crate::sync::{LiveSync, Mirrors};
    use std::sync::Arc;
    use tempfile::TempDir;

    struct Fixture {
        _temp_dir: TempDir,
        audit_path: std::path::PathBuf,
        mirrors: Mirrors,
        _sync: LiveSync,
        session: Session,
    }

    fn fixture() -> Fixture {
        let temp_dir = TempDir::new().unwrap();
        let audit_path = temp_dir.path().join("audit.log");
        let store = Arc::new(LocalStore::in_memory());
        let namespace = Namespace::new("horja", UserId::new("u1"));
        let mirrors = Mirrors::new();
        let sync = LiveSync::attach(store.as_ref(), namespace.clone(), &mirrors).unwrap();
        let session = Session::new(store, namespace)
            .with_audit(AuditLogger::new(audit_path.clone()))
            .with_mirrors(mirrors.clone());
        Fixture {
            _temp_dir: temp_dir,
            audit_path,
            mirrors,
            _sync: sync,
            session,
        }
    }

    #[test]
    fn test_set_planned_creates_document() {
        let f = fixture();
        let committed = BudgetService::new(&f.session)
            .set_planned(Category::Catering, "10000000")
            .unwrap();

        assert_eq!(
            committed.notice.message,
            "Anggaran awal untuk Katering diperbarui."
        );
        assert_eq!(committed.write.id, BUDGET_DOCUMENT_ID);
        assert!(f.mirrors.budget.reflects(&committed.write));
        assert_eq!(
            f.mirrors.budget.current_snapshot().planned(Category::Catering),
            Money::from_rupiah(10_000_000)
        );
    }

    #[test]
    fn test_merge_keeps_other_categories() {
        let f = fixture();
        let service = BudgetService::new(&f.session);
        service.set_planned(Category::Catering, "10000000").unwrap();
        service.set_planned(Category::Venue, "15000000").unwrap();

        let budget = f.mirrors.budget.current_snapshot();
        assert_eq!(budget.planned(Category::Catering), Money::from_rupiah(10_000_000));
        assert_eq!(budget.total(), Money::from_rupiah(25_000_000));
    }

    #[test]
    fn test_blank_plans_zero_and_reset() {
        let f = fixture();
        let service = BudgetService::new(&f.session);
        service.set_planned(Category::Decoration, "2500000").unwrap();
        service.set_planned(Category::Decoration, "  ").unwrap();
        assert_eq!(
            f.mirrors.budget.current_snapshot().planned(Category::Decoration),
            Money::zero()
        );

        service.set_planned(Category::Decoration, "2500000").unwrap();
        service.reset(Category::Decoration).unwrap();
        assert_eq!(
            f.mirrors.budget.current_snapshot().planned(Category::Decoration),
            Money::zero()
        );
    }

    #[test]
    fn test_invalid_amount_writes_nothing() {
        let f = fixture();
        let service = BudgetService::new(&f.session);
        let err = service.set_planned(Category::Catering, "sepuluh").unwrap_err();
        assert_eq!(err.notice().message, "Jumlah harus berupa angka.");
        let err = service.set_planned(Category::Catering, "-100").unwrap_err();
        assert_eq!(err.notice().message, "Jumlah tidak boleh negatif.");
        assert_eq!(f.mirrors.budget.current_snapshot(), BudgetSetting::new());
    }

    #[test]
    fn test_audit_records_change() {
        let f = fixture();
        let service = BudgetService::new(&f.session);
        service.set_planned(Category::Catering, "1000").unwrap();
        service.set_planned(Category::Catering, "2000").unwrap();

        let entries = AuditLogger::new(f.audit_path.clone()).read_all().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].operation, Operation::Update);
        assert_eq!(entries[1].entity_id, "initial_budget");
        assert_eq!(entries[1].diff_summary.as_deref(), Some("Katering: 1000 -> 2000"));
    }

    #[test]
    fn test_unready() {
        let session = Session::unready();
        let err = BudgetService::new(&session).reset(Category::Catering).unwrap_err();
        assert!(matches!(err, PlannerError::NotReady));
    }
}
