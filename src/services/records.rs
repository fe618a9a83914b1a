//! Create, update and delete for list entities
//!
//! Budget items, tasks and vendors are written the same way; only their
//! forms differ. A successful write returns a notice and a [`PendingWrite`];
//! the mirrors catch up through the live subscription.

use std::marker::PhantomData;

use tracing::{error, info};

use super::session::Session;
use crate::audit::AuditEntry;
use crate::error::{PlannerError, PlannerResult};
use crate::models::{Entity, EntityKind, Notice};
use crate::sync::{Mirrored, PendingWrite};

/// Outcome of a successful command
#[derive(Debug, Clone)]
pub struct Committed {
    pub notice: Notice,
    pub write: PendingWrite,
}

/// Proof that the user agreed to delete a record of type `E`
///
/// Only [`DeleteConfirmation::ask`] creates one.
#[derive(Debug)]
pub struct DeleteConfirmation<E> {
    _entity: PhantomData<fn() -> E>,
}

impl<E: Entity> DeleteConfirmation<E> {
    /// The yes/no question shown before deleting
    pub fn question() -> String {
        format!("Apakah Anda yakin ingin menghapus {} ini?", E::KIND.noun())
    }

    /// Ask `prompt` the question; `None` if the user declined
    pub fn ask(prompt: impl FnOnce(&str) -> bool) -> Option<Self> {
        if prompt(&Self::question()) {
            Some(Self {
                _entity: PhantomData,
            })
        } else {
            None
        }
    }
}

/// "Item anggaran", "Tugas", "Vendor"
fn title(kind: EntityKind) -> String {
    let noun = kind.noun();
    let mut chars = noun.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn not_found(kind: EntityKind, id: &str) -> PlannerError {
    match kind {
        EntityKind::BudgetItem => PlannerError::budget_item_not_found(id),
        EntityKind::Todo => PlannerError::todo_not_found(id),
        EntityKind::Vendor => PlannerError::vendor_not_found(id),
        EntityKind::BudgetSetting => PlannerError::document_not_found(id),
    }
}

/// Map a store failure to the error the user sees
fn write_failed(kind: EntityKind, verb: &str, id: &str, err: PlannerError) -> PlannerError {
    if err.is_not_found() {
        return not_found(kind, id);
    }
    error!(kind = %kind, id = %id, "Error {} document: {}", verb, err);
    PlannerError::remote(format!("Gagal {} {}", verb, kind.noun()), err)
}

pub(crate) fn create_record<E: Entity>(session: &Session, entity: &E) -> PlannerResult<Committed> {
    let (store, namespace) = session.ready()?;

    let ack = store
        .add_document(&namespace.collection(E::KIND), entity.to_document()?)
        .map_err(|e| write_failed(E::KIND, "menambahkan", "", e))?;
    info!(kind = %E::KIND, id = %ack.id, revision = ack.revision, "Created {}", entity.summary());

    session.audit(
        AuditEntry::create(E::KIND, ack.id.clone(), Some(entity.summary()), entity)
            .at_revision(ack.revision),
    );

    Ok(Committed {
        notice: Notice::success(format!("{} berhasil ditambahkan!", title(E::KIND))),
        write: PendingWrite::new(E::KIND, ack),
    })
}

pub(crate) fn update_record<E: Mirrored>(
    session: &Session,
    id: &E::Id,
    entity: &E,
) -> PlannerResult<Committed> {
    let (store, namespace) = session.ready()?;
    let path = namespace.collection(E::KIND).doc(id.as_ref());

    let before = session.mirrors().and_then(|m| E::find(m, id));
    let ack = store
        .update_document(&path, entity.to_document()?)
        .map_err(|e| write_failed(E::KIND, "memperbarui", id.as_ref(), e))?;
    info!(kind = %E::KIND, id = %id, revision = ack.revision, "Updated {}", entity.summary());

    session.audit(
        AuditEntry::update(
            E::KIND,
            id.to_string(),
            Some(entity.summary()),
            before.as_ref().map(|record| &record.data),
            entity,
        )
        .at_revision(ack.revision),
    );

    Ok(Committed {
        notice: Notice::success(format!("{} berhasil diperbarui!", title(E::KIND))),
        write: PendingWrite::new(E::KIND, ack),
    })
}

pub(crate) fn delete_record<E: Mirrored>(
    session: &Session,
    id: &E::Id,
    _confirmation: DeleteConfirmation<E>,
) -> PlannerResult<Committed> {
    let (store, namespace) = session.ready()?;
    let path = namespace.collection(E::KIND).doc(id.as_ref());

    let before = session.mirrors().and_then(|m| E::find(m, id));
    let ack = store
        .delete_document(&path)
        .map_err(|e| write_failed(E::KIND, "menghapus", id.as_ref(), e))?;
    info!(kind = %E::KIND, id = %id, revision = ack.revision, "Deleted");

    session.audit(
        AuditEntry::delete(
            E::KIND,
            id.to_string(),
            before.as_ref().map(|record| record.summary()),
            before.as_ref().map(|record| &record.data),
        )
        .at_revision(ack.revision),
    );

    Ok(Committed {
        notice: Notice::success(format!("{} berhasil dihapus.", title(E::KIND))),
        write: PendingWrite::new(E::KIND, ack),
    })
}
