//! Local mirrors of remote data
//!
//! A [`Mirror`] holds the latest snapshot of one remote source. Each
//! snapshot replaces the previous value wholesale; a snapshot older than
//! the one already applied is dropped.

use std::sync::{Arc, RwLock};

use tracing::debug;

use crate::models::EntityKind;
use crate::remote::WriteAck;
use crate::subscription::{ListenerSet, Subscription};

/// Token returned by a successful command
///
/// Carries the store revision of the write so callers can tell when the
/// matching mirror has caught up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingWrite {
    pub kind: EntityKind,
    pub id: String,
    pub revision: u64,
}

impl PendingWrite {
    pub fn new(kind: EntityKind, ack: WriteAck) -> Self {
        Self {
            kind,
            id: ack.id,
            revision: ack.revision,
        }
    }
}

struct MirrorState<S> {
    value: S,
    revision: Option<u64>,
    last_error: Option<String>,
    rejected_documents: usize,
}

impl<S: Default> Default for MirrorState<S> {
    fn default() -> Self {
        Self {
            value: S::default(),
            revision: None,
            last_error: None,
            rejected_documents: 0,
        }
    }
}

/// Latest known value of one remote source
///
/// Clones share state.
pub struct Mirror<S> {
    kind: EntityKind,
    state: Arc<RwLock<MirrorState<S>>>,
    listeners: ListenerSet<S>,
}

impl<S> Clone for Mirror<S> {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            state: Arc::clone(&self.state),
            listeners: self.listeners.clone(),
        }
    }
}

impl<S: Clone + Default + Send + Sync + 'static> Mirror<S> {
    pub fn new(kind: EntityKind) -> Self {
        Self {
            kind,
            state: Arc::new(RwLock::new(MirrorState::default())),
            listeners: ListenerSet::new(),
        }
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    /// Be told about every applied snapshot
    pub fn subscribe(&self, callback: impl Fn(&S) + Send + Sync + 'static) -> Subscription {
        self.listeners.add(callback)
    }

    /// The current value (empty until the first snapshot)
    pub fn current_snapshot(&self) -> S {
        self.read(|state| state.value.clone())
    }

    /// Revision of the applied snapshot, `None` before the first one
    pub fn revision(&self) -> Option<u64> {
        self.read(|state| state.revision)
    }

    /// Last snapshot error, already localized
    pub fn last_error(&self) -> Option<String> {
        self.read(|state| state.last_error.clone())
    }

    /// Documents left out of the current value because they did not decode
    pub fn rejected_documents(&self) -> usize {
        self.read(|state| state.rejected_documents)
    }

    /// Check if the current value includes `write`
    pub fn reflects(&self, write: &PendingWrite) -> bool {
        write.kind == self.kind && self.revision().is_some_and(|rev| rev >= write.revision)
    }

    /// Replace the value with a snapshot taken at `revision`
    ///
    /// Returns `false` if the snapshot is older than the current value.
    pub fn apply(&self, revision: u64, value: S, rejected_documents: usize) -> bool {
        {
            let mut state = self.write_state();
            if state.revision.is_some_and(|current| revision < current) {
                debug!(kind = %self.kind, revision, "Ignoring stale snapshot");
                return false;
            }
            state.value = value.clone();
            state.revision = Some(revision);
            state.last_error = None;
            state.rejected_documents = rejected_documents;
        }

        self.listeners.notify(&value);
        true
    }

    /// Record a snapshot failure; the current value is kept
    pub fn fail(&self, message: impl Into<String>) {
        self.write_state().last_error = Some(message.into());
    }

    /// Forget everything, e.g. when the signed-in user changes
    pub fn clear(&self) {
        *self.write_state() = MirrorState::default();
        self.listeners.notify(&S::default());
    }

    fn read<T>(&self, f: impl FnOnce(&MirrorState<S>) -> T) -> T {
        let state = self
            .state
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        f(&state)
    }

    fn write_state(&self) -> std::sync::RwLockWriteGuard<'_, MirrorState<S>> {
        self.state
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_empty_until_first_snapshot() {
        let mirror: Mirror<Vec<u32>> = Mirror::new(EntityKind::Todo);
        assert!(mirror.current_snapshot().is_empty());
        assert_eq!(mirror.revision(), None);
    }

    #[test]
    fn test_stale_snapshot_is_ignored() {
        let mirror: Mirror<Vec<u32>> = Mirror::new(EntityKind::BudgetItem);
        assert!(mirror.apply(5, vec![1, 2], 0));
        assert!(!mirror.apply(4, vec![1], 0));
        assert_eq!(mirror.current_snapshot(), vec![1, 2]);
        assert_eq!(mirror.revision(), Some(5));
    }

    #[test]
    fn test_reflects_pending_write() {
        let mirror: Mirror<Vec<u32>> = Mirror::new(EntityKind::Vendor);
        let write = PendingWrite {
            kind: EntityKind::Vendor,
            id: "v1".into(),
            revision: 3,
        };
        mirror.apply(2, vec![], 0);
        assert!(!mirror.reflects(&write));
        mirror.apply(3, vec![1], 0);
        assert!(mirror.reflects(&write));

        let other = PendingWrite {
            kind: EntityKind::Todo,
            ..write
        };
        assert!(!mirror.reflects(&other));
    }

    #[test]
    fn test_failure_keeps_value() {
        let mirror: Mirror<Vec<u32>> = Mirror::new(EntityKind::Todo);
        mirror.apply(1, vec![7], 0);
        mirror.fail("Gagal mengambil item tugas: permission denied");
        assert_eq!(mirror.current_snapshot(), vec![7]);
        assert_eq!(
            mirror.last_error().as_deref(),
            Some("Gagal mengambil item tugas: permission denied")
        );
    }

    #[test]
    fn test_subscribers_see_applied_values_only() {
        let mirror: Mirror<Vec<u32>> = Mirror::new(EntityKind::Todo);
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let _sub = mirror.subscribe(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        mirror.apply(2, vec![1], 0);
        mirror.apply(1, vec![], 0);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_clear_resets_revision() {
        let mirror: Mirror<Vec<u32>> = Mirror::new(EntityKind::Todo);
        mirror.apply(9, vec![1], 2);
        mirror.clear();
        assert_eq!(mirror.revision(), None);
        assert_eq!(mirror.rejected_documents(), 0);
        assert!(mirror.apply(1, vec![3], 0));
    }
}
