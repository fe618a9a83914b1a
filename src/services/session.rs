//! Command session
//!
//! What every command needs: the store, the signed-in user's namespace, and
//! optionally the audit log and the mirrors (read for audit "before"
//! values only).

use std::sync::Arc;

use tracing::warn;

use crate::audit::{AuditEntry, AuditLogger};
use crate::error::{PlannerError, PlannerResult};
use crate::remote::{DocumentStore, Namespace};
use crate::sync::Mirrors;

/// Handle commands run against
#[derive(Clone, Default)]
pub struct Session {
    store: Option<Arc<dyn DocumentStore>>,
    namespace: Option<Namespace>,
    audit: Option<AuditLogger>,
    mirrors: Option<Mirrors>,
}

impl Session {
    /// A session for a signed-in user
    pub fn new(store: Arc<dyn DocumentStore>, namespace: Namespace) -> Self {
        Self {
            store: Some(store),
            namespace: Some(namespace),
            audit: None,
            mirrors: None,
        }
    }

    /// A session with no store or user yet; every command fails with `NotReady`
    pub fn unready() -> Self {
        Self::default()
    }

    pub fn with_audit(mut self, audit: AuditLogger) -> Self {
        self.audit = Some(audit);
        self
    }

    pub fn with_mirrors(mut self, mirrors: Mirrors) -> Self {
        self.mirrors = Some(mirrors);
        self
    }

    pub fn namespace(&self) -> Option<&Namespace> {
        self.namespace.as_ref()
    }

    pub fn is_ready(&self) -> bool {
        self.store.is_some() && self.namespace.is_some()
    }

    /// The store and namespace, or `NotReady`
    pub(crate) fn ready(&self) -> PlannerResult<(&dyn DocumentStore, &Namespace)> {
        match (&self.store, &self.namespace) {
            (Some(store), Some(namespace)) => Ok((store.as_ref(), namespace)),
            _ => Err(PlannerError::NotReady),
        }
    }

    pub(crate) fn mirrors(&self) -> Option<&Mirrors> {
        self.mirrors.as_ref()
    }

    /// Append to the audit log; failures are logged and otherwise ignored
    pub(crate) fn audit(&self, entry: AuditEntry) {
        if let Some(audit) = &self.audit {
            if let Err(e) = audit.log(&entry) {
                warn!(
                    operation = %entry.operation,
                    entity = %entry.entity_type,
                    "Failed to write audit entry: {}",
                    e
                );
            }
        }
    }
}
