//! Application shell
//!
//! [`PlannerApp::mount`] signs in, attaches the live sync for the signed-in
//! user and then serves views computed from the mirrors. Identity changes
//! reported by the auth provider are picked up by
//! [`PlannerApp::poll_identity`], which clears the mirrors and re-attaches
//! under the new user's namespace.

use std::sync::mpsc::{self, Receiver};
use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::audit::AuditLogger;
use crate::auth::{bootstrap, AuthProvider, SignedIn};
use crate::config::backend::MISSING_BACKEND_MESSAGE;
use crate::config::BackendConfig;
use crate::error::{PlannerError, PlannerResult};
use crate::models::{BudgetItem, BudgetSetting, Notice, Stored, TodoItem, UserId, Vendor};
use crate::remote::{DocumentStore, Namespace};
use crate::reports::{
    BudgetSummaryReport, ChecklistReport, VendorDirectory, DUE_SOON_DAYS, NEAR_LIMIT_PERCENT,
};
use crate::services::{Committed, Session};
use crate::subscription::Subscription;
use crate::sync::{LiveSync, Mirrors, PendingWrite};

/// Report thresholds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    pub near_limit_percent: f64,
    pub due_soon_days: i64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            near_limit_percent: NEAR_LIMIT_PERCENT,
            due_soon_days: DUE_SOON_DAYS,
        }
    }
}

/// A mounted planner for one signed-in user at a time
pub struct PlannerApp {
    app_id: String,
    store: Arc<dyn DocumentStore>,
    auth: Arc<dyn AuthProvider>,
    audit: Option<AuditLogger>,
    thresholds: Thresholds,
    mirrors: Mirrors,
    user: Option<UserId>,
    signed_in: SignedIn,
    sync: Option<LiveSync>,
    notices: Vec<Notice>,
    identity_changes: Receiver<Option<UserId>>,
    _identity_subscription: Subscription,
}

impl PlannerApp {
    /// Sign in and start syncing
    ///
    /// # Errors
    ///
    /// [`PlannerError::Initialization`] without a backend configuration;
    /// [`PlannerError::Auth`] if even anonymous sign-in fails.
    pub fn mount(
        backend: Option<&BackendConfig>,
        store: Arc<dyn DocumentStore>,
        auth: Arc<dyn AuthProvider>,
        token: Option<&str>,
    ) -> PlannerResult<Self> {
        let backend =
            backend.ok_or_else(|| PlannerError::Initialization(MISSING_BACKEND_MESSAGE.into()))?;

        let signed_in = bootstrap(auth.as_ref(), token)?;
        info!(user = %signed_in.user_id, method = ?signed_in.method, "Signed in");

        let (sender, identity_changes) = mpsc::channel();
        let identity_subscription =
            auth.on_identity_changed(Box::new(move |user: &Option<UserId>| {
                // The app may already be gone; nothing to do then
                let _ = sender.send(user.clone());
            }));

        let mut app = Self {
            app_id: backend.app_id.clone(),
            store,
            auth,
            audit: None,
            thresholds: Thresholds::default(),
            mirrors: Mirrors::new(),
            user: None,
            notices: vec![signed_in.notice()],
            signed_in,
            sync: None,
            identity_changes,
            _identity_subscription: identity_subscription,
        };
        let user = app.signed_in.user_id.clone();
        app.switch_user(Some(user))?;
        Ok(app)
    }

    pub fn with_audit(mut self, audit: AuditLogger) -> Self {
        self.audit = Some(audit);
        self
    }

    pub fn with_thresholds(mut self, thresholds: Thresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// How the initial sign-in happened
    pub fn signed_in(&self) -> &SignedIn {
        &self.signed_in
    }

    pub fn user(&self) -> Option<&UserId> {
        self.user.as_ref()
    }

    pub fn namespace(&self) -> Option<&Namespace> {
        self.sync.as_ref().map(LiveSync::namespace)
    }

    pub fn auth(&self) -> &dyn AuthProvider {
        self.auth.as_ref()
    }

    pub fn mirrors(&self) -> &Mirrors {
        &self.mirrors
    }

    /// Session for running commands as the current user
    pub fn session(&self) -> Session {
        match self.namespace() {
            Some(namespace) => {
                let session = Session::new(self.store.clone(), namespace.clone())
                    .with_mirrors(self.mirrors.clone());
                match &self.audit {
                    Some(audit) => session.with_audit(audit.clone()),
                    None => session,
                }
            }
            None => Session::unready(),
        }
    }

    /// Apply identity changes reported since the last call
    ///
    /// Returns true if the user changed.
    pub fn poll_identity(&mut self) -> PlannerResult<bool> {
        let latest = match self.identity_changes.try_iter().last() {
            Some(user) => user,
            None => return Ok(false),
        };
        if latest == self.user {
            return Ok(false);
        }
        self.switch_user(latest)?;
        Ok(true)
    }

    fn switch_user(&mut self, user: Option<UserId>) -> PlannerResult<()> {
        // Unsubscribe before clearing the mirrors
        self.sync = None;
        self.mirrors.clear();
        self.user = user.clone();

        if let Some(user) = user {
            let namespace = Namespace::new(self.app_id.clone(), user);
            debug!(app = %namespace.app_id(), user = %namespace.user_id(), "Attaching live sync");
            self.sync = Some(LiveSync::attach(self.store.as_ref(), namespace, &self.mirrors)?);
        } else {
            info!("Signed out; mirrors cleared");
        }
        Ok(())
    }

    /// Record a command outcome as a notice
    ///
    /// Returns the pending write on success.
    pub fn report(&mut self, outcome: PlannerResult<Committed>) -> Option<PendingWrite> {
        match outcome {
            Ok(committed) => {
                self.notices.push(committed.notice);
                Some(committed.write)
            }
            Err(e) => {
                if !e.is_validation() {
                    warn!("Command failed: {}", e);
                }
                self.notices.push(e.notice());
                None
            }
        }
    }

    pub fn push_notice(&mut self, notice: Notice) {
        self.notices.push(notice);
    }

    /// Drain queued notices
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    /// Persistent error state: failed snapshots, joined
    pub fn error_state(&self) -> Option<String> {
        let errors = self.mirrors.errors();
        if errors.is_empty() {
            None
        } else {
            Some(errors.join("; "))
        }
    }

    /// Documents left out of the views because they did not decode
    pub fn rejected_documents(&self) -> usize {
        self.mirrors.rejected_documents()
    }

    pub fn budget(&self) -> BudgetSetting {
        self.mirrors.budget.current_snapshot()
    }

    pub fn items(&self) -> Vec<Stored<BudgetItem>> {
        self.mirrors.items.current_snapshot()
    }

    pub fn todos(&self) -> Vec<Stored<TodoItem>> {
        self.mirrors.todos.current_snapshot()
    }

    pub fn vendors(&self) -> Vec<Stored<Vendor>> {
        self.mirrors.vendors.current_snapshot()
    }

    pub fn summary(&self) -> BudgetSummaryReport {
        BudgetSummaryReport::generate_with_threshold(
            &self.budget(),
            &self.items(),
            self.thresholds.near_limit_percent,
        )
    }

    pub fn checklist(&self, today: NaiveDate) -> ChecklistReport {
        ChecklistReport::generate(&self.todos(), today, self.thresholds.due_soon_days)
    }

    pub fn directory(&self) -> VendorDirectory {
        VendorDirectory::generate(&self.vendors())
    }
}
