//! Shared setup for CLI commands
//!
//! Every command that touches planner data mounts a [`PlannerApp`] against
//! the local store, resuming the session saved in settings.

use std::io::{self, BufRead, Write};
use std::sync::Arc;

use chrono::{Local, NaiveDate};
use tracing::debug;

use crate::app::{PlannerApp, Thresholds};
use crate::audit::AuditLogger;
use crate::auth::{LocalAuth, SignInMethod};
use crate::config::{BackendConfig, PlannerPaths, Settings};
use crate::error::{PlannerError, PlannerResult};
use crate::models::{Entity, NoticeKind, UserId};
use crate::remote::LocalStore;
use crate::services::{Committed, DeleteConfirmation};
use crate::sync::Mirrored;

/// Shortest id prefix accepted in place of a full id
pub const MIN_ID_PREFIX: usize = 4;

/// A mounted planner plus the files it came from
pub struct CliContext {
    pub paths: PlannerPaths,
    pub settings: Settings,
    pub app: PlannerApp,
}

impl CliContext {
    /// Load configuration, sign in and sync
    ///
    /// `token` overrides the bootstrap token saved in settings.
    pub fn open(paths: PlannerPaths, token: Option<&str>) -> PlannerResult<Self> {
        let mut settings = Settings::load_or_create(&paths)?;
        let backend = BackendConfig::load(&paths)?;

        let store = Arc::new(LocalStore::open(paths.store_file())?);
        let auth = Arc::new(
            LocalAuth::from_backend(&backend)
                .with_session(settings.session_uid.clone().map(UserId::new)),
        );
        let token = token.or(settings.bootstrap_token.as_deref());

        let mut app = PlannerApp::mount(Some(&backend), store, auth, token)?
            .with_audit(AuditLogger::new(paths.audit_log()))
            .with_thresholds(Thresholds {
                near_limit_percent: settings.near_limit_percent,
                due_soon_days: settings.due_soon_days,
            });

        if app.signed_in().method == SignInMethod::ExistingSession {
            app.take_notices();
        }

        let uid = app.signed_in().user_id.as_str().to_string();
        if settings.session_uid.as_deref() != Some(uid.as_str()) {
            debug!(user = %uid, "Saving session");
            settings.session_uid = Some(uid);
            settings.save(&paths)?;
        }

        Ok(Self {
            paths,
            settings,
            app,
        })
    }

    /// Print queued notices; successes and info to stdout, the rest to stderr
    pub fn flush_notices(&mut self) {
        for notice in self.app.take_notices() {
            match notice.kind {
                NoticeKind::Success | NoticeKind::Info => println!("{}", notice),
                NoticeKind::Warning | NoticeKind::Error => eprintln!("{}", notice),
            }
        }
        if let Some(error) = self.app.error_state() {
            eprintln!("{}", error);
        }
    }

    /// Report a successful command
    pub fn commit(&mut self, committed: Committed) {
        self.app.report(Ok(committed));
        self.flush_notices();
    }

    /// Resolve a full id or a unique prefix of one
    ///
    /// Prefixes shorter than [`MIN_ID_PREFIX`] only match exactly. An id that
    /// matches nothing is passed through unchanged so the store reports it
    /// as missing.
    pub fn resolve_id<E: Mirrored>(&self, given: &str) -> PlannerResult<E::Id> {
        let given = given.trim();
        if given.is_empty() {
            return Err(PlannerError::Validation(format!(
                "ID {} tidak boleh kosong.",
                E::KIND.noun()
            )));
        }

        let records = E::mirror(self.app.mirrors()).current_snapshot();
        if let Some(record) = records.iter().find(|r| r.id.as_ref() == given) {
            return Ok(record.id.clone());
        }
        if given.chars().count() < MIN_ID_PREFIX {
            return Ok(E::Id::from(given.to_string()));
        }

        let mut matches = records.iter().filter(|r| r.id.as_ref().starts_with(given));
        match (matches.next(), matches.next()) {
            (Some(record), None) => Ok(record.id.clone()),
            (Some(_), Some(_)) => Err(PlannerError::Validation(format!(
                "ID '{}' cocok dengan lebih dari satu {}.",
                given,
                E::KIND.noun()
            ))),
            (None, _) => Ok(E::Id::from(given.to_string())),
        }
    }

    pub fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Ask on stdin, or skip the question when `yes` is set
pub fn confirm_delete<E: Entity>(yes: bool) -> Option<DeleteConfirmation<E>> {
    DeleteConfirmation::ask(|question| yes || prompt_yes_no(question))
}

fn prompt_yes_no(question: &str) -> bool {
    print!("{} [y/N] ", question);
    if io::stdout().flush().is_err() {
        return false;
    }

    let mut answer = String::new();
    match io::stdin().lock().read_line(&mut answer) {
        Ok(_) => matches!(answer.trim().to_lowercase().as_str(), "y" | "ya" | "yes"),
        Err(_) => false,
    }
}
