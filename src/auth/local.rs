//! Local auth provider
//!
//! Accepts the custom tokens listed in the backend configuration and mints
//! a fresh random user id for anonymous sign-in.

use std::collections::BTreeMap;
use std::sync::RwLock;

use tracing::{debug, info};
use uuid::Uuid;

use super::provider::{AuthProvider, IdentityListener};
use crate::config::BackendConfig;
use crate::error::{PlannerError, PlannerResult};
use crate::models::UserId;
use crate::subscription::{ListenerSet, Subscription};

/// Auth provider backed by the backend configuration
pub struct LocalAuth {
    tokens: BTreeMap<String, String>,
    anonymous_sign_in: bool,
    current: RwLock<Option<UserId>>,
    listeners: ListenerSet<Option<UserId>>,
}

impl LocalAuth {
    /// Create a provider accepting `tokens` (token -> user id)
    pub fn new(tokens: BTreeMap<String, String>) -> Self {
        Self {
            tokens,
            anonymous_sign_in: true,
            current: RwLock::new(None),
            listeners: ListenerSet::new(),
        }
    }

    /// Create a provider from the backend configuration
    pub fn from_backend(config: &BackendConfig) -> Self {
        let mut auth = Self::new(config.tokens.clone());
        auth.anonymous_sign_in = config.anonymous_sign_in;
        auth
    }

    /// Resume a previously persisted session
    pub fn with_session(self, user: Option<UserId>) -> Self {
        if let Ok(mut current) = self.current.write() {
            *current = user;
        }
        self
    }

    /// Refuse anonymous sign-in
    pub fn without_anonymous(mut self) -> Self {
        self.anonymous_sign_in = false;
        self
    }

    fn switch_to(&self, user: Option<UserId>) -> PlannerResult<()> {
        let changed = {
            let mut current = self.current.write().map_err(|e| {
                PlannerError::Auth(format!("Failed to acquire write lock: {}", e))
            })?;
            let changed = *current != user;
            *current = user.clone();
            changed
        };

        if changed {
            debug!(user = ?user, "Identity changed");
            self.listeners.notify(&user);
        }
        Ok(())
    }
}

impl AuthProvider for LocalAuth {
    fn current_user(&self) -> Option<UserId> {
        self.current.read().ok().and_then(|current| current.clone())
    }

    fn sign_in_anonymously(&self) -> PlannerResult<UserId> {
        if !self.anonymous_sign_in {
            return Err(PlannerError::Auth(
                "anonymous sign-in is disabled for this backend".into(),
            ));
        }

        let user = UserId::new(Uuid::new_v4().to_string());
        self.switch_to(Some(user.clone()))?;
        info!(user = %user, "Signed in anonymously");
        Ok(user)
    }

    fn sign_in_with_token(&self, token: &str) -> PlannerResult<UserId> {
        let user = self
            .tokens
            .get(token)
            .map(|uid| UserId::new(uid.clone()))
            .ok_or_else(|| PlannerError::Auth("invalid custom token".into()))?;

        self.switch_to(Some(user.clone()))?;
        info!(user = %user, "Signed in with custom token");
        Ok(user)
    }

    fn sign_out(&self) -> PlannerResult<()> {
        self.switch_to(None)
    }

    fn on_identity_changed(&self, listener: IdentityListener) -> Subscription {
        self.listeners.add(listener)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn provider() -> LocalAuth {
        let mut tokens = BTreeMap::new();
        tokens.insert("token-keluarga".to_string(), "keluarga-sitompul".to_string());
        LocalAuth::new(tokens)
    }

    #[test]
    fn test_anonymous_users_are_distinct() {
        let auth = provider();
        let first = auth.sign_in_anonymously().unwrap();
        let second = auth.sign_in_anonymously().unwrap();
        assert_ne!(first, second);
        assert_eq!(auth.current_user(), Some(second));
    }

    #[test]
    fn test_known_token_maps_to_user() {
        let auth = provider();
        let user = auth.sign_in_with_token("token-keluarga").unwrap();
        assert_eq!(user.as_str(), "keluarga-sitompul");
    }

    #[test]
    fn test_unknown_token_leaves_identity_unchanged() {
        let auth = provider();
        assert!(matches!(
            auth.sign_in_with_token("nope"),
            Err(PlannerError::Auth(_))
        ));
        assert_eq!(auth.current_user(), None);
    }

    #[test]
    fn test_listeners_see_sign_in_and_sign_out() {
        let auth = provider();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let _sub = auth.on_identity_changed(Box::new(move |user: &Option<UserId>| {
            sink.lock().unwrap().push(user.clone());
        }));

        auth.sign_in_with_token("token-keluarga").unwrap();
        // Same user again is not a change
        auth.sign_in_with_token("token-keluarga").unwrap();
        auth.sign_out().unwrap();

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0], Some(UserId::new("keluarga-sitompul")));
        assert_eq!(seen[1], None);
    }

    #[test]
    fn test_resumed_session() {
        let auth = provider().with_session(Some(UserId::new("u-lama")));
        assert_eq!(auth.current_user(), Some(UserId::new("u-lama")));
    }

    #[test]
    fn test_anonymous_can_be_disabled() {
        let auth = provider().without_anonymous();
        assert!(auth.sign_in_anonymously().is_err());
    }
}
