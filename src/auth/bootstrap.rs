//! Sign-in at startup
//!
//! Order of preference: the existing session, the bootstrap token, then an
//! anonymous session. A rejected token falls back to anonymous sign-in and
//! is only reported; the planner fails to start only when anonymous
//! sign-in itself fails.

use tracing::{info, warn};

use super::provider::AuthProvider;
use crate::error::{PlannerError, PlannerResult};
use crate::models::{Notice, UserId};

/// How the user ended up signed in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignInMethod {
    ExistingSession,
    CustomToken,
    /// The bootstrap token was rejected
    AnonymousFallback,
    Anonymous,
}

impl SignInMethod {
    /// Message shown to the user
    pub fn message(&self) -> &'static str {
        match self {
            Self::ExistingSession => "Pengguna terautentikasi.",
            Self::CustomToken => "Masuk dengan token kustom.",
            Self::AnonymousFallback => "Token kustom gagal, masuk secara anonim.",
            Self::Anonymous => "Masuk secara anonim.",
        }
    }
}

/// Result of [`bootstrap`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedIn {
    pub user_id: UserId,
    pub method: SignInMethod,
}

impl SignedIn {
    pub fn notice(&self) -> Notice {
        match self.method {
            SignInMethod::AnonymousFallback => Notice::warning(self.method.message()),
            _ => Notice::info(self.method.message()),
        }
    }
}

/// Establish an identity
pub fn bootstrap(auth: &dyn AuthProvider, token: Option<&str>) -> PlannerResult<SignedIn> {
    if let Some(user_id) = auth.current_user() {
        info!(user = %user_id, "Resuming session");
        return Ok(SignedIn {
            user_id,
            method: SignInMethod::ExistingSession,
        });
    }

    let method = match token {
        Some(token) => match auth.sign_in_with_token(token) {
            Ok(user_id) => {
                return Ok(SignedIn {
                    user_id,
                    method: SignInMethod::CustomToken,
                })
            }
            Err(e) => {
                warn!("Gagal masuk dengan token kustom: {}", e);
                SignInMethod::AnonymousFallback
            }
        },
        None => SignInMethod::Anonymous,
    };

    let user_id = auth
        .sign_in_anonymously()
        .map_err(|e| PlannerError::Auth(format!("Gagal masuk secara anonim: {}", e)))?;

    Ok(SignedIn { user_id, method })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::LocalAuth;
    use crate::models::NoticeKind;
    use std::collections::BTreeMap;

    fn provider() -> LocalAuth {
        let mut tokens = BTreeMap::new();
        tokens.insert("rahasia".to_string(), "keluarga-sitompul".to_string());
        LocalAuth::new(tokens)
    }

    #[test]
    fn test_existing_session_wins() {
        let auth = provider().with_session(Some(UserId::new("u-lama")));
        let signed_in = bootstrap(&auth, Some("rahasia")).unwrap();
        assert_eq!(signed_in.method, SignInMethod::ExistingSession);
        assert_eq!(signed_in.user_id.as_str(), "u-lama");
        assert_eq!(signed_in.notice().message, "Pengguna terautentikasi.");
    }

    #[test]
    fn test_token_sign_in() {
        let signed_in = bootstrap(&provider(), Some("rahasia")).unwrap();
        assert_eq!(signed_in.method, SignInMethod::CustomToken);
        assert_eq!(signed_in.user_id.as_str(), "keluarga-sitompul");
    }

    #[test]
    fn test_bad_token_falls_back_to_anonymous() {
        let auth = provider();
        let signed_in = bootstrap(&auth, Some("salah")).unwrap();
        assert_eq!(signed_in.method, SignInMethod::AnonymousFallback);
        assert_eq!(auth.current_user(), Some(signed_in.user_id.clone()));

        let notice = signed_in.notice();
        assert_eq!(notice.kind, NoticeKind::Warning);
        assert_eq!(notice.message, "Token kustom gagal, masuk secara anonim.");
    }

    #[test]
    fn test_no_token_signs_in_anonymously() {
        let signed_in = bootstrap(&provider(), None).unwrap();
        assert_eq!(signed_in.method, SignInMethod::Anonymous);
        assert_eq!(signed_in.notice().message, "Masuk secara anonim.");
    }

    #[test]
    fn test_anonymous_failure_is_terminal() {
        let auth = provider().without_anonymous();
        let err = bootstrap(&auth, Some("salah")).unwrap_err();
        assert!(matches!(err, PlannerError::Auth(_)));
        assert!(auth.current_user().is_none());
    }
}
