//! Authentication collaborator

use crate::error::PlannerResult;
use crate::models::UserId;
use crate::subscription::Subscription;

/// Receives the new identity (`None` after sign-out)
pub type IdentityListener = Box<dyn Fn(&Option<UserId>) + Send + Sync>;

/// Identity provider
///
/// Implementations notify identity listeners after every sign-in or
/// sign-out that changes the current user.
pub trait AuthProvider: Send + Sync {
    /// The signed-in user, if any
    fn current_user(&self) -> Option<UserId>;

    fn sign_in_anonymously(&self) -> PlannerResult<UserId>;

    fn sign_in_with_token(&self, token: &str) -> PlannerResult<UserId>;

    fn sign_out(&self) -> PlannerResult<()>;

    fn on_identity_changed(&self, listener: IdentityListener) -> Subscription;
}
