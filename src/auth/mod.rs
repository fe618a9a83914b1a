//! Authentication
//!
//! [`AuthProvider`] is the identity collaborator, [`LocalAuth`] its local
//! implementation, and [`bootstrap`] the startup sign-in sequence.

pub mod bootstrap;
pub mod local;
pub mod provider;

pub use bootstrap::{bootstrap, SignInMethod, SignedIn};
pub use local::LocalAuth;
pub use provider::{AuthProvider, IdentityListener};
