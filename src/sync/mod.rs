//! Live entity sync
//!
//! Mirrors hold the latest snapshot of each remote source; [`LiveSync`]
//! keeps them subscribed for the signed-in user.

pub mod live;
pub mod mirror;

pub use live::{decode_collection, LiveSync, Mirrored, Mirrors};
pub use mirror::{Mirror, PendingWrite};
