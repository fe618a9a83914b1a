//! Wedding Planner - budget, checklist and vendor planning for a Batak Toba wedding
//!
//! This library provides the core of the `wedplan` application. Every piece
//! of planner data lives in a per-user namespace of a remote document
//! store and reaches the views through live subscriptions.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Paths, settings and backend configuration
//! - `error`: Custom error types
//! - `models`: Categories, budget items, tasks, vendors and money
//! - `remote`: Document store trait and its JSON-file implementation
//! - `auth`: Identity provider and the startup sign-in sequence
//! - `sync`: Live mirrors of the remote collections
//! - `services`: Validated create, update and delete commands
//! - `reports`: Budget summary, checklist and vendor directory
//! - `audit`: Audit logging system
//! - `app`: The mounted planner tying the above together
//!
//! # Example
//!
//! ```rust,ignore
//! use wedding_planner::config::{BackendConfig, PlannerPaths};
//!
//! let paths = PlannerPaths::new()?;
//! let backend = BackendConfig::load(&paths)?;
//! ```

pub mod app;
pub mod audit;
pub mod auth;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod remote;
pub mod reports;
pub mod services;
pub mod subscription;
pub mod sync;

pub use error::{PlannerError, PlannerResult};
