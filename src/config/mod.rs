//! Configuration module for the wedding planner
//!
//! This module provides configuration management including:
//! - Path resolution
//! - User settings persistence
//! - Backend (store + auth) configuration

pub mod backend;
pub mod paths;
pub mod settings;

pub use backend::BackendConfig;
pub use paths::PlannerPaths;
pub use settings::Settings;
