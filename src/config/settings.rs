//! User settings for the wedding planner
//!
//! Holds presentation preferences and the persisted session identity.

use serde::{Deserialize, Serialize};

use super::paths::PlannerPaths;
use crate::error::PlannerError;

/// User settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// User id of the last session, reused on the next start
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_uid: Option<String>,

    /// Bootstrap credential tried when no session exists
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bootstrap_token: Option<String>,

    /// Percent used at which a category is flagged as near its limit
    #[serde(default = "default_near_limit_percent")]
    pub near_limit_percent: f64,

    /// Days ahead within which an open task counts as due soon
    #[serde(default = "default_due_soon_days")]
    pub due_soon_days: i64,
}

fn default_schema_version() -> u32 {
    1
}

fn default_near_limit_percent() -> f64 {
    90.0
}

fn default_due_soon_days() -> i64 {
    7
}

/// Longest accepted due-soon window, one year
pub const MAX_DUE_SOON_DAYS: i64 = 365;

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            session_uid: None,
            bootstrap_token: None,
            near_limit_percent: default_near_limit_percent(),
            due_soon_days: default_due_soon_days(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &PlannerPaths) -> Result<Self, PlannerError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                PlannerError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                PlannerError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            settings.validate()?;
            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Check the report thresholds are usable
    ///
    /// The near-limit percent must lie strictly between 0 and 100 so that
    /// reaching 100% still reads as over budget.
    pub fn validate(&self) -> Result<(), PlannerError> {
        let percent = self.near_limit_percent;
        if !(percent > 0.0 && percent < 100.0) {
            return Err(PlannerError::Config(format!(
                "near_limit_percent must be between 0 and 100 (exclusive), got {}",
                percent
            )));
        }
        if !(0..=MAX_DUE_SOON_DAYS).contains(&self.due_soon_days) {
            return Err(PlannerError::Config(format!(
                "due_soon_days must be between 0 and {}, got {}",
                MAX_DUE_SOON_DAYS, self.due_soon_days
            )));
        }
        Ok(())
    }

    /// Save settings to disk
    pub fn save(&self, paths: &PlannerPaths) -> Result<(), PlannerError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            PlannerError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| PlannerError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }
}
