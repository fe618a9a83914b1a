//! Backend configuration
//!
//! Names the application namespace in the document store and the custom
//! tokens the local auth provider accepts. Without it the planner cannot
//! connect to anything, so a missing file is an initialization failure.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::paths::PlannerPaths;
use crate::error::PlannerError;

/// Message shown when no backend configuration can be found
pub const MISSING_BACKEND_MESSAGE: &str =
    "Konfigurasi backend tidak tersedia. Tidak dapat terhubung ke database.";

/// Connection settings for the document store and auth provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Application id; every document path starts with `artifacts/{app_id}`
    pub app_id: String,

    /// Custom tokens accepted for sign-in, mapped to the user id they grant
    #[serde(default)]
    pub tokens: BTreeMap<String, String>,

    /// Whether the auth provider accepts anonymous sign-in
    #[serde(default = "default_anonymous_sign_in")]
    pub anonymous_sign_in: bool,
}

fn default_anonymous_sign_in() -> bool {
    true
}

impl BackendConfig {
    /// Create a configuration for the given application id
    pub fn new(app_id: impl Into<String>) -> Self {
        Self {
            app_id: app_id.into(),
            tokens: BTreeMap::new(),
            anonymous_sign_in: true,
        }
    }

    /// Load the backend configuration
    ///
    /// # Errors
    ///
    /// Returns [`PlannerError::Initialization`] if the file is missing,
    /// unreadable, or names an empty application id.
    pub fn load(paths: &PlannerPaths) -> Result<Self, PlannerError> {
        let path = paths.backend_file();
        if !path.exists() {
            return Err(PlannerError::Initialization(MISSING_BACKEND_MESSAGE.into()));
        }

        let contents = std::fs::read_to_string(&path).map_err(|e| {
            PlannerError::Initialization(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let config: BackendConfig = serde_json::from_str(&contents).map_err(|e| {
            PlannerError::Initialization(format!("Failed to parse {}: {}", path.display(), e))
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Save the backend configuration
    pub fn save(&self, paths: &PlannerPaths) -> Result<(), PlannerError> {
        self.validate()?;
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(paths.backend_file(), contents)
            .map_err(|e| PlannerError::Io(format!("Failed to write backend config: {}", e)))?;
        Ok(())
    }

    fn validate(&self) -> Result<(), PlannerError> {
        if self.app_id.trim().is_empty() {
            return Err(PlannerError::Initialization(
                "Backend config has an empty app_id".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_config_is_initialization_error() {
        let temp_dir = TempDir::new().unwrap();
        let paths = PlannerPaths::with_base_dir(temp_dir.path().to_path_buf());

        let err = BackendConfig::load(&paths).unwrap_err();
        assert!(err.is_fatal());
        assert!(err.to_string().contains(MISSING_BACKEND_MESSAGE));
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = PlannerPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut config = BackendConfig::new("horja-2025");
        config.tokens.insert("secret".into(), "keluarga-sitompul".into());
        config.save(&paths).unwrap();

        assert_eq!(BackendConfig::load(&paths).unwrap(), config);
    }

    #[test]
    fn test_empty_app_id_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let paths = PlannerPaths::with_base_dir(temp_dir.path().to_path_buf());
        paths.ensure_directories().unwrap();
        std::fs::write(paths.backend_file(), r#"{"app_id": "  "}"#).unwrap();

        assert!(matches!(
            BackendConfig::load(&paths),
            Err(PlannerError::Initialization(_))
        ));
    }
}
