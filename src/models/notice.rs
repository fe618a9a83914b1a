//! User-facing notices
//!
//! Short messages produced by commands and the app shell. Notices expire
//! after a few seconds; the presentation layer decides how to show them.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Type of notice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    /// Informational message
    Info,
    /// Success message
    Success,
    /// Warning message (e.g. a form that failed validation)
    Warning,
    /// Error message
    Error,
}

impl NoticeKind {
    /// Get the icon/prefix for this notice type
    pub fn icon(&self) -> &'static str {
        match self {
            Self::Info => "i",
            Self::Success => "+",
            Self::Warning => "!",
            Self::Error => "x",
        }
    }
}

/// A transient message for the user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notice {
    /// The message text
    pub message: String,
    /// Type of notice
    pub kind: NoticeKind,
    /// When the notice was raised
    pub created_at: DateTime<Utc>,
    /// How long the notice stays visible (in seconds)
    pub duration_secs: i64,
}

impl Notice {
    /// Create a new notice
    pub fn new(message: impl Into<String>, kind: NoticeKind) -> Self {
        Self {
            message: message.into(),
            kind,
            created_at: Utc::now(),
            duration_secs: 3,
        }
    }

    /// Create an info notice
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message, NoticeKind::Info)
    }

    /// Create a success notice
    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, NoticeKind::Success)
    }

    /// Create a warning notice
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(message, NoticeKind::Warning)
    }

    /// Create an error notice
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, NoticeKind::Error)
    }

    /// Check if the notice should no longer be shown
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now - self.created_at >= Duration::seconds(self.duration_secs)
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind.icon(), self.message)
    }
}
