//! Audit entry data structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::EntityKind;

/// Types of operations that can be audited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Create,
    Update,
    Delete,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Create => write!(f, "CREATE"),
            Operation::Update => write!(f, "UPDATE"),
            Operation::Delete => write!(f, "DELETE"),
        }
    }
}

/// A single accepted write
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    /// When the write was accepted (UTC)
    pub timestamp: DateTime<Utc>,

    pub operation: Operation,

    /// Which collection was written
    pub entity_type: EntityKind,

    /// Store-assigned document id
    pub entity_id: String,

    /// Short description, e.g. the task name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_name: Option<String>,

    /// Store revision of the write
    #[serde(default)]
    pub revision: u64,

    /// Document body before the write, when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<serde_json::Value>,

    /// Document body after the write
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<serde_json::Value>,

    /// Human-readable list of changed fields
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff_summary: Option<String>,
}

impl AuditEntry {
    fn new(operation: Operation, entity_type: EntityKind, entity_id: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            operation,
            entity_type,
            entity_id: entity_id.into(),
            entity_name: None,
            revision: 0,
            before: None,
            after: None,
            diff_summary: None,
        }
    }

    pub fn create<T: Serialize>(
        entity_type: EntityKind,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> Self {
        Self {
            entity_name,
            after: serde_json::to_value(entity).ok(),
            ..Self::new(Operation::Create, entity_type, entity_id)
        }
    }

    /// An update; `before` is `None` when the previous body was not at hand
    pub fn update<T: Serialize>(
        entity_type: EntityKind,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        before: Option<&T>,
        after: &T,
    ) -> Self {
        let before = before.and_then(|b| serde_json::to_value(b).ok());
        let after = serde_json::to_value(after).ok();
        let diff_summary = match (&before, &after) {
            (Some(b), Some(a)) => super::diff::generate_diff(b, a),
            _ => None,
        };

        Self {
            entity_name,
            before,
            after,
            diff_summary,
            ..Self::new(Operation::Update, entity_type, entity_id)
        }
    }

    pub fn delete<T: Serialize>(
        entity_type: EntityKind,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        before: Option<&T>,
    ) -> Self {
        Self {
            entity_name,
            before: before.and_then(|b| serde_json::to_value(b).ok()),
            ..Self::new(Operation::Delete, entity_type, entity_id)
        }
    }

    /// Attach the store revision of the write
    pub fn at_revision(mut self, revision: u64) -> Self {
        self.revision = revision;
        self
    }

    /// Format the entry for `wedplan history`
    pub fn format_human_readable(&self) -> String {
        let mut output = format!(
            "[{}] {} {} {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.operation,
            self.entity_type,
            self.entity_id
        );

        if let Some(name) = &self.entity_name {
            output.push_str(&format!(" ({})", name));
        }

        if let Some(diff) = &self.diff_summary {
            output.push_str(&format!("\n  Changes: {}", diff));
        }

        output
    }
}
