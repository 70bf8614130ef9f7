//! Transient notification banner model.
//!
//! # Responsibility
//! - Describe one user-facing banner message and its severity.
//!
//! # Invariants
//! - At most one notification is visible at a time; the presenter enforces
//!   the discard-previous rule, not this type.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for one presented notification.
pub type NotificationId = Uuid;

/// Severity tag controlling banner styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Success,
    Error,
}

impl Severity {
    /// Stable lowercase tag used in the banner class name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Error => "error",
        }
    }

    /// Modifier class applied to the banner node.
    pub fn banner_class(self) -> String {
        format!("notification notification--{}", self.as_str())
    }
}

/// One transient banner message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: NotificationId,
    pub message: String,
    pub severity: Severity,
}

impl Notification {
    /// Creates a notification with a generated stable id.
    pub fn new(message: impl Into<String>, severity: Severity) -> Self {
        Self {
            id: Uuid::new_v4(),
            message: message.into(),
            severity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Notification, Severity};

    #[test]
    fn banner_class_carries_severity_modifier() {
        assert_eq!(
            Severity::Success.banner_class(),
            "notification notification--success"
        );
        assert_eq!(Severity::Info.as_str(), "info");
    }

    #[test]
    fn new_notifications_get_distinct_ids() {
        let first = Notification::new("one", Severity::Info);
        let second = Notification::new("two", Severity::Error);
        assert_ne!(first.id, second.id);
    }
}
