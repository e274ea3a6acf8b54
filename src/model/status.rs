//! Task status: where a work item stands on its way to release.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Lifecycle stage of a work log.
///
/// Serialized in lowercase (`"development"`, `"testing"`, ...) to match
/// exported files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    /// Work is being written.
    #[default]
    Development,

    /// Under test.
    Testing,

    /// Deployed to the staging environment.
    Staging,

    /// Shipped.
    Released,
}

impl TaskStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [Self; 4] = [
        Self::Development,
        Self::Testing,
        Self::Staging,
        Self::Released,
    ];

    /// The wire name of this status.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Testing => "testing",
            Self::Staging => "staging",
            Self::Released => "released",
        }
    }

    /// Human-readable label for display.
    pub fn label(self) -> &'static str {
        match self {
            Self::Development => "in development",
            Self::Testing => "in testing",
            Self::Staging => "in staging",
            Self::Released => "released",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}
