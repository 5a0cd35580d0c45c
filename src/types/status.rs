use std::fmt;

use serde::{Deserialize, Serialize};

/// Provisioning and availability state of a site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleStatus {
    SetupPending,
    Pending,
    Live,
    Maintenance,
}

impl LifecycleStatus {
    pub const ALL: [LifecycleStatus; 4] = [
        Self::SetupPending,
        Self::Pending,
        Self::Live,
        Self::Maintenance,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SetupPending => "setup_pending",
            Self::Pending => "pending",
            Self::Live => "live",
            Self::Maintenance => "maintenance",
        }
    }

    /// Converts a stored status string to its variant.
    pub fn parse(s: &str) -> Option<LifecycleStatus> {
        match s {
            "setup_pending" => Some(Self::SetupPending),
            "pending" => Some(Self::Pending),
            "live" => Some(Self::Live),
            "maintenance" => Some(Self::Maintenance),
            _ => None,
        }
    }
}

impl fmt::Display for LifecycleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
