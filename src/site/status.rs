use serde::Serialize;

use crate::types::{LifecycleStatus, Tenant};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InterstitialKind {
    Maintenance,
    Pending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    Proceed,
    Intercept(InterstitialKind),
}

/// Decides whether a tenant may be rendered. Maintenance wins over any
/// content the tenant has; only live tenants proceed.
#[must_use]
pub fn gate(tenant: &Tenant) -> Gate {
    match tenant.status {
        LifecycleStatus::Maintenance => Gate::Intercept(InterstitialKind::Maintenance),
        LifecycleStatus::Pending | LifecycleStatus::SetupPending => {
            Gate::Intercept(InterstitialKind::Pending)
        }
        LifecycleStatus::Live => Gate::Proceed,
    }
}

/// Fixed page shown instead of a non-live site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Interstitial {
    pub kind: InterstitialKind,
    pub identifier: String,
    pub title: String,
    pub message: String,
}

impl Interstitial {
    #[must_use]
    pub fn new(kind: InterstitialKind, tenant: &Tenant) -> Self {
        let (title, message) = match kind {
            InterstitialKind::Maintenance => (
                "Under maintenance",
                "This site is being updated. Please check back soon.",
            ),
            InterstitialKind::Pending => (
                "Coming soon",
                "This site is being set up and will be live shortly.",
            ),
        };

        Self {
            kind,
            identifier: tenant.identifier.clone(),
            title: format!("{}: {title}", tenant.display_name),
            message: message.to_string(),
        }
    }
}
