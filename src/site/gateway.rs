use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use super::demo;
use crate::store::SiteReader;
use crate::types::Tenant;

/// Read path from an identifier to a tenant record.
///
/// Performs at most one store query per call. Store failures and timeouts are
/// reported as "not found" so a broken store degrades to a 404 for the one
/// request instead of an error page.
#[derive(Clone)]
pub struct TenantGateway {
    reader: Arc<dyn SiteReader>,
    timeout: Duration,
}

impl TenantGateway {
    pub fn new(reader: Arc<dyn SiteReader>, timeout: Duration) -> Self {
        Self { reader, timeout }
    }

    pub async fn resolve_tenant(&self, identifier: &str) -> Option<Tenant> {
        if let Some(tenant) = demo::demo_tenant(identifier) {
            debug!(identifier, "Resolved demo site");
            return Some(tenant);
        }

        let reader = Arc::clone(&self.reader);
        let key = identifier.to_string();
        let lookup = tokio::task::spawn_blocking(move || reader.find_site_by_subdomain(&key));

        match tokio::time::timeout(self.timeout, lookup).await {
            Ok(Ok(Ok(tenant))) => tenant,
            Ok(Ok(Err(e))) => {
                warn!(identifier, "Site lookup failed: {e}");
                None
            }
            Ok(Err(e)) => {
                warn!(identifier, "Site lookup task failed: {e}");
                None
            }
            Err(_) => {
                warn!(
                    identifier,
                    "Site lookup timed out after {}ms",
                    self.timeout.as_millis()
                );
                None
            }
        }
    }
}
