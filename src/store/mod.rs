mod schema;
mod sqlite;

pub use sqlite::SqliteStore;

use crate::error::Result;
use crate::types::*;

/// Read-only lookup used when resolving a request to a site.
pub trait SiteReader: Send + Sync {
    /// Looks a site up by subdomain equality. Subdomains are unique at write
    /// time, so at most one record matches.
    fn find_site_by_subdomain(&self, subdomain: &str) -> Result<Option<Tenant>>;
}

/// Store defines the database interface.
pub trait Store: SiteReader {
    fn initialize(&self) -> Result<()>;

    // Site operations
    fn create_site(&self, site: &Tenant) -> Result<()>;
    fn get_site(&self, id: &str) -> Result<Option<Tenant>>;
    fn list_sites(&self, cursor: &str, limit: i32) -> Result<Vec<Tenant>>;
    fn update_site_status(&self, id: &str, status: LifecycleStatus) -> Result<()>;
    fn update_site_draft(&self, id: &str, draft: &ContentPayload) -> Result<()>;
    /// Copies the draft payload over the published one and returns it.
    fn publish_site_draft(&self, id: &str) -> Result<ContentPayload>;
    fn delete_site(&self, id: &str) -> Result<bool>;

    // Token operations
    fn create_token(&self, token: &Token) -> Result<()>;
    fn get_token_by_lookup(&self, lookup: &str) -> Result<Option<Token>>;
    fn update_token_last_used(&self, id: &str) -> Result<()>;

    // Admin token check
    fn has_admin_token(&self) -> Result<bool>;

    fn close(&self) -> Result<()>;
}
