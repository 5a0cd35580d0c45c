use serde::Serialize;
use tracing::debug;

use super::content::resolve_content;
use super::gateway::TenantGateway;
use super::status::{Gate, Interstitial, gate};
use super::template::{RenderedPage, TemplateDispatcher};
use crate::types::Tenant;

/// A rendered page together with the site it belongs to.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SitePage {
    pub identifier: String,
    pub display_name: String,
    #[serde(flatten)]
    pub page: RenderedPage,
}

/// Result of resolving a request for a site.
///
/// Only `NotFound` needs special handling by the caller. Unknown templates and
/// missing content are absorbed inside the pipeline.
#[derive(Debug, Clone, PartialEq)]
pub enum SiteOutcome {
    NotFound,
    Intercepted(Interstitial),
    Rendered(SitePage),
}

#[derive(Clone)]
pub struct SitePipeline {
    gateway: TenantGateway,
    dispatcher: TemplateDispatcher,
}

impl SitePipeline {
    pub fn new(gateway: TenantGateway, dispatcher: TemplateDispatcher) -> Self {
        Self {
            gateway,
            dispatcher,
        }
    }

    pub async fn render(&self, identifier: &str, path: &str) -> SiteOutcome {
        let Some(tenant) = self.gateway.resolve_tenant(identifier).await else {
            debug!(identifier, "Site not found");
            return SiteOutcome::NotFound;
        };

        self.render_tenant(&tenant, path)
    }

    /// Runs the stages after lookup. The status gate comes first so an
    /// intercepted site never reaches a template.
    #[must_use]
    pub fn render_tenant(&self, tenant: &Tenant, path: &str) -> SiteOutcome {
        if let Gate::Intercept(kind) = gate(tenant) {
            debug!(
                identifier = %tenant.identifier,
                status = %tenant.status,
                "Site intercepted"
            );
            return SiteOutcome::Intercepted(Interstitial::new(kind, tenant));
        }

        let content = resolve_content(tenant, path);
        let page = self
            .dispatcher
            .dispatch(tenant.template_id.as_deref(), &content);

        debug!(
            identifier = %tenant.identifier,
            path = %page.effective_path,
            template = %page.template,
            "Rendered site"
        );

        SiteOutcome::Rendered(SitePage {
            identifier: tenant.identifier.clone(),
            display_name: tenant.display_name.clone(),
            page,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use chrono::Utc;

    use super::*;
    use crate::error::Result;
    use crate::site::content::ContentSource;
    use crate::site::status::InterstitialKind;
    use crate::site::template::TemplateId;
    use crate::store::{SiteReader, SqliteStore, Store};
    use crate::types::{ContentPayload, LegacyFields, LifecycleStatus, Section};

    #[derive(Default)]
    struct CountingReader {
        calls: AtomicUsize,
    }

    impl SiteReader for CountingReader {
        fn find_site_by_subdomain(&self, _subdomain: &str) -> Result<Option<Tenant>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(None)
        }
    }

    fn site(identifier: &str, status: LifecycleStatus) -> Tenant {
        Tenant {
            id: format!("site-{identifier}"),
            identifier: identifier.to_string(),
            display_name: "Acme".to_string(),
            template_id: Some("classic".to_string()),
            status,
            owner_id: "owner-1".to_string(),
            plan: None,
            niche: None,
            published_content: Some(ContentPayload {
                business_name: Some("Acme Published".to_string()),
                ..ContentPayload::default()
            }),
            draft_content: None,
            legacy: LegacyFields::default(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn pipeline_with(reader: Arc<dyn SiteReader>) -> SitePipeline {
        SitePipeline::new(
            TenantGateway::new(reader, Duration::from_secs(1)),
            TemplateDispatcher::new(TemplateId::Modern),
        )
    }

    fn sqlite_pipeline(sites: &[Tenant]) -> SitePipeline {
        let store = SqliteStore::open_in_memory().unwrap();
        store.initialize().unwrap();
        for s in sites {
            store.create_site(s).unwrap();
        }
        pipeline_with(Arc::new(store))
    }

    #[tokio::test]
    async fn test_demo_site_end_to_end() {
        let reader = Arc::new(CountingReader::default());
        let pipeline = pipeline_with(reader.clone());

        let SiteOutcome::Rendered(site_page) = pipeline.render("demosite", "/").await else {
            panic!("demo site should render");
        };

        assert_eq!(reader.calls.load(Ordering::SeqCst), 0);
        assert_eq!(site_page.page.template, TemplateId::Modern);
        assert_eq!(site_page.page.effective_path, "home");
        let kinds: Vec<_> = site_page.page.sections.iter().map(Section::kind).collect();
        assert_eq!(kinds, vec!["hero", "features", "footer"]);
    }

    #[tokio::test]
    async fn test_missing_site_is_not_found() {
        let pipeline = sqlite_pipeline(&[]);
        let outcome = pipeline.render("ghost", "/").await;

        assert_eq!(outcome, SiteOutcome::NotFound);
        assert!(!matches!(outcome, SiteOutcome::Intercepted(_)));
    }

    #[tokio::test]
    async fn test_live_site_renders_with_its_template() {
        let pipeline = sqlite_pipeline(&[site("acme", LifecycleStatus::Live)]);

        let SiteOutcome::Rendered(site_page) = pipeline.render("acme", "/").await else {
            panic!("live site should render");
        };
        assert_eq!(site_page.identifier, "acme");
        assert_eq!(site_page.page.template, TemplateId::Classic);
        assert_eq!(site_page.page.source, ContentSource::Published);
        assert_eq!(site_page.page.title.as_deref(), Some("Acme Published"));
    }

    #[tokio::test]
    async fn test_non_live_sites_are_intercepted() {
        let pipeline = sqlite_pipeline(&[
            site("fixing", LifecycleStatus::Maintenance),
            site("soon", LifecycleStatus::SetupPending),
        ]);

        match pipeline.render("fixing", "/").await {
            SiteOutcome::Intercepted(page) => {
                assert_eq!(page.kind, InterstitialKind::Maintenance);
            }
            other => panic!("expected maintenance interstitial, got {other:?}"),
        }
        match pipeline.render("soon", "/about").await {
            SiteOutcome::Intercepted(page) => assert_eq!(page.kind, InterstitialKind::Pending),
            other => panic!("expected pending interstitial, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_template_falls_back() {
        let pipeline = pipeline_with(Arc::new(CountingReader::default()));
        let mut tenant = site("acme", LifecycleStatus::Live);
        tenant.template_id = Some("not-a-real-template".to_string());

        let SiteOutcome::Rendered(site_page) = pipeline.render_tenant(&tenant, "/") else {
            panic!("site should render");
        };
        assert_eq!(site_page.page.template, TemplateId::Modern);
    }
}
