//! Selects which content a tenant renders.
//!
//! A tenant can carry up to three content shapes at once: a published
//! payload, a draft payload and flat legacy fields. They are candidates, not
//! layers. Exactly one whole payload is picked, in the order published,
//! draft, legacy, falling back to an empty payload, so fields from different
//! shapes are never mixed on one page.

use serde::Serialize;

use crate::types::{ContentPayload, HOME_PAGE, Section, Tenant};

/// Which content shape a payload was taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentSource {
    Published,
    Draft,
    Legacy,
    Empty,
}

/// The content shape chosen for a tenant, carrying its payload.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentCandidate {
    Published(ContentPayload),
    Draft(ContentPayload),
    Legacy(ContentPayload),
    Empty,
}

impl ContentCandidate {
    #[must_use]
    pub fn source(&self) -> ContentSource {
        match self {
            ContentCandidate::Published(_) => ContentSource::Published,
            ContentCandidate::Draft(_) => ContentSource::Draft,
            ContentCandidate::Legacy(_) => ContentSource::Legacy,
            ContentCandidate::Empty => ContentSource::Empty,
        }
    }

    #[must_use]
    pub fn into_payload(self) -> ContentPayload {
        match self {
            ContentCandidate::Published(payload)
            | ContentCandidate::Draft(payload)
            | ContentCandidate::Legacy(payload) => payload,
            ContentCandidate::Empty => ContentPayload::default(),
        }
    }
}

/// Content resolved for one request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedContent {
    pub source: ContentSource,
    /// The selected payload, with its page document moved into `sections`.
    pub payload: ContentPayload,
    /// Sections of the selected page, or `None` when the payload has no page
    /// document and is rendered from its flat fields.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sections: Option<Vec<Section>>,
    /// The page that was actually selected.
    pub effective_path: String,
}

/// Picks the single content candidate for a tenant.
#[must_use]
pub fn select_candidate(tenant: &Tenant) -> ContentCandidate {
    if let Some(published) = &tenant.published_content {
        return ContentCandidate::Published(published.clone());
    }
    if let Some(draft) = &tenant.draft_content {
        return ContentCandidate::Draft(draft.clone());
    }
    if tenant.legacy.is_present() {
        return ContentCandidate::Legacy(tenant.legacy.to_payload(tenant.niche.as_deref()));
    }
    ContentCandidate::Empty
}

/// Resolves the payload and page for a request. Total: a tenant with no
/// content still yields an empty payload.
#[must_use]
pub fn resolve_content(tenant: &Tenant, requested_path: &str) -> ResolvedContent {
    let candidate = select_candidate(tenant);
    let source = candidate.source();
    let mut payload = candidate.into_payload();

    let requested = normalize_page_path(requested_path);

    let (sections, effective_path) = match payload.pages.take() {
        Some(pages) => match pages.page(requested) {
            Some(sections) => (Some(sections.to_vec()), requested.to_string()),
            None => (
                Some(pages.page(HOME_PAGE).map(<[Section]>::to_vec).unwrap_or_default()),
                HOME_PAGE.to_string(),
            ),
        },
        None => (None, HOME_PAGE.to_string()),
    };

    ResolvedContent {
        source,
        payload,
        sections,
        effective_path,
    }
}

/// Normalizes a request path into a page key: "/about/" -> "about",
/// "" and "/" -> "home".
#[must_use]
pub fn normalize_page_path(path: &str) -> &str {
    let trimmed = path.trim().trim_matches('/');
    if trimmed.is_empty() {
        HOME_PAGE
    } else {
        trimmed
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::types::{
        FooterSection, HeroSection, LegacyFields, LifecycleStatus, PageDocument,
    };

    fn tenant() -> Tenant {
        Tenant {
            id: "site-1".to_string(),
            identifier: "acme".to_string(),
            display_name: "Acme".to_string(),
            template_id: None,
            status: LifecycleStatus::Live,
            owner_id: "owner-1".to_string(),
            plan: None,
            niche: Some("retail".to_string()),
            published_content: None,
            draft_content: None,
            legacy: LegacyFields::default(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn named(name: &str) -> ContentPayload {
        ContentPayload {
            business_name: Some(name.to_string()),
            ..ContentPayload::default()
        }
    }

    fn hero(title: &str) -> Section {
        Section::Hero(HeroSection {
            title: title.to_string(),
            ..HeroSection::default()
        })
    }

    #[test]
    fn test_published_wins_over_draft() {
        let mut site = tenant();
        site.published_content = Some(named("A"));
        site.draft_content = Some(named("B"));
        site.legacy.business_name = Some("C".to_string());

        let resolved = resolve_content(&site, "home");
        assert_eq!(resolved.source, ContentSource::Published);
        assert_eq!(resolved.payload, named("A"));
    }

    #[test]
    fn test_draft_used_without_published() {
        let mut site = tenant();
        site.draft_content = Some(named("B"));
        site.legacy.business_name = Some("C".to_string());

        let resolved = resolve_content(&site, "home");
        assert_eq!(resolved.source, ContentSource::Draft);
        assert_eq!(resolved.payload.business_name.as_deref(), Some("B"));
    }

    #[test]
    fn test_legacy_fields_are_last_resort() {
        let mut site = tenant();
        site.legacy.business_name = Some("C".to_string());

        let resolved = resolve_content(&site, "home");
        assert_eq!(resolved.source, ContentSource::Legacy);
        assert_eq!(resolved.payload.business_name.as_deref(), Some("C"));
        assert_eq!(resolved.payload.niche.as_deref(), Some("retail"));
        assert!(resolved.sections.is_none());
    }

    #[test]
    fn test_payloads_are_never_merged() {
        let mut site = tenant();
        site.published_content = Some(ContentPayload {
            tagline: Some("Published tagline".to_string()),
            ..ContentPayload::default()
        });
        site.draft_content = Some(named("Draft name"));

        let resolved = resolve_content(&site, "home");
        assert_eq!(resolved.payload.business_name, None);
        assert_eq!(resolved.payload.tagline.as_deref(), Some("Published tagline"));
    }

    #[test]
    fn test_no_content_yields_empty_payload() {
        let resolved = resolve_content(&tenant(), "anything");
        assert_eq!(resolved.source, ContentSource::Empty);
        assert_eq!(resolved.payload, ContentPayload::default());
        assert_eq!(resolved.effective_path, "home");
    }

    #[test]
    fn test_page_selection_and_fallback() {
        let mut site = tenant();
        site.published_content = Some(ContentPayload {
            pages: Some(
                PageDocument::new()
                    .with_page("home", vec![hero("Home")])
                    .with_page("about", vec![hero("About")]),
            ),
            ..named("A")
        });

        let about = resolve_content(&site, "/about/");
        assert_eq!(about.effective_path, "about");
        assert_eq!(about.sections, Some(vec![hero("About")]));
        assert!(about.payload.pages.is_none());

        let missing = resolve_content(&site, "nonexistent-page");
        assert_eq!(missing, resolve_content(&site, "home"));
        assert_eq!(missing.effective_path, "home");

        assert_eq!(resolve_content(&site, "/"), resolve_content(&site, "home"));
    }

    #[test]
    fn test_missing_home_page_gives_empty_sections() {
        let mut site = tenant();
        site.published_content = Some(ContentPayload {
            pages: Some(PageDocument::new().with_page(
                "contact",
                vec![Section::Footer(FooterSection::default())],
            )),
            ..ContentPayload::default()
        });

        let resolved = resolve_content(&site, "pricing");
        assert_eq!(resolved.sections, Some(Vec::new()));
        assert_eq!(resolved.effective_path, "home");
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let mut site = tenant();
        site.draft_content = Some(ContentPayload {
            services: vec!["Delivery".to_string(), "Catering".to_string()],
            pages: Some(PageDocument::new().with_page("home", vec![hero("Hi")])),
            ..named("B")
        });

        let first = serde_json::to_vec(&resolve_content(&site, "home")).unwrap();
        let second = serde_json::to_vec(&resolve_content(&site, "home")).unwrap();
        assert_eq!(first, second);
    }
}
