//! Built-in demo sites that resolve without touching the store.

use chrono::{DateTime, Utc};

use crate::types::{
    ContentPayload, FeatureItem, FeaturesSection, FooterLink, FooterSection, HOME_PAGE,
    HeroSection, LegacyFields, LifecycleStatus, PageDocument, Section, Tenant,
};

pub const DEMO_IDENTIFIERS: &[&str] = &["demosite", "demo"];

const DEMO_OWNER: &str = "webownr-demo";
// 2024-01-01T00:00:00Z
const DEMO_CREATED_AT: i64 = 1_704_067_200;

#[must_use]
pub fn is_demo(identifier: &str) -> bool {
    DEMO_IDENTIFIERS.contains(&identifier)
}

/// Returns the synthetic tenant for a demo identifier.
#[must_use]
pub fn demo_tenant(identifier: &str) -> Option<Tenant> {
    if !is_demo(identifier) {
        return None;
    }

    let created_at = DateTime::<Utc>::from_timestamp(DEMO_CREATED_AT, 0).unwrap_or_default();

    Some(Tenant {
        id: format!("demo-{identifier}"),
        identifier: identifier.to_string(),
        display_name: "WebOwnr Demo".to_string(),
        template_id: None,
        status: LifecycleStatus::Live,
        owner_id: DEMO_OWNER.to_string(),
        plan: None,
        niche: None,
        published_content: Some(demo_content()),
        draft_content: None,
        legacy: LegacyFields::default(),
        created_at,
        updated_at: created_at,
    })
}

fn demo_content() -> ContentPayload {
    let home = vec![
        Section::Hero(HeroSection {
            title: "Welcome to WebOwnr".to_string(),
            subtitle: Some("Your business online in minutes".to_string()),
            image_url: None,
            cta_label: Some("Get started".to_string()),
            cta_href: Some("/about".to_string()),
        }),
        Section::Features(FeaturesSection {
            title: Some("Why WebOwnr".to_string()),
            items: vec![
                feature("Fast setup", "Pick a template and go live the same day"),
                feature("Your own subdomain", "Every site gets a memorable address"),
                feature("Social ready", "Share updates wherever your customers are"),
            ],
        }),
        footer(),
    ];

    let about = vec![
        Section::Hero(HeroSection {
            title: "About this demo".to_string(),
            subtitle: Some("A sample site served without any stored data".to_string()),
            ..HeroSection::default()
        }),
        footer(),
    ];

    ContentPayload {
        business_name: Some("WebOwnr Demo".to_string()),
        tagline: Some("Your business online in minutes".to_string()),
        pages: Some(
            PageDocument::new()
                .with_page(HOME_PAGE, home)
                .with_page("about", about),
        ),
        ..ContentPayload::default()
    }
}

fn feature(title: &str, description: &str) -> FeatureItem {
    FeatureItem {
        title: title.to_string(),
        description: Some(description.to_string()),
    }
}

fn footer() -> Section {
    Section::Footer(FooterSection {
        text: Some("Built with WebOwnr".to_string()),
        links: vec![FooterLink {
            label: "Home".to_string(),
            href: "/".to_string(),
        }],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_tenant_is_live_without_template() {
        let tenant = demo_tenant("demosite").unwrap();
        assert_eq!(tenant.status, LifecycleStatus::Live);
        assert!(tenant.template_id.is_none());

        let pages = tenant.published_content.unwrap().pages.unwrap();
        let kinds: Vec<_> = pages.page(HOME_PAGE).unwrap().iter().map(Section::kind).collect();
        assert_eq!(kinds, vec!["hero", "features", "footer"]);
    }

    #[test]
    fn test_demo_tenant_is_stable() {
        assert_eq!(demo_tenant("demo"), demo_tenant("demo"));
        assert!(demo_tenant("acme").is_none());
    }
}
