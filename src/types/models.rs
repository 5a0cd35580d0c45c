use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{LifecycleStatus, PageDocument};

/// Renderable business content for one site.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ContentPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tagline: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub about: Option<String>,
    #[serde(default)]
    pub services: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub niche: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pages: Option<PageDocument>,
}

/// Flat top-level content fields written before content moved into
/// published/draft payloads.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LegacyFields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tagline: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub about: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub services: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
}

impl LegacyFields {
    /// True when at least one legacy field carries a value.
    #[must_use]
    pub fn is_present(&self) -> bool {
        self.business_name.is_some()
            || self.tagline.is_some()
            || self.about.is_some()
            || self.services.is_some()
            || self.color.is_some()
            || self.logo_url.is_some()
    }

    /// Builds a payload from the flat fields. The site-level niche is passed
    /// in since it was never part of the flat content.
    #[must_use]
    pub fn to_payload(&self, niche: Option<&str>) -> ContentPayload {
        ContentPayload {
            business_name: self.business_name.clone(),
            tagline: self.tagline.clone(),
            about: self.about.clone(),
            services: self.services.clone().unwrap_or_default(),
            color: self.color.clone(),
            logo_url: self.logo_url.clone(),
            niche: niche.map(str::to_string),
            pages: None,
        }
    }
}

/// A tenant site, keyed by its subdomain identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tenant {
    pub id: String,
    pub identifier: String,
    pub display_name: String,
    /// Raw template id as stored; may be missing or name a retired template.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_id: Option<String>,
    pub status: LifecycleStatus,
    pub owner_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub niche: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_content: Option<ContentPayload>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub draft_content: Option<ContentPayload>,
    #[serde(default)]
    pub legacy: LegacyFields,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub id: String,
    #[serde(skip)]
    pub token_hash: String,
    #[serde(skip)]
    pub token_lookup: String,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_used_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legacy_presence() {
        assert!(!LegacyFields::default().is_present());

        let legacy = LegacyFields {
            services: Some(Vec::new()),
            ..LegacyFields::default()
        };
        assert!(legacy.is_present());
    }

    #[test]
    fn test_legacy_to_payload_defaults_services() {
        let legacy = LegacyFields {
            business_name: Some("Corner Shop".to_string()),
            ..LegacyFields::default()
        };

        let payload = legacy.to_payload(Some("retail"));
        assert_eq!(payload.business_name.as_deref(), Some("Corner Shop"));
        assert_eq!(payload.niche.as_deref(), Some("retail"));
        assert!(payload.services.is_empty());
        assert!(payload.pages.is_none());
    }

    #[test]
    fn test_payload_accepts_sparse_json() {
        let payload: ContentPayload =
            serde_json::from_str(r#"{"business_name": "Acme"}"#).unwrap();
        assert_eq!(payload.business_name.as_deref(), Some("Acme"));
        assert!(payload.services.is_empty());
    }
}
