//! Template dispatch.
//!
//! Templates are a closed set. A site's stored template id is parsed at render
//! time and anything missing or unrecognised is replaced by the configured
//! default, so a stale id in the store never fails a request.

use std::fmt;

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

use super::content::{ContentSource, ResolvedContent};
use crate::error::{Error, Result};
use crate::types::{
    ContentPayload, FeatureItem, FeaturesSection, FooterSection, HeroSection, Section,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateId {
    Modern,
    Classic,
    Minimal,
    Vibrant,
    Elegant,
}

impl TemplateId {
    pub const ALL: [TemplateId; 5] = [
        Self::Modern,
        Self::Classic,
        Self::Minimal,
        Self::Vibrant,
        Self::Elegant,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Modern => "modern",
            Self::Classic => "classic",
            Self::Minimal => "minimal",
            Self::Vibrant => "vibrant",
            Self::Elegant => "elegant",
        }
    }

    pub fn parse(s: &str) -> Option<TemplateId> {
        match s.trim().to_ascii_lowercase().as_str() {
            "modern" => Some(Self::Modern),
            "classic" => Some(Self::Classic),
            "minimal" => Some(Self::Minimal),
            "vibrant" => Some(Self::Vibrant),
            "elegant" => Some(Self::Elegant),
            _ => None,
        }
    }

    fn render_fn(self) -> RenderFn {
        match self {
            Self::Modern => render_modern,
            Self::Classic => render_classic,
            Self::Minimal => render_minimal,
            Self::Vibrant => render_vibrant,
            Self::Elegant => render_elegant,
        }
    }

    const fn accent_color(self) -> &'static str {
        match self {
            Self::Modern => "#2563eb",
            Self::Classic => "#1f2937",
            Self::Minimal => "#111111",
            Self::Vibrant => "#f97316",
            Self::Elegant => "#9d174d",
        }
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Theme {
    pub accent_color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
}

/// Output of a template: the section tree handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedPage {
    pub template: TemplateId,
    pub source: ContentSource,
    pub effective_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub theme: Theme,
    pub sections: Vec<Section>,
}

type RenderFn = fn(&ResolvedContent) -> Vec<Section>;

#[derive(Debug, Clone, Copy)]
pub struct TemplateDispatcher {
    default: TemplateId,
}

impl TemplateDispatcher {
    #[must_use]
    pub fn new(default: TemplateId) -> Self {
        Self { default }
    }

    /// Builds a dispatcher from a configured default template name.
    pub fn from_config(default: &str) -> Result<Self> {
        TemplateId::parse(default)
            .map(Self::new)
            .ok_or_else(|| Error::Config(format!("unknown default template '{default}'")))
    }

    /// Maps a stored template id to a template, substituting the default.
    #[must_use]
    pub fn select(&self, template_id: Option<&str>) -> TemplateId {
        match template_id.and_then(TemplateId::parse) {
            Some(template) => template,
            None => {
                debug!(
                    requested = template_id.unwrap_or("<none>"),
                    fallback = %self.default,
                    "Using default template"
                );
                self.default
            }
        }
    }

    #[must_use]
    pub fn dispatch(&self, template_id: Option<&str>, content: &ResolvedContent) -> RenderedPage {
        let template = self.select(template_id);
        let render = template.render_fn();

        RenderedPage {
            template,
            source: content.source,
            effective_path: content.effective_path.clone(),
            title: content.payload.business_name.clone(),
            theme: Theme {
                accent_color: content
                    .payload
                    .color
                    .clone()
                    .unwrap_or_else(|| template.accent_color().to_string()),
                logo_url: content.payload.logo_url.clone(),
            },
            sections: render(content),
        }
    }
}

impl Default for TemplateDispatcher {
    fn default() -> Self {
        Self::new(TemplateId::Modern)
    }
}

// Each template lays out the flat payload in its own order. Sections from a
// page document are rendered as given.

fn render_modern(content: &ResolvedContent) -> Vec<Section> {
    if let Some(sections) = &content.sections {
        return sections.clone();
    }
    let p = &content.payload;
    collect([
        Some(hero(p, Some("Get in touch"))),
        services(p, Some("What we do")),
        about(p),
        Some(footer(p)),
    ])
}

fn render_classic(content: &ResolvedContent) -> Vec<Section> {
    if let Some(sections) = &content.sections {
        return sections.clone();
    }
    let p = &content.payload;
    collect([
        Some(hero(p, None)),
        about(p),
        services(p, Some("Our services")),
        Some(footer(p)),
    ])
}

fn render_minimal(content: &ResolvedContent) -> Vec<Section> {
    if let Some(sections) = &content.sections {
        return sections.clone();
    }
    let p = &content.payload;
    collect([Some(hero(p, None)), about(p), services(p, None), Some(footer(p))])
}

fn render_vibrant(content: &ResolvedContent) -> Vec<Section> {
    if let Some(sections) = &content.sections {
        return sections.clone();
    }
    let p = &content.payload;
    collect([
        Some(hero(p, Some("Order now"))),
        services(p, Some("On the menu")),
        about(p),
        Some(footer(p)),
    ])
}

fn render_elegant(content: &ResolvedContent) -> Vec<Section> {
    if let Some(sections) = &content.sections {
        return sections.clone();
    }
    let p = &content.payload;
    collect([
        Some(hero(p, Some("Discover"))),
        about(p),
        services(p, Some("Collections")),
        Some(footer(p)),
    ])
}

fn collect<const N: usize>(sections: [Option<Section>; N]) -> Vec<Section> {
    sections.into_iter().flatten().collect()
}

fn hero(payload: &ContentPayload, cta_label: Option<&str>) -> Section {
    Section::Hero(HeroSection {
        title: payload
            .business_name
            .clone()
            .unwrap_or_else(|| "Welcome".to_string()),
        subtitle: payload.tagline.clone(),
        image_url: payload.logo_url.clone(),
        cta_label: cta_label.map(str::to_string),
        cta_href: cta_label.map(|_| "#contact".to_string()),
    })
}

fn services(payload: &ContentPayload, title: Option<&str>) -> Option<Section> {
    if payload.services.is_empty() {
        return None;
    }
    Some(Section::Features(FeaturesSection {
        title: title.map(str::to_string),
        items: payload
            .services
            .iter()
            .map(|service| FeatureItem {
                title: service.clone(),
                description: None,
            })
            .collect(),
    }))
}

fn about(payload: &ContentPayload) -> Option<Section> {
    let text = payload.about.as_ref()?;
    let mut fields = Map::new();
    fields.insert("title".to_string(), Value::String("About".to_string()));
    fields.insert("text".to_string(), Value::String(text.clone()));
    Some(Section::Custom {
        kind: "about".to_string(),
        fields,
    })
}

fn footer(payload: &ContentPayload) -> Section {
    Section::Footer(FooterSection {
        text: payload.business_name.clone(),
        links: Vec::new(),
    })
}
