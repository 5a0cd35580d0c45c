//! Tenant resolution and rendering pipeline.
//!
//! Host -> tenant lookup -> lifecycle gate -> content selection -> template.

pub mod content;
pub mod demo;
pub mod gateway;
pub mod host;
pub mod onboarding;
mod pipeline;
pub mod status;
pub mod template;

pub use content::{ContentSource, ResolvedContent, resolve_content};
pub use gateway::TenantGateway;
pub use host::{HostRoute, is_document_path, resolve_host, rewrite_path};
pub use pipeline::{SiteOutcome, SitePage, SitePipeline};
pub use status::{Gate, Interstitial, InterstitialKind, gate};
pub use template::{RenderedPage, TemplateDispatcher, TemplateId};
