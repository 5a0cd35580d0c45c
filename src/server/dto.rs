use serde::Deserialize;

use crate::types::{ContentPayload, LegacyFields};

#[derive(Debug, Deserialize)]
pub struct CreateSiteRequest {
    pub subdomain: String,
    pub display_name: String,
    pub owner_id: String,
    #[serde(default)]
    pub plan: Option<String>,
    #[serde(default)]
    pub niche: Option<String>,
    /// Honoured only on plans that allow choosing a template.
    #[serde(default)]
    pub template: Option<String>,
    #[serde(default)]
    pub draft_content: Option<ContentPayload>,
    #[serde(default)]
    pub legacy: Option<LegacyFields>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct PaginationParams {
    #[serde(default)]
    pub cursor: Option<String>,
}
