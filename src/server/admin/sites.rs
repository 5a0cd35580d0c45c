use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::auth::RequireAdmin;
use crate::server::AppState;
use crate::server::dto::{CreateSiteRequest, PaginationParams, UpdateStatusRequest};
use crate::server::response::{
    ApiError, ApiResponse, DEFAULT_PAGE_SIZE, PaginatedResponse, StoreOptionExt, StoreResultExt,
    paginate,
};
use crate::site::onboarding::{assign_template, validate_identifier};
use crate::store::SiteReader;
use crate::types::{ContentPayload, LifecycleStatus, Tenant};

fn load_site(state: &AppState, subdomain: &str) -> Result<Tenant, ApiError> {
    state
        .store
        .find_site_by_subdomain(&subdomain.to_ascii_lowercase())
        .api_err("Failed to get site")?
        .or_not_found("Site not found")
}

pub async fn create_site(
    _admin: RequireAdmin,
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateSiteRequest>,
) -> impl IntoResponse {
    validate_identifier(&req.subdomain).map_err(ApiError::bad_request)?;

    if req.display_name.trim().is_empty() {
        return Err(ApiError::bad_request("Display name cannot be empty"));
    }

    let existing = state
        .store
        .find_site_by_subdomain(&req.subdomain)
        .api_err("Failed to check existing site")?;

    if existing.is_some() {
        return Err(ApiError::conflict("Site already exists"));
    }

    let template = assign_template(
        req.plan.as_deref(),
        req.template.as_deref(),
        req.niche.as_deref(),
    );

    let now = Utc::now();
    let site = Tenant {
        id: Uuid::new_v4().to_string(),
        identifier: req.subdomain,
        display_name: req.display_name,
        template_id: Some(template.as_str().to_string()),
        status: LifecycleStatus::SetupPending,
        owner_id: req.owner_id,
        plan: req.plan,
        niche: req.niche,
        published_content: None,
        draft_content: req.draft_content,
        legacy: req.legacy.unwrap_or_default(),
        created_at: now,
        updated_at: now,
    };

    state
        .store
        .create_site(&site)
        .api_err("Failed to create site")?;

    info!(subdomain = %site.identifier, template = %template, "Created site");

    Ok((StatusCode::CREATED, Json(ApiResponse::success(site))))
}

pub async fn list_sites(
    _admin: RequireAdmin,
    State(state): State<Arc<AppState>>,
    Query(params): Query<PaginationParams>,
) -> impl IntoResponse {
    let cursor = params.cursor.as_deref().unwrap_or("");

    let sites = state
        .store
        .list_sites(cursor, DEFAULT_PAGE_SIZE + 1)
        .api_err("Failed to list sites")?;

    let (sites, next_cursor, has_more) = paginate(sites, DEFAULT_PAGE_SIZE as usize, |site| {
        site.identifier.clone()
    });

    Ok::<_, ApiError>(Json(PaginatedResponse::new(sites, next_cursor, has_more)))
}

pub async fn get_site(
    _admin: RequireAdmin,
    State(state): State<Arc<AppState>>,
    Path(subdomain): Path<String>,
) -> impl IntoResponse {
    let site = load_site(&state, &subdomain)?;
    Ok::<_, ApiError>(Json(ApiResponse::success(site)))
}

pub async fn update_status(
    _admin: RequireAdmin,
    State(state): State<Arc<AppState>>,
    Path(subdomain): Path<String>,
    Json(req): Json<UpdateStatusRequest>,
) -> impl IntoResponse {
    let status = LifecycleStatus::parse(&req.status).ok_or_else(|| {
        ApiError::bad_request(format!("Unknown status '{}'", req.status))
    })?;

    let site = load_site(&state, &subdomain)?;
    state
        .store
        .update_site_status(&site.id, status)
        .api_err("Failed to update site status")?;

    info!(
        subdomain = %site.identifier,
        from = %site.status,
        to = %status,
        "Updated site status"
    );

    let site = load_site(&state, &subdomain)?;
    Ok::<_, ApiError>(Json(ApiResponse::success(site)))
}

pub async fn save_draft(
    _admin: RequireAdmin,
    State(state): State<Arc<AppState>>,
    Path(subdomain): Path<String>,
    Json(draft): Json<ContentPayload>,
) -> impl IntoResponse {
    let site = load_site(&state, &subdomain)?;
    state
        .store
        .update_site_draft(&site.id, &draft)
        .api_err("Failed to save draft")?;

    let site = load_site(&state, &subdomain)?;
    Ok::<_, ApiError>(Json(ApiResponse::success(site)))
}

pub async fn publish_site(
    _admin: RequireAdmin,
    State(state): State<Arc<AppState>>,
    Path(subdomain): Path<String>,
) -> impl IntoResponse {
    let site = load_site(&state, &subdomain)?;
    state
        .store
        .publish_site_draft(&site.id)
        .api_err("Failed to publish site")?;

    info!(subdomain = %site.identifier, "Published draft");

    let site = load_site(&state, &subdomain)?;
    Ok::<_, ApiError>(Json(ApiResponse::success(site)))
}

pub async fn delete_site(
    _admin: RequireAdmin,
    State(state): State<Arc<AppState>>,
    Path(subdomain): Path<String>,
) -> impl IntoResponse {
    let site = load_site(&state, &subdomain)?;
    let deleted = state
        .store
        .delete_site(&site.id)
        .api_err("Failed to delete site")?;

    if !deleted {
        return Err(ApiError::not_found("Site not found"));
    }

    info!(subdomain = %site.identifier, "Deleted site");
    Ok(StatusCode::NO_CONTENT)
}
