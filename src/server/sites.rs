//! Document requests for tenant sites.
//!
//! Runs as the router fallback, so anything not matched by an API route lands
//! here. The host decides the tenant, the remaining path picks the page.

use std::sync::Arc;

use axum::{
    Json,
    extract::State,
    http::{HeaderMap, HeaderValue, Method, StatusCode, Uri, header},
    response::{IntoResponse, Response},
};

use crate::server::AppState;
use crate::server::response::{ApiError, ApiResponse};
use crate::site::{
    Interstitial, InterstitialKind, SiteOutcome, is_document_path, resolve_host, rewrite_path,
};

/// Seconds clients are asked to wait before retrying a site under maintenance.
const MAINTENANCE_RETRY_AFTER: &str = "3600";

pub async fn render_document(
    State(state): State<Arc<AppState>>,
    method: Method,
    headers: HeaderMap,
    uri: Uri,
) -> Response {
    let path = uri.path();

    if !is_document_path(path) {
        return ApiError::not_found("Not found").into_response();
    }

    if method != Method::GET && method != Method::HEAD {
        return ApiError::method_not_allowed("Method not allowed").into_response();
    }

    let host = headers
        .get(header::HOST)
        .and_then(|h| h.to_str().ok())
        .unwrap_or("");
    let route = resolve_host(host, &state.config.root_domain);
    let rewritten = rewrite_path(&route, path);

    let Some((identifier, page_path)) = split_site_path(&rewritten) else {
        return ApiError::not_found("Site not found").into_response();
    };

    match state.pipeline.render(&identifier, page_path).await {
        SiteOutcome::NotFound => ApiError::not_found("Site not found").into_response(),
        SiteOutcome::Intercepted(page) => interstitial_response(page),
        SiteOutcome::Rendered(page) => Json(ApiResponse::success(page)).into_response(),
    }
}

fn interstitial_response(page: Interstitial) -> Response {
    match page.kind {
        InterstitialKind::Maintenance => {
            let mut response = (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ApiResponse::success(page)),
            )
                .into_response();
            response.headers_mut().insert(
                header::RETRY_AFTER,
                HeaderValue::from_static(MAINTENANCE_RETRY_AFTER),
            );
            response
        }
        InterstitialKind::Pending => Json(ApiResponse::success(page)).into_response(),
    }
}

/// Splits "/acme/about/team" into ("acme", "about/team").
fn split_site_path(path: &str) -> Option<(String, &str)> {
    let trimmed = path.trim_start_matches('/');
    let (identifier, rest) = trimmed.split_once('/').unwrap_or((trimmed, ""));

    if identifier.is_empty() {
        return None;
    }

    Some((identifier.to_ascii_lowercase(), rest))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_site_path() {
        assert_eq!(split_site_path("/acme"), Some(("acme".to_string(), "")));
        assert_eq!(split_site_path("/Acme/"), Some(("acme".to_string(), "")));
        assert_eq!(
            split_site_path("/acme/about/team"),
            Some(("acme".to_string(), "about/team"))
        );
        assert_eq!(split_site_path("/"), None);
        assert_eq!(split_site_path(""), None);
    }
}
