use std::sync::Arc;
use std::time::Instant;

use axum::extract::Request;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::{Router, routing::get};

use super::admin::admin_router;
use super::sites::render_document;
use crate::config::ServerConfig;
use crate::error::Result;
use crate::site::{SitePipeline, TemplateDispatcher, TenantGateway};
use crate::store::{SiteReader, Store};

pub struct AppState {
    pub store: Arc<dyn Store>,
    pub pipeline: SitePipeline,
    pub config: ServerConfig,
}

impl AppState {
    /// Wires the render pipeline to the same store the admin API writes to.
    pub fn new<S: Store + 'static>(store: Arc<S>, config: ServerConfig) -> Result<Self> {
        let dispatcher = TemplateDispatcher::from_config(&config.default_template)?;
        let reader: Arc<dyn SiteReader> = store.clone();
        let gateway = TenantGateway::new(reader, config.store_timeout());

        Ok(Self {
            store,
            pipeline: SitePipeline::new(gateway, dispatcher),
            config,
        })
    }
}

async fn health() -> &'static str {
    "OK"
}

async fn log_request(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let host = request
        .headers()
        .get(axum::http::header::HOST)
        .and_then(|h| h.to_str().ok())
        .unwrap_or("-")
        .to_string();
    let start = Instant::now();

    let response = next.run(request).await;

    let latency = start.elapsed();
    let status = response.status();

    tracing::info!(
        "{} {} {} {} {}ms",
        method,
        host,
        uri.path(),
        status.as_u16(),
        latency.as_millis()
    );

    response
}

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest("/api/v1/admin", admin_router())
        .fallback(render_document)
        .layer(middleware::from_fn(log_request))
        .with_state(state)
}
