use std::sync::Arc;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{HeaderMap, Method, Request, StatusCode, header};
use serde_json::Value;
use tower::ServiceExt;

use webownr::auth::TokenGenerator;
use webownr::config::ServerConfig;
use webownr::server::{AppState, create_router};
use webownr::store::{SqliteStore, Store};

pub const ROOT_DOMAIN: &str = "webownr.com";

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

/// In-process router over a private in-memory store.
pub struct TestApp {
    pub store: Arc<SqliteStore>,
    pub admin_token: String,
    router: Router,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_config(ServerConfig {
            root_domain: ROOT_DOMAIN.to_string(),
            ..ServerConfig::default()
        })
    }

    pub fn with_config(config: ServerConfig) -> Self {
        let store = Arc::new(SqliteStore::open_in_memory().expect("open store"));
        store.initialize().expect("initialize store");

        let (token, admin_token) = TokenGenerator::new().issue_admin().expect("issue token");
        store.create_token(&token).expect("store token");

        let state = AppState::new(store.clone(), config).expect("build state");
        let router = create_router(Arc::new(state));

        Self {
            store,
            admin_token,
            router,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("read body");
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };

        TestResponse {
            status,
            headers,
            body,
        }
    }

    /// A document request as a browser would send it to `host`.
    pub async fn visit(&self, host: &str, path: &str) -> TestResponse {
        let request = Request::builder()
            .method(Method::GET)
            .uri(path)
            .header(header::HOST, host)
            .body(Body::empty())
            .expect("build request");
        self.send(request).await
    }

    pub async fn admin(&self, method: Method, path: &str, body: Option<Value>) -> TestResponse {
        self.admin_as(Some(&self.admin_token), method, path, body)
            .await
    }

    pub async fn admin_as(
        &self,
        token: Option<&str>,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> TestResponse {
        let mut builder = Request::builder()
            .method(method)
            .uri(format!("/api/v1/admin{path}"))
            .header(header::HOST, format!("app.{ROOT_DOMAIN}"));

        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }

        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("build request");

        self.send(request).await
    }
}
