mod sites;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::server::AppState;

pub fn admin_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/sites", post(sites::create_site).get(sites::list_sites))
        .route(
            "/sites/{subdomain}",
            get(sites::get_site).delete(sites::delete_site),
        )
        .route("/sites/{subdomain}/status", put(sites::update_status))
        .route("/sites/{subdomain}/draft", put(sites::save_draft))
        .route("/sites/{subdomain}/publish", post(sites::publish_site))
}
