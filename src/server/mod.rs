mod admin;
pub mod dto;
pub mod response;
mod router;
mod sites;

pub use admin::admin_router;
pub use router::{AppState, create_router};
pub use sites::render_document;
