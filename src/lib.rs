//! # WebOwnr
//!
//! Multi-tenant site server. A request's host picks the tenant, the tenant's
//! lifecycle status decides whether it may be shown, and its stored content is
//! laid out by one of a closed set of templates.
//!
//! ## Library Usage
//!
//! ```toml
//! [dependencies]
//! webownr = { version = "0.1", default-features = false }
//! ```
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use webownr::config::ServerConfig;
//! use webownr::server::{AppState, create_router};
//! use webownr::store::{SqliteStore, Store};
//!
//! let config = ServerConfig::load("./data").unwrap();
//! let store = SqliteStore::new(&config.db_path()).unwrap();
//! store.initialize().unwrap();
//!
//! let state = Arc::new(AppState::new(Arc::new(store), config).unwrap());
//! let router = create_router(state);
//! // Serve with axum...
//! ```
//!
//! ## Feature Flags
//!
//! - `cli` (default): Includes CLI module. Disable with `default-features = false`.

pub mod auth;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod error;
pub mod server;
pub mod site;
pub mod store;
pub mod types;
