//! Photorio: page data for a photo-sharing gallery.
//!
//! Works and profiles live in SQLite; identities live in an external identity
//! service. Each page route resolves what its page needs and returns JSON.

pub mod config;
pub mod db;
pub mod errors;
pub mod handlers;
pub mod metadata;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;

use axum::Router;
use state::AppState;

/// Build the full application router.
pub fn app(state: AppState) -> Router {
    routes::routes::routes().with_state(state)
}
