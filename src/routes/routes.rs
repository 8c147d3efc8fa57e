//! Defines routes for the gallery page-data API.
//!
//! ## Structure
//! - **Pages**
//!   - `GET /`                   : browse works (supports search, category, page)
//!   - `GET /work/{work_id}`     : single work with related works
//!   - `GET /{username}/about`   : profile about page
//!   - `GET /sign-up`            : sign-up page metadata
//!
//! - **Probes**
//!   - `GET /healthz`, `GET /readyz`
//!
//! Static segments win over `{username}`, so a user named `work` has no
//! reachable about page.

use crate::{
    handlers::{
        health_handlers::{healthz, readyz},
        page_handlers::{about_page, home_page, sign_up_page, work_page},
    },
    state::AppState,
};
use axum::{Router, routing::get};

/// Build and return the router for all page routes.
///
/// The router carries shared state (`AppState`) to all handlers.
pub fn routes() -> Router<AppState> {
    Router::new()
        // health endpoints (mounted at root)
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Pages
        .route("/", get(home_page))
        .route("/sign-up", get(sign_up_page))
        .route("/work/{work_id}", get(work_page))
        .route("/{username}/about", get(about_page))
}
