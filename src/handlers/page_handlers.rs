//! Page-data handlers.
//!
//! Each handler resolves everything one page needs and returns it as JSON,
//! with a `metadata` block for titles and social cards. Rendering is the
//! front end's business.

use crate::{
    errors::AppError,
    handlers::viewer::Viewer,
    metadata::PageMetadata,
    models::{category::Category, work::Work},
    services::{
        gallery_service::{ProfileView, WorkFilter, WorkListing},
        selection::RelatedSelection,
    },
    state::AppState,
};
use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};

/// Query params accepted by the home page.
#[derive(Debug, Deserialize)]
pub struct HomeQuery {
    pub search: Option<String>,
    pub category: Option<String>,
    /// Kept as text so a malformed value falls back to page 1.
    pub page: Option<String>,
}

#[derive(Serialize, Debug)]
pub struct HomePage {
    pub metadata: PageMetadata,
    /// Effective search term, echoed for the search header.
    pub search: Option<String>,
    pub category: Option<Category>,
    #[serde(flatten)]
    pub listing: WorkListing,
}

#[derive(Serialize, Debug)]
pub struct AboutPage {
    pub metadata: PageMetadata,
    #[serde(flatten)]
    pub view: ProfileView,
}

#[derive(Serialize, Debug)]
pub struct WorkPage {
    pub metadata: PageMetadata,
    pub work: Work,
    pub is_owner: bool,
    /// Only present for the owner.
    pub edit_url: Option<String>,
    #[serde(flatten)]
    pub related: RelatedSelection,
}

#[derive(Serialize, Debug)]
pub struct SignUpPage {
    pub metadata: PageMetadata,
}

/// `GET /?search=&category=&page=`
pub async fn home_page(
    State(state): State<AppState>,
    Query(q): Query<HomeQuery>,
) -> Result<Json<HomePage>, AppError> {
    let filter = WorkFilter::from_query(q.search.as_deref(), q.category.as_deref());
    let page = q
        .page
        .as_deref()
        .and_then(|p| p.trim().parse::<u64>().ok())
        .unwrap_or(1);

    let listing = state.gallery.browse_works(&filter, page).await?;

    let title = state
        .site
        .home_title(q.search.as_deref(), q.category.as_deref());
    Ok(Json(HomePage {
        metadata: state.site.page(title, "/"),
        search: filter.search,
        category: filter.category,
        listing,
    }))
}

/// `GET /{username}/about`
pub async fn about_page(
    State(state): State<AppState>,
    Path(username): Path<String>,
    viewer: Viewer,
) -> Result<Json<AboutPage>, AppError> {
    let view = state.gallery.resolve_profile(&username, viewer.id()).await?;

    let title = state.site.profile_title(Some(&view.user));
    let path = format!("/{}/about", view.profile.username);
    Ok(Json(AboutPage {
        metadata: state.site.page(title, &path),
        view,
    }))
}

/// `GET /work/{work_id}`
pub async fn work_page(
    State(state): State<AppState>,
    Path(work_id): Path<String>,
    viewer: Viewer,
) -> Result<Json<WorkPage>, AppError> {
    let work = state.gallery.get_work(&work_id).await?;
    let related = state.gallery.related_works(&work).await?;
    let related = related.into_selection(&mut rand::rng());

    let is_owner = viewer.id() == Some(work.user_id.as_str());
    let path = format!("/work/{}", work.id);

    Ok(Json(WorkPage {
        metadata: state.site.work_page(&work, &path),
        edit_url: is_owner.then(|| format!("{}/edit", path)),
        is_owner,
        work,
        related,
    }))
}

/// `GET /sign-up`
pub async fn sign_up_page(State(state): State<AppState>) -> Json<SignUpPage> {
    Json(SignUpPage {
        metadata: state.site.sign_up_page(),
    })
}
