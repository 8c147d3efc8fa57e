//! Shared router state.

use crate::{metadata::SiteMetadata, services::gallery_service::GalleryService};
use anyhow::{Context, Result};
use axum::http::HeaderName;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub gallery: GalleryService,
    pub site: Arc<SiteMetadata>,
    /// Request header the upstream auth layer uses for the viewer's id.
    pub viewer_header: HeaderName,
}

impl AppState {
    pub fn new(gallery: GalleryService, site: SiteMetadata, viewer_header: &str) -> Result<Self> {
        let viewer_header = HeaderName::from_bytes(viewer_header.as_bytes())
            .with_context(|| format!("invalid viewer header name `{}`", viewer_header))?;

        Ok(Self {
            gallery,
            site: Arc::new(site),
            viewer_header,
        })
    }
}
