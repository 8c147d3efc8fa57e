//! Who is making the request, if anyone.
//!
//! Authentication happens upstream; by the time a request reaches us the auth
//! layer has put the viewer's identity id in a header. No header (or a blank
//! one) is an anonymous viewer.

use crate::state::AppState;
use axum::{extract::FromRequestParts, http::request::Parts};
use std::convert::Infallible;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Viewer(pub Option<String>);

impl Viewer {
    pub fn id(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

impl FromRequestParts<AppState> for Viewer {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let id = parts
            .headers
            .get(&state.viewer_header)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string);

        Ok(Viewer(id))
    }
}
