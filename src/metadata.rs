//! Page titles, descriptions and social-card images.
//!
//! Pure string derivation over already-fetched data. Every composer takes the
//! site defaults so that missing data falls back to the parent layout's title.

use crate::models::{identity::Identity, work::Work};
use serde::Serialize;
use url::Url;

pub const SITE_NAME: &str = "Photorio";
pub const SITE_DESCRIPTION: &str = "Share your images and become a part of Photorio";
const SIGN_UP_DESCRIPTION: &str = "Create an account on Photorio, the world\u{2019}s leading community for designers to share, grow, and get hired.";

/// Site-wide defaults, the equivalent of the root layout's metadata.
#[derive(Debug, Clone)]
pub struct SiteMetadata {
    pub site_name: String,
    pub description: String,
    /// Base for canonical URLs.
    pub base_url: Url,
}

/// Metadata block attached to every page response.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct PageMetadata {
    pub title: String,
    pub description: String,
    /// Open Graph / Twitter card images, most specific first.
    pub images: Vec<String>,
    pub canonical_url: String,
}

/// Uppercase the first character; leave the rest untouched.
pub fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

impl SiteMetadata {
    pub fn new(base_url: Url) -> Self {
        Self {
            site_name: SITE_NAME.to_string(),
            description: SITE_DESCRIPTION.to_string(),
            base_url,
        }
    }

    /// The parent title every page falls back to.
    pub fn default_title(&self) -> &str {
        &self.site_name
    }

    fn suffixed(&self, head: &str) -> String {
        format!("{} | {}", head, self.site_name)
    }

    /// `{title} | {site}` for a work, or the site title when there is no work.
    pub fn work_title(&self, work: Option<&Work>) -> String {
        match work {
            Some(work) => self.suffixed(&work.title),
            None => self.default_title().to_string(),
        }
    }

    /// Browse title for the home page. A non-empty `category` wins over
    /// `search`; the raw parameter is used even if it is not a known category.
    pub fn home_title(&self, search: Option<&str>, category: Option<&str>) -> String {
        let term = category
            .filter(|c| !c.is_empty())
            .or(search.filter(|s| !s.is_empty()));

        match term {
            Some(term) => self.suffixed(&format!(
                "Browse thousands of {} images for design inspiration",
                capitalize(term)
            )),
            None => self.default_title().to_string(),
        }
    }

    /// `{first} {last} | {site}` when the identity has a first name. A missing
    /// or empty last name leaves `{first} | {site}`, with no trailing space.
    pub fn profile_title(&self, user: Option<&Identity>) -> String {
        match user.and_then(|u| u.first_name.as_deref().map(|first| (first, u))) {
            Some((first, user)) => {
                let full = match user.last_name.as_deref() {
                    Some(last) if !last.is_empty() => format!("{first} {last}"),
                    _ => first.to_string(),
                };
                self.suffixed(&full)
            }
            None => self.default_title().to_string(),
        }
    }

    pub fn canonical_url(&self, path: &str) -> String {
        self.base_url
            .join(path)
            .map(String::from)
            .unwrap_or_else(|_| self.base_url.to_string())
    }

    /// Metadata with the site description and no images.
    pub fn page(&self, title: String, path: &str) -> PageMetadata {
        PageMetadata {
            title,
            description: self.description.clone(),
            images: Vec::new(),
            canonical_url: self.canonical_url(path),
        }
    }

    /// Work page metadata: work description and the work image as card image.
    pub fn work_page(&self, work: &Work, path: &str) -> PageMetadata {
        PageMetadata {
            title: self.work_title(Some(work)),
            description: work.description.clone(),
            images: vec![work.image.clone()],
            canonical_url: self.canonical_url(path),
        }
    }

    pub fn sign_up_page(&self) -> PageMetadata {
        PageMetadata {
            title: self.suffixed("Sign Up"),
            description: SIGN_UP_DESCRIPTION.to_string(),
            images: Vec::new(),
            canonical_url: self.canonical_url("/sign-up"),
        }
    }
}
