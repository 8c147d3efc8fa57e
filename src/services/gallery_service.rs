//! src/services/gallery_service.rs
//!
//! GalleryService: the read side of the gallery. Filtered and paginated work
//! listings, profile resolution against the identity service, single-work
//! lookup, and the related-works queries for the work page. Everything here is
//! a read; uploads and deletes happen elsewhere.

use crate::{
    models::{
        category::Category,
        identity::Identity,
        profile::Profile,
        work::{Work, WorkId, WorkRow, fold_title},
    },
    services::{
        identity_service::{IdentityError, IdentityService},
        selection::RelatedWorks,
    },
};
use serde::Serialize;
use sqlx::{QueryBuilder, SqlitePool, sqlite::Sqlite};
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Works per page on every listing.
pub const PAGE_SIZE: u64 = 12;

const WORK_COLUMNS: &str = "id, title, description, image, category, user_id, created_at";

#[derive(Debug, Error)]
pub enum GalleryError {
    #[error("profile `{0}` not found")]
    ProfileNotFound(String),
    #[error("work `{0}` not found")]
    WorkNotFound(String),
    #[error("identity `{0}` not found")]
    IdentityNotFound(String),
    #[error("`{0}` is not a valid work id")]
    InvalidWorkId(String),
    #[error(transparent)]
    Identity(#[from] IdentityError),
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

impl GalleryError {
    /// True for outcomes the page layer renders as "not found".
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            GalleryError::ProfileNotFound(_)
                | GalleryError::WorkNotFound(_)
                | GalleryError::IdentityNotFound(_)
                | GalleryError::InvalidWorkId(_)
        )
    }
}

pub type GalleryResult<T> = Result<T, GalleryError>;

/// Home-page filter. Construct with [`WorkFilter::from_query`] so that blank
/// search text and unknown categories collapse to "no filter".
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WorkFilter {
    pub search: Option<String>,
    pub category: Option<Category>,
}

impl WorkFilter {
    pub fn from_query(search: Option<&str>, category: Option<&str>) -> Self {
        Self {
            search: search.filter(|s| !s.is_empty()).map(str::to_string),
            category: category.and_then(Category::parse),
        }
    }
}

/// One page of works plus the total match count, read in one transaction.
#[derive(Serialize, Debug, Clone)]
pub struct WorkListing {
    pub works: Vec<Work>,
    pub total_works: u64,
    pub page: u64,
    pub page_count: u64,
}

/// A resolved profile and its first page of works.
#[derive(Serialize, Debug, Clone)]
pub struct ProfileView {
    pub profile: Profile,
    pub user: Identity,
    /// Authoritative for owner-only affordances.
    pub is_owner: bool,
    pub works: Vec<Work>,
    pub total_works: u64,
    pub page_count: u64,
}

/// `ceil(total / PAGE_SIZE)`; zero when nothing matches.
pub fn page_count(total: u64) -> u64 {
    total.div_ceil(PAGE_SIZE)
}

/// Escape `LIKE` wildcards so search text matches literally.
fn like_pattern(search: &str) -> String {
    let mut escaped = String::with_capacity(search.len() + 2);
    escaped.push('%');
    for c in search.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

/// Append ` WHERE ...` for a home-page filter. Shared by the listing and the
/// count so both see identical predicates.
///
/// Search text is matched against `title_folded`, so both sides are folded
/// with the same Unicode lowercasing and `LIKE` never has to fold case.
fn push_filter(builder: &mut QueryBuilder<'_, Sqlite>, filter: &WorkFilter) {
    let mut sep = " WHERE ";
    if let Some(search) = &filter.search {
        builder.push(sep);
        builder.push("title_folded LIKE ");
        builder.push_bind(like_pattern(&fold_title(search)));
        builder.push(" ESCAPE '\\'");
        sep = " AND ";
    }
    if let Some(category) = filter.category {
        builder.push(sep);
        builder.push("category = ");
        builder.push_bind(category.as_str());
    }
}

/// GalleryService answers every page-level read:
/// - browse works by search text and category (home page)
/// - resolve a username to its identity and works (profile pages)
/// - fetch a single work and its related works (work page)
///
/// Cheap to clone; handlers receive it through router state.
#[derive(Clone)]
pub struct GalleryService {
    /// Shared SQLite connection pool.
    pub db: Arc<SqlitePool>,

    /// External identity lookups.
    pub identity: Arc<dyn IdentityService>,
}

impl GalleryService {
    pub fn new(db: Arc<SqlitePool>, identity: Arc<dyn IdentityService>) -> Self {
        Self { db, identity }
    }

    /// List works matching `filter`, newest first, together with the total
    /// match count.
    ///
    /// `page` is 1-based and clamped to at least 1. Both queries run inside one
    /// transaction so the count describes the same snapshot as the page.
    pub async fn browse_works(&self, filter: &WorkFilter, page: u64) -> GalleryResult<WorkListing> {
        let page = page.max(1);
        let offset = (page - 1).saturating_mul(PAGE_SIZE);
        debug!(search = ?filter.search, category = ?filter.category, page, "browsing works");

        let mut list = QueryBuilder::<Sqlite>::new(format!("SELECT {WORK_COLUMNS} FROM works"));
        push_filter(&mut list, filter);
        list.push(" ORDER BY created_at DESC, id DESC LIMIT ");
        list.push_bind(PAGE_SIZE as i64);
        list.push(" OFFSET ");
        list.push_bind(i64::try_from(offset).unwrap_or(i64::MAX));

        let mut count = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM works");
        push_filter(&mut count, filter);

        let mut tx = self.db.begin().await?;
        let rows = list.build_query_as::<WorkRow>().fetch_all(&mut *tx).await?;
        let total = count.build_query_scalar::<i64>().fetch_one(&mut *tx).await?;
        tx.commit().await?;

        let total_works = u64::try_from(total).unwrap_or(0);
        debug!(returned = rows.len(), total_works, "browse complete");

        Ok(WorkListing {
            works: rows.into_iter().map(Work::from).collect(),
            total_works,
            page,
            page_count: page_count(total_works),
        })
    }

    /// Resolve `username` to its profile, identity and first page of works.
    ///
    /// The profile is looked up before the identity service is touched, so an
    /// unknown username is a `ProfileNotFound` whatever the service's health.
    /// After that exactly one identity lookup runs: the viewer's own record
    /// when the viewer owns the profile, the profile owner's record otherwise.
    pub async fn resolve_profile(
        &self,
        username: &str,
        viewer_id: Option<&str>,
    ) -> GalleryResult<ProfileView> {
        let profile = self
            .find_profile(username)
            .await?
            .ok_or_else(|| GalleryError::ProfileNotFound(username.to_string()))?;

        let is_owner = viewer_id == Some(profile.user_id.as_str());
        // An owner's record is the viewer's own, so one lookup serves both.
        let user = self
            .identity
            .get_user(&profile.user_id)
            .await?
            .ok_or_else(|| GalleryError::IdentityNotFound(profile.user_id.clone()))?;
        debug!(username, user_id = %user.id, is_owner, "resolved profile");

        let (works, total_works) = self.works_by_owner(&user.id).await?;

        Ok(ProfileView {
            profile,
            user,
            is_owner,
            works,
            total_works,
            page_count: page_count(total_works),
        })
    }

    /// Look up a profile by its unique username.
    pub async fn find_profile(&self, username: &str) -> GalleryResult<Option<Profile>> {
        let profile = sqlx::query_as::<_, Profile>(
            "SELECT username, user_id FROM profiles WHERE username = ?",
        )
        .bind(username)
        .fetch_optional(&*self.db)
        .await?;
        Ok(profile)
    }

    /// Fetch a work by its raw route id.
    ///
    /// Malformed ids fail with `InvalidWorkId` before any query runs.
    pub async fn get_work(&self, raw_id: &str) -> GalleryResult<Work> {
        let id = WorkId::parse(raw_id).ok_or_else(|| GalleryError::InvalidWorkId(raw_id.to_string()))?;

        let row = sqlx::query_as::<_, WorkRow>(&format!(
            "SELECT {WORK_COLUMNS} FROM works WHERE id = ?"
        ))
        .bind(id.as_str())
        .fetch_optional(&*self.db)
        .await?;

        row.map(Work::from)
            .ok_or_else(|| GalleryError::WorkNotFound(id.to_string()))
    }

    /// Candidate "more from this user" and "also like" sets for `work`.
    ///
    /// Neither set ever contains `work` itself. The two queries are
    /// independent reads. For a work without a category, "also like" means
    /// the other uncategorized works.
    pub async fn related_works(&self, work: &Work) -> GalleryResult<RelatedWorks> {
        let more_works = sqlx::query_as::<_, WorkRow>(&format!(
            "SELECT {WORK_COLUMNS} FROM works WHERE user_id = ? AND id <> ? LIMIT ?"
        ))
        .bind(&work.user_id)
        .bind(&work.id)
        .bind(PAGE_SIZE as i64)
        .fetch_all(&*self.db)
        .await?;

        let also_like_works = match work.category {
            Some(category) => {
                sqlx::query_as::<_, WorkRow>(&format!(
                    "SELECT {WORK_COLUMNS} FROM works WHERE category = ? AND id <> ? LIMIT ?"
                ))
                .bind(category.as_str())
                .bind(&work.id)
                .bind(PAGE_SIZE as i64)
                .fetch_all(&*self.db)
                .await?
            }
            None => {
                sqlx::query_as::<_, WorkRow>(&format!(
                    "SELECT {WORK_COLUMNS} FROM works WHERE category IS NULL AND id <> ? LIMIT ?"
                ))
                .bind(&work.id)
                .bind(PAGE_SIZE as i64)
                .fetch_all(&*self.db)
                .await?
            }
        };

        debug!(
            work_id = %work.id,
            more = more_works.len(),
            also_like = also_like_works.len(),
            "selected related works"
        );

        Ok(RelatedWorks {
            more_works: more_works.into_iter().map(Work::from).collect(),
            also_like_works: also_like_works.into_iter().map(Work::from).collect(),
        })
    }

    /// First page of an owner's works, newest first, plus their total count.
    async fn works_by_owner(&self, user_id: &str) -> GalleryResult<(Vec<Work>, u64)> {
        let mut tx = self.db.begin().await?;

        let rows = sqlx::query_as::<_, WorkRow>(&format!(
            "SELECT {WORK_COLUMNS} FROM works WHERE user_id = ? ORDER BY created_at DESC, id DESC LIMIT ?"
        ))
        .bind(user_id)
        .bind(PAGE_SIZE as i64)
        .fetch_all(&mut *tx)
        .await?;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM works WHERE user_id = ?")
            .bind(user_id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok((
            rows.into_iter().map(Work::from).collect(),
            u64::try_from(total).unwrap_or(0),
        ))
    }
}
