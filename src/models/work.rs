//! Represents a work: one uploaded image post.

use super::category::Category;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;

/// Length of a work id in hex digits (12-byte document-store object id).
const WORK_ID_LEN: usize = 24;

/// A structurally valid work identifier.
///
/// Work ids are 24 hex digits. Parsing normalizes to lowercase so lookups
/// match the stored form regardless of how the id was typed in a URL.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct WorkId(String);

impl WorkId {
    /// Validate a raw identifier without touching the store.
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.len() == WORK_ID_LEN && raw.bytes().all(|b| b.is_ascii_hexdigit()) {
            Some(Self(raw.to_ascii_lowercase()))
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WorkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Case-folded form of a title, stored in `works.title_folded`.
///
/// Writers must store this next to every title. Title search folds its input
/// the same way and matches against the folded column.
pub fn fold_title(title: &str) -> String {
    title.to_lowercase()
}

/// A single work as exposed to the page layer.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Work {
    pub id: String,
    pub title: String,
    pub description: String,

    /// Public URL of the image in object storage.
    pub image: String,

    /// `None` when unset or when the stored value is not a known category.
    pub category: Option<Category>,

    /// Owning identity.
    pub user_id: String,

    pub created_at: DateTime<Utc>,
}

/// Raw `works` row. Category is kept as text until it is checked against the
/// fixed set.
#[derive(FromRow, Debug)]
pub(crate) struct WorkRow {
    pub id: String,
    pub title: String,
    pub description: String,
    pub image: String,
    pub category: Option<String>,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
}

impl From<WorkRow> for Work {
    fn from(row: WorkRow) -> Self {
        let category = row.category.as_deref().and_then(|raw| {
            let parsed = Category::parse(raw);
            if parsed.is_none() {
                tracing::warn!(work_id = %row.id, category = raw, "ignoring unknown stored category");
            }
            parsed
        });

        Self {
            id: row.id,
            title: row.title,
            description: row.description,
            image: row.image,
            category,
            user_id: row.user_id,
            created_at: row.created_at,
        }
    }
}
