//! Common test utilities for integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode},
};
use chrono::{DateTime, Duration, TimeZone, Utc};
use photorio::{
    db,
    metadata::SiteMetadata,
    models::{category::Category, identity::Identity, work::fold_title},
    services::{
        gallery_service::GalleryService,
        identity_service::{IdentityError, IdentityService},
    },
    state::AppState,
};
use serde_json::Value;
use sqlx::SqlitePool;
use std::{
    collections::HashMap,
    sync::{
        Arc, Mutex,
        atomic::{AtomicBool, Ordering},
    },
};
use tower::ServiceExt;
use url::Url;
use uuid::Uuid;

pub const VIEWER_HEADER: &str = "x-photorio-user-id";

/// Creates an in-memory SQLite database with the schema applied.
pub async fn setup_test_db() -> SqlitePool {
    let db_url = format!(
        "sqlite:file:gallery_test_{}?mode=memory&cache=shared",
        Uuid::new_v4()
    );

    let pool = sqlx::sqlite::SqlitePoolOptions::new()
        .max_connections(1)
        .connect(&db_url)
        .await
        .expect("Failed to create SQLite pool");

    db::run_migrations(&pool)
        .await
        .expect("Failed to run migrations");
    pool
}

/// In-memory identity service that records every lookup.
#[derive(Default)]
pub struct FakeIdentityService {
    users: Mutex<HashMap<String, Identity>>,
    requested: Mutex<Vec<String>>,
    failing: AtomicBool,
}

impl FakeIdentityService {
    pub fn with_users(users: impl IntoIterator<Item = Identity>) -> Arc<Self> {
        let fake = Self::default();
        {
            let mut map = fake.users.lock().unwrap();
            for user in users {
                map.insert(user.id.clone(), user);
            }
        }
        Arc::new(fake)
    }

    pub fn calls(&self) -> usize {
        self.requested.lock().unwrap().len()
    }

    /// User ids looked up so far, in call order.
    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }
}

#[async_trait]
impl IdentityService for FakeIdentityService {
    async fn get_user(&self, user_id: &str) -> Result<Option<Identity>, IdentityError> {
        self.requested.lock().unwrap().push(user_id.to_string());
        if self.failing.load(Ordering::SeqCst) {
            return Err(IdentityError::UnexpectedStatus {
                user_id: user_id.to_string(),
                status: 502,
            });
        }
        Ok(self.users.lock().unwrap().get(user_id).cloned())
    }
}

pub fn identity(id: &str, first: &str, last: &str) -> Identity {
    Identity {
        id: id.to_string(),
        first_name: Some(first.to_string()),
        last_name: Some(last.to_string()),
        username: None,
        image_url: None,
    }
}

/// 24-hex-digit work id for a small integer.
pub fn work_id(n: u32) -> String {
    format!("{:024x}", n)
}

/// Fixed base time so ordering is deterministic; `minutes` offsets from it.
pub fn at(minutes: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap() + Duration::minutes(minutes)
}

pub struct NewWork<'a> {
    pub id: String,
    pub title: &'a str,
    pub category: Option<&'a str>,
    pub user_id: &'a str,
    pub created_at: DateTime<Utc>,
}

impl<'a> NewWork<'a> {
    pub fn new(n: u32, title: &'a str, user_id: &'a str) -> Self {
        Self {
            id: work_id(n),
            title,
            category: None,
            user_id,
            created_at: at(i64::from(n)),
        }
    }

    pub fn category(mut self, category: Category) -> Self {
        self.category = Some(category.as_str());
        self
    }

    pub fn raw_category(mut self, category: &'a str) -> Self {
        self.category = Some(category);
        self
    }

    pub fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }
}

pub async fn insert_work(pool: &SqlitePool, work: NewWork<'_>) {
    sqlx::query(
        "INSERT INTO works (id, title, title_folded, description, image, category, user_id, created_at)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&work.id)
    .bind(work.title)
    .bind(fold_title(work.title))
    .bind(format!("About {}", work.title))
    .bind(format!("https://img.example/{}.jpg", work.id))
    .bind(work.category)
    .bind(work.user_id)
    .bind(work.created_at)
    .execute(pool)
    .await
    .expect("Failed to insert work");
}

pub async fn insert_profile(pool: &SqlitePool, username: &str, user_id: &str) {
    sqlx::query("INSERT INTO profiles (username, user_id) VALUES (?, ?)")
        .bind(username)
        .bind(user_id)
        .execute(pool)
        .await
        .expect("Failed to insert profile");
}

pub fn gallery(pool: &SqlitePool, identity: Arc<FakeIdentityService>) -> GalleryService {
    GalleryService::new(Arc::new(pool.clone()), identity)
}

/// Creates the full router over `pool` and `identity`.
pub fn create_test_router(pool: &SqlitePool, identity: Arc<FakeIdentityService>) -> Router {
    let site = SiteMetadata::new(Url::parse("https://photorio.example").unwrap());
    let state = AppState::new(gallery(pool, identity), site, VIEWER_HEADER).unwrap();
    photorio::app(state)
}

/// Helper to make GET requests, optionally as a signed-in viewer.
pub fn get_request(uri: &str, viewer: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(Method::GET).uri(uri);
    if let Some(id) = viewer {
        builder = builder.header(VIEWER_HEADER, id);
    }
    builder.body(Body::empty()).unwrap()
}

/// Sends request and parses the JSON response.
pub async fn send_request(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let parsed: Value = serde_json::from_slice(&body).unwrap_or_else(|e| {
        panic!(
            "Failed to parse response: {} - Body: {:?}",
            e,
            String::from_utf8_lossy(&body)
        )
    });
    (status, parsed)
}
