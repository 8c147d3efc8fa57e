//! Core data models for the gallery.
//!
//! `Work` and `Profile` map to SQLite tables via `sqlx::FromRow`; `Identity`
//! comes from the external identity service. All of them serialize as JSON
//! for the page layer.

pub mod category;
pub mod identity;
pub mod profile;
pub mod work;
