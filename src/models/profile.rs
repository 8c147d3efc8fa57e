//! Represents a public profile: the routable username for an identity.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A stored profile. `username` is unique and is the only routable key to an
/// identity.
#[derive(Serialize, Deserialize, Clone, FromRow, Debug, PartialEq)]
pub struct Profile {
    pub username: String,

    /// Reference to the identity managed by the external identity service.
    pub user_id: String,
}
