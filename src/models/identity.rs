//! Identity records owned by the external identity service.

use serde::{Deserialize, Serialize};

/// An account record as returned by the identity service.
///
/// Only referenced by id from this system; never stored locally.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Identity {
    pub id: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}
