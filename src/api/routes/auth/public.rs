//! Public types for the auth API
use serde::Deserialize;

pub use crate::api::routes::user::public::{User, UserResponse};

/// Optional names sent by the client on first sync
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl SyncRequest {
    /// Lenient parse: a missing or malformed body is the same as an
    /// empty one
    pub fn from_body(body: &[u8]) -> Self {
        serde_json::from_slice(body).unwrap_or_default()
    }
}
