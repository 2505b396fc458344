//! API routes module

pub mod assets;
pub mod auth;
pub mod user;

use std::sync::{Arc, RwLock};

use crate::api::state::AppState;
use axum::Router;

type SharedState = Arc<RwLock<AppState>>;

/// Create the combined API router
pub fn router() -> Router<SharedState> {
    Router::new()
        // Asset search, download and icon routes
        .nest("/assets", assets::router())
        // Auth provider sync routes
        .nest("/auth", auth::router())
        // Profile routes
        .nest("/user", user::router())
}
