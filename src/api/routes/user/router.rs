//! Router for the user API

use std::sync::{Arc, RwLock};

use axum::{Json, Router, body::Bytes, extract::State, routing::get};
use http::HeaderMap;

use super::db as user_db;
use super::public;
use crate::api::public::ApiError;
use crate::api::state::AppState;
use crate::api::utils::{authenticate, body_to_object};

type SharedState = Arc<RwLock<AppState>>;

// View profile endpoint
async fn view_profile(
    State(state): State<SharedState>,
    headers: HeaderMap,
) -> Result<Json<public::UserResponse<public::Profile>>, ApiError> {
    let auth_user = authenticate(&state, &headers).await?;
    let db = state.read().expect("Unable to read shared state").db.clone();

    let user = user_db::find_user_by_id(&db, auth_user.id.to_string())
        .await?
        .ok_or(ApiError::NotFound("User not found"))?;

    Ok(Json(public::UserResponse { user: user.into() }))
}

// Update profile endpoint
async fn update_profile(
    State(state): State<SharedState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<public::UserResponse<public::UpdatedProfile>>, ApiError> {
    let auth_user = authenticate(&state, &headers).await?;
    let update = public::parse_profile_update(&body_to_object(&body)?)?;
    let db = state.read().expect("Unable to read shared state").db.clone();

    let user = user_db::update_profile(&db, auth_user.id.to_string(), update)
        .await?
        .ok_or(ApiError::NotFound("User not found"))?;

    Ok(Json(public::UserResponse { user: user.into() }))
}

/// Create the user router
pub fn router() -> Router<SharedState> {
    Router::new().route("/profile", get(view_profile).put(update_profile))
}
