//! Router for the auth API

use std::sync::{Arc, RwLock};

use axum::{Json, Router, body::Bytes, extract::State, routing::post};
use http::{HeaderMap, StatusCode};

use super::public;
use crate::api::public::ApiError;
use crate::api::routes::user::db as user_db;
use crate::api::routes::user::public::NewUser;
use crate::api::state::AppState;
use crate::api::utils::authenticate;

type SharedState = Arc<RwLock<AppState>>;

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

// Sync the provider's user into the users table
async fn sync_user(
    State(state): State<SharedState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<(StatusCode, Json<public::UserResponse<public::User>>), ApiError> {
    let auth_user = authenticate(&state, &headers).await?;
    let db = state.read().expect("Unable to read shared state").db.clone();
    let id = auth_user.id.to_string();

    if let Some(user) = user_db::find_user_by_id(&db, id.clone()).await? {
        return Ok((StatusCode::OK, Json(public::UserResponse { user })));
    }

    let Some(email) = auth_user.email else {
        return Err(ApiError::BadRequest(String::from(
            "Authenticated user has no email address",
        )));
    };

    let extra = public::SyncRequest::from_body(&body);
    let metadata = auth_user.user_metadata;
    let new_user = NewUser {
        id,
        email,
        first_name: non_empty(extra.first_name).or(non_empty(metadata.first_name)),
        last_name: non_empty(extra.last_name).or(non_empty(metadata.last_name)),
        avatar_url: non_empty(metadata.avatar_url),
    };

    // A concurrent sync may have created the user since the lookup above
    let (user, created) = user_db::insert_user(&db, new_user).await?;
    if !created {
        return Ok((StatusCode::OK, Json(public::UserResponse { user })));
    }
    tracing::info!("Synced new user {}", user.id);

    Ok((StatusCode::CREATED, Json(public::UserResponse { user })))
}

// Registration happens with the auth provider directly
async fn register() -> ApiError {
    ApiError::BadRequest(String::from(
        "Use the auth provider for registration. Call /api/auth/sync after authentication.",
    ))
}

/// Create the auth router
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/sync", post(sync_user))
        // Signing in happens with the auth provider, login only syncs
        .route("/login", post(sync_user))
        .route("/register", post(register))
}
