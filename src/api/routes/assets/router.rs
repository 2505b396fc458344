//! Router for the assets API

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use axum::{
    Json, Router,
    body::Bytes,
    extract::{Path, State},
    response::{IntoResponse, Response},
    routing::get,
};
use axum_extra::extract::Query;
use http::header;
use serde_json::{Map, Value};

use super::public;
use crate::api::public::{ApiError, ApiResponse};
use crate::api::state::AppState;
use crate::api::utils::{body_to_object, query_to_object};
use crate::assets::download::{MAX_DOWNLOAD_BYTES, download_filename, fetch_asset};
use crate::assets::icons::icon_svg;

type SharedState = Arc<RwLock<AppState>>;

type SearchResult = Result<Json<ApiResponse<public::SearchResponse>>, ApiError>;

async fn search(state: &SharedState, values: &Map<String, Value>) -> SearchResult {
    let params = public::parse_search_params(values)?;
    let assets = Arc::clone(&state.read().expect("Unable to read shared state").assets);
    let results = assets.search(&params).await;
    Ok(ApiResponse::ok(results))
}

// Asset search endpoint
async fn search_query(
    State(state): State<SharedState>,
    Query(query): Query<HashMap<String, String>>,
) -> SearchResult {
    search(&state, &query_to_object(query)).await
}

// Asset search endpoint with a JSON body
async fn search_body(State(state): State<SharedState>, body: Bytes) -> SearchResult {
    let values = body_to_object(&body)?;
    search(&state, &values).await
}

async fn download(state: &SharedState, values: &Map<String, Value>) -> Result<Response, ApiError> {
    let req = public::parse_download_request(values)?;
    let http = state.read().expect("Unable to read shared state").http.clone();

    tracing::debug!("Downloading asset {}", req.url);
    let asset = fetch_asset(&http, &req.url, MAX_DOWNLOAD_BYTES).await?;

    let filename = download_filename(
        &req.url,
        req.filename.as_deref(),
        asset.content_type.as_deref(),
        chrono::Utc::now().timestamp_millis(),
    );
    let content_type = asset
        .content_type
        .unwrap_or_else(|| String::from("application/octet-stream"));
    let content_length = asset.bytes.len().to_string();

    Ok((
        [
            (header::CONTENT_TYPE, content_type),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
            (header::CONTENT_LENGTH, content_length),
        ],
        asset.bytes,
    )
        .into_response())
}

// Asset download endpoint
async fn download_query(
    State(state): State<SharedState>,
    Query(query): Query<HashMap<String, String>>,
) -> Result<Response, ApiError> {
    download(&state, &query_to_object(query)).await
}

// Asset download endpoint with a JSON body
async fn download_body(
    State(state): State<SharedState>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let values = body_to_object(&body)?;
    download(&state, &values).await
}

// Single icon as SVG
async fn icon(Path((prefix, name)): Path<(String, String)>) -> impl IntoResponse {
    let name = name.strip_suffix(".svg").unwrap_or(&name);
    (
        [
            (header::CONTENT_TYPE, "image/svg+xml"),
            (header::CACHE_CONTROL, "public, max-age=86400"),
        ],
        icon_svg(&prefix, name),
    )
}

/// Create the assets router
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/search", get(search_query).post(search_body))
        .route("/download", get(download_query).post(download_body))
        .route("/icon/{prefix}/{name}", get(icon))
}
