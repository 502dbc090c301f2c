use anyhow::{Context, Result};
use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        rejection::{JsonRejection, QueryRejection, StringRejection},
        DefaultBodyLimit, FromRequest, Multipart, Query, Request, State,
    },
    http::{header::CONTENT_TYPE, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use sift_core::records::read_lines;
use sift_core::{IndexConfig, IndexStats, IndexStore, Record, SearchResult};
use std::fs::File;
use std::io::{BufReader, Cursor};
use std::path::Path;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 64 * 1024 * 1024;

/// Settings for the HTTP layer. Index settings travel with each build request instead.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// When set, rebuild endpoints require a matching `X-ADMIN-TOKEN` header.
    pub admin_token: Option<String>,
    /// Allowed CORS origins; empty means any.
    pub cors_origins: Vec<String>,
    pub max_upload_bytes: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self { admin_token: None, cors_origins: Vec::new(), max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES }
    }
}

impl AppConfig {
    /// Read `ADMIN_TOKEN` and `CORS_ALLOW_ORIGIN` (comma-separated).
    pub fn from_env() -> Self {
        let admin_token = std::env::var("ADMIN_TOKEN").ok().filter(|t| !t.is_empty());
        let cors_origins = std::env::var("CORS_ALLOW_ORIGIN")
            .map(|val| {
                val.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_default();
        Self { admin_token, cors_origins, ..Self::default() }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<IndexStore>,
    pub admin_token: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildParams {
    #[serde(default = "default_tokenize_type")]
    pub tokenize_type: String,
    #[serde(default)]
    pub is_allowed_frequency: bool,
    #[serde(default)]
    pub is_with_stemming: bool,
}
fn default_tokenize_type() -> String { "simple".into() }

impl BuildParams {
    pub fn config(&self) -> sift_core::Result<IndexConfig> {
        Ok(IndexConfig::new(self.tokenize_type.parse()?, self.is_allowed_frequency, self.is_with_stemming))
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    #[serde(default)]
    pub search_text: String,
    #[serde(default = "default_page_size")]
    pub page_size: i64,
    #[serde(default = "default_page_number")]
    pub page_number: i64,
}
fn default_page_size() -> i64 { 10 }
fn default_page_number() -> i64 { 1 }

#[derive(Debug)]
pub enum ApiError {
    Core(sift_core::Error),
    /// Request could not be extracted; keeps the extractor's status.
    Rejected(StatusCode, String),
    BadRequest(String),
    Unauthorized(&'static str),
    Internal(String),
}

impl From<sift_core::Error> for ApiError {
    fn from(e: sift_core::Error) -> Self { ApiError::Core(e) }
}

macro_rules! impl_from_rejection {
    ($($rejection:ty),* $(,)?) => {
        $(
            impl From<$rejection> for ApiError {
                fn from(r: $rejection) -> Self { ApiError::Rejected(r.status(), r.body_text()) }
            }
        )*
    };
}

impl_from_rejection!(QueryRejection, JsonRejection, MultipartRejection, StringRejection);

impl From<MultipartError> for ApiError {
    fn from(e: MultipartError) -> Self { ApiError::BadRequest(format!("malformed multipart upload: {e}")) }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Core(e) => {
                let status = match &e {
                    sift_core::Error::NoIndex => StatusCode::CONFLICT,
                    e if e.is_invalid_input() => StatusCode::BAD_REQUEST,
                    _ => StatusCode::INTERNAL_SERVER_ERROR,
                };
                (status, e.to_string())
            }
            ApiError::Rejected(status, msg) => (status, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg.to_string()),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };
        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

pub fn build_app(store: Arc<IndexStore>, config: AppConfig) -> Router {
    let cors = if config.cors_origins.is_empty() {
        CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
    } else {
        let origins: Vec<_> = config.cors_origins.iter().filter_map(|s| s.parse().ok()).collect();
        CorsLayer::new().allow_origin(AllowOrigin::list(origins)).allow_methods(Any).allow_headers(Any)
    };
    let state = AppState { store, admin_token: config.admin_token };

    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/api/documents", get(search_handler).post(build_from_upload))
        .route("/api/documents/records", post(build_from_records))
        .route("/api/index", get(stats_handler))
        .with_state(state)
        .layer(DefaultBodyLimit::max(config.max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

pub async fn search_handler(
    State(state): State<AppState>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<SearchResult>, ApiError> {
    let Query(params) = params?;
    let result = state.store.search(&params.search_text, params.page_size, params.page_number)?;
    Ok(Json(result))
}

/// Rebuild from a line-per-document upload; each document's id is its line number.
///
/// `multipart/form-data` requests carry the file in the `file` field. Any other content type is
/// read as the raw text.
pub async fn build_from_upload(
    State(state): State<AppState>,
    params: Result<Query<BuildParams>, QueryRejection>,
    request: Request,
) -> Result<StatusCode, ApiError> {
    authorize(&state, request.headers())?;
    let Query(params) = params?;
    let config = params.config()?;
    let text = if is_multipart(request.headers()) {
        let multipart = Multipart::from_request(request, &state).await?;
        read_file_field(multipart).await?
    } else {
        String::from_request(request, &state).await?
    };
    let records = read_lines(Cursor::new(text))?;
    rebuild(state.store, records, config).await
}

/// Rebuild from explicit `{id, text}` records.
pub async fn build_from_records(
    State(state): State<AppState>,
    headers: HeaderMap,
    params: Result<Query<BuildParams>, QueryRejection>,
    records: Result<Json<Vec<Record>>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    authorize(&state, &headers)?;
    let Query(params) = params?;
    let config = params.config()?;
    let Json(records) = records?;
    rebuild(state.store, records, config).await
}

pub async fn stats_handler(State(state): State<AppState>) -> Result<Json<IndexStats>, ApiError> {
    Ok(Json(state.store.stats()?))
}

async fn rebuild(store: Arc<IndexStore>, records: Vec<Record>, config: IndexConfig) -> Result<StatusCode, ApiError> {
    tokio::task::spawn_blocking(move || store.rebuild(records, config))
        .await
        .map_err(|e| ApiError::Internal(format!("index build task failed: {e}")))??;
    Ok(StatusCode::NO_CONTENT)
}

fn is_multipart(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.trim_start().to_ascii_lowercase().starts_with("multipart/form-data"))
}

async fn read_file_field(mut multipart: Multipart) -> Result<String, ApiError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() == Some("file") {
            return Ok(field.text().await?);
        }
    }
    Err(ApiError::BadRequest("multipart upload has no `file` field".into()))
}

fn authorize(state: &AppState, headers: &HeaderMap) -> Result<(), ApiError> {
    let Some(required) = &state.admin_token else {
        return Ok(());
    };
    let provided = headers.get("X-ADMIN-TOKEN").and_then(|v| v.to_str().ok()).unwrap_or("");
    if provided == required.as_str() {
        Ok(())
    } else {
        Err(ApiError::Unauthorized("invalid admin token"))
    }
}

/// Build the initial index from a line-per-document file.
pub fn load_seed(store: &IndexStore, path: &Path, config: IndexConfig) -> Result<usize> {
    let file = File::open(path).with_context(|| format!("opening seed file {}", path.display()))?;
    let records = read_lines(BufReader::new(file))?;
    let snapshot = store.rebuild(records, config)?;
    Ok(snapshot.num_docs())
}
