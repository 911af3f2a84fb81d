use axum::{
    Json,
    extract::{Query, State},
    response::Response,
};
use std::sync::Arc;
use std::time::Instant;

use crate::error::AppError;

use super::AppState;
use super::models::{DownloadParams, SearchRequest, SearchResponse};

pub async fn search_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SearchRequest>,
) -> Result<Json<SearchResponse>, AppError> {
    let start = Instant::now();

    let keyword = request.keyword.as_deref().map(str::trim).unwrap_or_default();
    if keyword.is_empty() {
        return Err(AppError::InvalidInput("Keyword is required".to_string()));
    }

    let projects = state.extractor.search(keyword).await?;

    tracing::info!(
        keyword,
        results = projects.len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "search completed"
    );
    Ok(Json(SearchResponse { projects }))
}

pub async fn download_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<DownloadParams>,
) -> Result<Response, AppError> {
    let url = params.url.unwrap_or_default();
    if url.trim().is_empty() {
        return Err(AppError::InvalidInput("URL is required".to_string()));
    }

    state.proxy.download(&url).await
}
