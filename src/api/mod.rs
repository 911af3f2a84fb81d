use anyhow::Result;
use axum::{
    Router,
    http::{HeaderValue, Method, header},
    routing::{get, post},
};
use reqwest::Client;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
    set_header::SetResponseHeaderLayer,
};

use crate::extractor::LinkExtractor;
use crate::proxy::StreamProxy;

pub mod handlers;
pub mod models;

const CONTENT_SECURITY_POLICY: &str = "default-src 'self'; script-src 'self' 'unsafe-inline' 'unsafe-eval'; style-src 'self' 'unsafe-inline'; img-src 'self' data:; connect-src 'self'; font-src 'self' data:;";

/// Per-process state shared by every request. Both members only hold the
/// read-only HTTP client.
pub struct AppState {
    pub extractor: LinkExtractor,
    pub proxy: StreamProxy,
}

impl AppState {
    pub fn new(client: Client, base_url: &str) -> Result<AppState> {
        Ok(AppState {
            extractor: LinkExtractor::new(client.clone(), base_url)?,
            proxy: StreamProxy::new(client),
        })
    }
}

pub fn create_router(state: Arc<AppState>, static_dir: &str) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    // Unknown paths get the UI entry point so client-side routing works
    let index = format!("{}/index.html", static_dir.trim_end_matches('/'));
    let spa = ServeDir::new(static_dir).fallback(ServeFile::new(index));

    Router::new()
        // API routes
        .route("/api/search", post(handlers::search_handler))
        .route("/api/download", get(handlers::download_handler))
        .with_state(state)
        // Static file serving for the UI
        .fallback_service(spa)
        // Relayed downloads keep an upstream CSP if they carry one
        .layer(
            ServiceBuilder::new()
                .layer(SetResponseHeaderLayer::if_not_present(
                    header::CONTENT_SECURITY_POLICY,
                    HeaderValue::from_static(CONTENT_SECURITY_POLICY),
                ))
                .layer(cors),
        )
}
