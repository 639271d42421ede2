//! Route configuration and setup

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    routing::{get, post},
    Json, Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::constants::{API_PREFIX, ASSETS_ROUTE, MULTIPART_OVERHEAD_BYTES};
use crate::handlers;
use crate::middleware::request_id_middleware;
use crate::state::AppState;

/// Setup all application routes
pub fn setup_routes(state: Arc<AppState>) -> Result<Router, anyhow::Error> {
    let cors = setup_cors(&state.security.cors_origins)?;

    // Oversized bodies surface as multipart read errors inside the handler (400).
    let body_limit = state
        .upload
        .max_video_size_bytes
        .saturating_add(MULTIPART_OVERHEAD_BYTES);

    let api_routes = Router::new()
        .route(
            &format!("{}/video_upload/{{video_id}}", API_PREFIX),
            post(handlers::video_upload::upload_video),
        )
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state.clone());

    let mut app = Router::new()
        .route("/health", get(handlers::health::liveness_check))
        .route(
            "/api-docs/openapi.json",
            get(|| async { Json(crate::api_doc::get_openapi_spec()) }),
        )
        .merge(api_routes);

    if let Some(ref dir) = state.assets_dir {
        tracing::info!(dir = %dir.display(), route = ASSETS_ROUTE, "Serving local assets");
        app = app.nest_service(ASSETS_ROUTE, ServeDir::new(dir));
    }

    Ok(app
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(axum::middleware::from_fn(request_id_middleware)))
}

fn setup_cors(origins: &[String]) -> Result<CorsLayer, anyhow::Error> {
    let cors = if origins.iter().any(|o| o == "*") {
        tracing::warn!("CORS configured to allow all origins - not recommended for production");
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers(Any)
    } else {
        let origins = origins
            .iter()
            .map(|o| o.parse::<HeaderValue>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| anyhow::anyhow!("Invalid CORS origin: {}", e))?;

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers(Any)
    };
    Ok(cors)
}
