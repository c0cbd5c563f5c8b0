//! Route configuration and setup.
//!
//! Public routes serve health, docs and thumbnails; protected routes sit behind
//! the bearer token middleware.

pub mod health;

use crate::auth::middleware::{auth_middleware, AuthState};
use crate::constants::{API_BASE, ASSETS_PATH};
use crate::error::redact_error_details;
use crate::handlers;
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tubely_core::{Config, ThumbnailBackend};

/// Room for multipart boundaries and part headers on top of the file itself.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// Setup all application routes
pub fn setup_routes(config: &Config, state: Arc<AppState>) -> Result<Router<()>, anyhow::Error> {
    let cors = setup_cors(config)?;
    let auth_state = Arc::new(AuthState::new(state.security.jwt_secret.clone()));
    let body_limit = state.thumbnails.max_file_size + MULTIPART_OVERHEAD_BYTES;

    let protected = protected_routes(state.clone(), body_limit)
        .layer(axum::middleware::from_fn_with_state(auth_state, auth_middleware));

    let mut app = public_routes(state.clone()).merge(protected);

    if config.thumbnail_backend() == ThumbnailBackend::Filesystem {
        tracing::info!(
            assets_root = %config.assets_root(),
            path = ASSETS_PATH,
            "Serving thumbnail assets from filesystem"
        );
        app = app.nest_service(ASSETS_PATH, ServeDir::new(config.assets_root()));
    }

    let app = app
        .layer(axum::middleware::map_response_with_state(
            state.is_production,
            redact_error_details,
        ))
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    Ok(app)
}

fn setup_cors(config: &Config) -> Result<CorsLayer, anyhow::Error> {
    let cors = if config.cors_origins().iter().any(|o| o == "*") {
        tracing::warn!("CORS configured to allow all origins - not recommended for production");
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers(Any)
    } else {
        let origins = config
            .cors_origins()
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

fn public_routes(state: Arc<AppState>) -> Router<()> {
    Router::new()
        .route("/health", get(health::health_check))
        .route(
            &format!("{}/thumbnails/{{video_id}}", API_BASE),
            get(handlers::thumbnail_get::get_thumbnail),
        )
        .route(
            &format!("{}/openapi.json", API_BASE),
            get(|| async { Json(crate::api_doc::get_openapi_spec()) }),
        )
        .with_state(state)
}

fn protected_routes(state: Arc<AppState>, body_limit: usize) -> Router<()> {
    Router::new()
        .route(
            &format!("{}/thumbnail_upload/{{video_id}}", API_BASE),
            post(handlers::thumbnail_upload::upload_thumbnail)
                .layer(DefaultBodyLimit::max(body_limit)),
        )
        .route(
            &format!("{}/videos/{{video_id}}", API_BASE),
            get(handlers::video_get::get_video),
        )
        .with_state(state)
}
