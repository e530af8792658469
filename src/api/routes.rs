use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tower::ServiceBuilder;
use axum::extract::DefaultBodyLimit;

use crate::config::AppState;
use super::handlers::*;

pub fn create_router(state: AppState) -> Router {
    let body_limit = state.config.max_body_bytes;

    Router::new()
        .route("/api/upload", post(upload_images))
        .route("/api/images", get(list_images).delete(delete_images))
        .route("/api/images/first", get(first_image))
        .route("/api/images/:id/raw", get(raw_image))
        .route("/api/features", get(feature_collection))
        .route("/api/features.csv", get(features_csv))
        .route("/api/health", get(health))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(DefaultBodyLimit::max(body_limit))
                .layer(CorsLayer::permissive())
        )
        .with_state(state)
}
