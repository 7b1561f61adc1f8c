pub mod health;

use std::any::Any as PanicPayload;

use axum::{
    http::{header, Method},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};

use crate::errors::AppError;
use crate::generation::handlers;
use crate::state::AppState;

/// Browsers may call from any origin. OPTIONS on any path is answered by the
/// CORS layer with an empty 200.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}

/// A panicking handler still answers with the generic JSON 500 body.
fn panic_response(_: Box<dyn PanicPayload + Send + 'static>) -> Response {
    AppError::Internal(anyhow::anyhow!("request handler panicked")).into_response()
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/generate-application",
            post(handlers::handle_generate_application)
                .fallback(handlers::handle_method_not_allowed),
        )
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(cors_layer())
        .with_state(state)
}
