//! HTTP surface: `GET /api/sysinfo` plus JSON 404s for the rest of `/api`.

use axum::{
    extract::State,
    http::{Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};
use tracing::error;

use crate::ports::{FileSystem, ProcessRunner};
use crate::state::AppState;

pub fn router<F, R>(state: AppState<F, R>) -> Router
where
    F: FileSystem + 'static,
    R: ProcessRunner + 'static,
{
    let cors = CorsLayer::new().allow_origin(Any).allow_methods([
        Method::OPTIONS,
        Method::GET,
        Method::POST,
        Method::PUT,
        Method::PATCH,
        Method::DELETE,
    ]);
    Router::new()
        .route("/api/sysinfo", get(sysinfo_handler::<F, R>))
        .fallback(not_found)
        .layer(cors)
        .with_state(state)
}

async fn sysinfo_handler<F, R>(State(state): State<AppState<F, R>>) -> Response
where
    F: FileSystem + 'static,
    R: ProcessRunner + 'static,
{
    match state.collector.collect().await {
        Ok(snapshot) => Json(snapshot).into_response(),
        Err(e) => {
            error!("sysinfo collection failed: {e:#}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Internal Server Error" })),
            )
                .into_response()
        }
    }
}

async fn not_found(uri: Uri) -> Response {
    if uri.path().starts_with("/api") {
        (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "API endpoint not found" })),
        )
            .into_response()
    } else {
        StatusCode::NOT_FOUND.into_response()
    }
}
