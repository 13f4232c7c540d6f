use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use nd_pipeline::{ErrorResponse, SummarizeRequest};
use serde_json::json;

use crate::AppState;

pub async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

/// POST /api/summarize — body `{ url?, text? }`. 200 with the success
/// envelope; 400 for missing/unusable input; 502 for upstream fetch
/// failures. A malformed or absent JSON body is treated as empty.
pub async fn summarize(
    State(state): State<Arc<AppState>>,
    body: Option<Json<SummarizeRequest>>,
) -> Response {
    let Json(request) = body.unwrap_or_default();

    match state.pipeline.run(request).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(err) => {
            let status = StatusCode::from_u16(err.status_code())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            (status, Json(ErrorResponse::from(&err))).into_response()
        }
    }
}
