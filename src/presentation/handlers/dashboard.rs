use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Serialize;

use crate::presentation::state::AppState;

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[tracing::instrument(skip(state))]
pub async fn dashboard_handler(State(state): State<AppState>) -> impl IntoResponse {
    match state.dashboard_source.fetch().await {
        Ok(dashboard) => (StatusCode::OK, Json(dashboard.into_json())).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Dashboard upstream request failed");
            (
                StatusCode::BAD_GATEWAY,
                Json(ErrorResponse {
                    error: "Dashboard upstream unavailable".to_string(),
                }),
            )
                .into_response()
        }
    }
}
