use std::io;

use axum::Json;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use futures::{StreamExt, TryStreamExt};
use serde::Serialize;

use crate::application::services::IngestError;
use crate::domain::UploadRequest;
use crate::presentation::state::AppState;

const FILE_FIELD: &str = "file";

#[derive(Serialize)]
pub struct UploadResponse {
    pub storage_key: String,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Streams the first file part of a multipart form into the ingestor.
#[tracing::instrument(skip(state, multipart))]
pub async fn upload_handler(State(state): State<AppState>, mut multipart: Multipart) -> Response {
    loop {
        let field = match multipart.next_field().await {
            Ok(Some(f)) => f,
            Ok(None) => {
                tracing::warn!("Upload request with no file");
                return error_response(StatusCode::BAD_REQUEST, "No file uploaded".to_string());
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to read multipart");
                return error_response(
                    StatusCode::BAD_REQUEST,
                    format!("Failed to read multipart: {}", e),
                );
            }
        };

        if field.file_name().is_none() && field.name() != Some(FILE_FIELD) {
            continue;
        }

        let display_name = field.file_name().unwrap_or_default().to_string();
        tracing::debug!(display_name = ?display_name, "Processing file upload");

        let stream = field.map_err(io::Error::other).boxed();
        let request = UploadRequest::new(display_name, None, stream);

        return match state.upload_ingestor.ingest(request).await {
            Ok(key) => (
                StatusCode::CREATED,
                Json(UploadResponse {
                    storage_key: key.to_string(),
                }),
            )
                .into_response(),
            Err(e) => error_response(status_for(&e), e.to_string()),
        };
    }
}

fn status_for(error: &IngestError) -> StatusCode {
    match error {
        IngestError::EmptyInput => StatusCode::BAD_REQUEST,
        IngestError::KeyCollision(_) => StatusCode::CONFLICT,
        IngestError::WriteFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
        IngestError::StorageUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
    }
}

fn error_response(status: StatusCode, error: String) -> Response {
    (status, Json(ErrorResponse { error })).into_response()
}
