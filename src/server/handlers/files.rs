use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use tracing::error;

use crate::errors::StorageError;
use crate::server::app::AppState;
use crate::storage::FileStorage;

fn storage_error(err: StorageError) -> Response {
    match err {
        StorageError::InvalidName(_) => (StatusCode::BAD_REQUEST, err.to_string()).into_response(),
        _ => {
            error!("File storage failed: {}", err);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

pub async fn get_file(State(state): State<AppState>, Path(name): Path<String>) -> Response {
    match state.storage.get_content(&name).await {
        Ok(Some(bytes)) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/octet-stream")],
            bytes,
        )
            .into_response(),
        Ok(None) => StatusCode::NOT_FOUND.into_response(),
        Err(err) => storage_error(err),
    }
}

pub async fn put_file(
    State(state): State<AppState>,
    Path(name): Path<String>,
    body: Bytes,
) -> Response {
    match state.storage.write_from_reader(&name, body.as_ref()).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => storage_error(err),
    }
}

pub async fn delete_file(State(state): State<AppState>, Path(name): Path<String>) -> Response {
    match state.storage.delete_content(&name).await {
        Ok(true) => StatusCode::NO_CONTENT.into_response(),
        Ok(false) => StatusCode::NOT_FOUND.into_response(),
        Err(err) => storage_error(err),
    }
}
