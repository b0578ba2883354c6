use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use common::storage::BlobKey;
use tokio_util::io::ReaderStream;
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/files/{key}",
    tag = "Files",
    operation_id = "downloadFile",
    summary = "Download a stored image",
    description = "Public URL of an uploaded object, as written into menu entries. \
        Honours `If-None-Match` against the returned `ETag`.",
    params(("key" = String, Path, description = "Object key, e.g. `menu/<uuid>`")),
    responses(
        (status = 200, description = "Object bytes"),
        (status = 304, description = "Not modified"),
        (status = 400, description = "Malformed key (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Object not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, headers))]
pub async fn download_file(
    State(state): State<AppState>,
    Path(key): Path<String>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let key = BlobKey::parse(&key)?;
    let meta = state.blob_store.metadata(&key).await?;

    let etag_value = format!("\"{}\"", meta.etag);
    if let Some(if_none_match) = headers.get(header::IF_NONE_MATCH)
        && let Ok(val) = if_none_match.to_str()
        && (val == etag_value || val == "*")
    {
        return Ok(StatusCode::NOT_MODIFIED.into_response());
    }

    let reader = state.blob_store.get_stream(&key).await?;
    let body = Body::from_stream(ReaderStream::new(reader));

    Response::builder()
        .header(header::CONTENT_TYPE, meta.content_type)
        .header(header::CONTENT_LENGTH, meta.size)
        .header(header::ETAG, &etag_value)
        .header(header::CACHE_CONTROL, "public, max-age=3600")
        .body(body)
        .map_err(|e| AppError::Internal(format!("Failed to build response: {e}")))
}
