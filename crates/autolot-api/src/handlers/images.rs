use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::{ErrorResponse, HttpAppError};
use crate::services::upload::extract_multipart_upload;
use crate::state::AppState;

#[derive(Debug, Serialize, ToSchema)]
pub struct UploadImageResponse {
    /// Public address of the stored image
    pub url: String,
    pub uploaded_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct DeleteImageRequest {
    /// Public address of the image to delete
    pub url: String,
}

/// Upload image handler
///
/// Validates the file (content type, size) and stores it in the configured
/// bucket, returning the public address. Images uploaded before the listing
/// exists are keyed under the draft context; pass `context` with a car id to
/// scope the key to an existing listing.
///
/// # Errors
/// - `AppError::InvalidInput` - Missing file or unsupported content type
/// - `AppError::PayloadTooLarge` - File exceeds size limit
/// - `AppError::Storage` - Storage upload failure
#[utoipa::path(
    post,
    path = "/api/v1/images",
    tag = "images",
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Image uploaded successfully", body = UploadImageResponse),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 413, description = "File too large", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, multipart), fields(operation = "upload_image"))]
pub async fn upload_image(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<UploadImageResponse>), HttpAppError> {
    let upload = extract_multipart_upload(multipart).await?;

    let uploaded = state
        .media
        .gateway
        .upload_image(upload.data, &upload.content_type, upload.context.as_deref())
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(UploadImageResponse {
            url: uploaded.url,
            uploaded_at: uploaded.uploaded_at,
        }),
    ))
}

/// Delete image handler
///
/// Derives the object key from the public address and removes the object.
/// A URL that does not belong to the configured bucket is rejected without
/// any storage call.
#[utoipa::path(
    delete,
    path = "/api/v1/images",
    tag = "images",
    request_body = DeleteImageRequest,
    responses(
        (status = 204, description = "Image deleted"),
        (status = 400, description = "Invalid image URL", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(operation = "delete_image", url = %request.url))]
pub async fn delete_image(
    State(state): State<Arc<AppState>>,
    Json(request): Json<DeleteImageRequest>,
) -> Result<StatusCode, HttpAppError> {
    state.media.gateway.delete_image(&request.url).await?;
    Ok(StatusCode::NO_CONTENT)
}
