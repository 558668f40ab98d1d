//! Multipart extraction for image uploads
//!
//! Pulls the `file` part plus the optional `context` text field out of a
//! multipart request. Validation and storage are the gateway's job.

use autolot_core::AppError;
use axum::extract::Multipart;

/// An image file extracted from a multipart request.
pub struct ExtractedUpload {
    pub data: Vec<u8>,
    pub content_type: String,
    /// Owning car id, when the photo is uploaded to an existing listing.
    pub context: Option<String>,
}

/// Extract the upload from multipart form data.
///
/// Exactly one `file` part is expected; an optional `context` text field
/// scopes the object key to an existing car.
pub async fn extract_multipart_upload(mut multipart: Multipart) -> Result<ExtractedUpload, AppError> {
    let mut file_data: Option<Vec<u8>> = None;
    let mut content_type: Option<String> = None;
    let mut context: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidInput(format!("Failed to read multipart: {}", e)))?
    {
        let field_name = field.name().map(|s| s.to_string()).unwrap_or_default();

        match field_name.as_str() {
            "file" => {
                if file_data.is_some() {
                    return Err(AppError::InvalidInput(
                        "Multiple file fields are not allowed; send exactly one field named 'file'"
                            .to_string(),
                    ));
                }
                content_type = field.content_type().map(|s: &str| s.to_string());

                let data = field.bytes().await.map_err(|e| {
                    AppError::InvalidInput(format!("Failed to read file data: {}", e))
                })?;

                file_data = Some(data.to_vec());
            }
            "context" => {
                let value = field.text().await.map_err(|e| {
                    AppError::InvalidInput(format!("Failed to read context field: {}", e))
                })?;
                if !value.trim().is_empty() {
                    context = Some(value.trim().to_string());
                }
            }
            _ => {}
        }
    }

    let data = file_data.ok_or_else(|| AppError::InvalidInput("No file provided".to_string()))?;
    let content_type =
        content_type.unwrap_or_else(|| "application/octet-stream".to_string());

    Ok(ExtractedUpload {
        data,
        content_type,
        context,
    })
}
