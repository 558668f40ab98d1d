//! Upload validation
//!
//! Size and content-type checks applied before any storage call is made.

/// Common validation errors for uploaded image files
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("File too large: {size} bytes (max: {max} bytes)")]
    FileTooLarge { size: usize, max: usize },

    #[error("Invalid content type: {content_type} (allowed: {allowed:?})")]
    InvalidContentType {
        content_type: String,
        allowed: Vec<String>,
    },

    #[error("Empty file")]
    EmptyFile,
}

/// Normalize a MIME type by stripping parameters and lowercasing.
/// "image/JPEG; charset=utf-8" becomes "image/jpeg".
pub fn normalize_mime_type(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .unwrap_or(content_type)
        .trim()
        .to_lowercase()
}

/// Validate file size against the configured maximum.
pub fn validate_file_size(size: usize, max: usize) -> Result<(), ValidationError> {
    if size == 0 {
        return Err(ValidationError::EmptyFile);
    }

    if size > max {
        return Err(ValidationError::FileTooLarge { size, max });
    }

    Ok(())
}

/// Validate content type against the configured allow-list.
pub fn validate_content_type(
    content_type: &str,
    allowed: &[String],
) -> Result<(), ValidationError> {
    let normalized = normalize_mime_type(content_type);

    if !allowed.iter().any(|ct| ct == &normalized) {
        return Err(ValidationError::InvalidContentType {
            content_type: content_type.to_string(),
            allowed: allowed.to_vec(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn allowed() -> Vec<String> {
        vec![
            "image/jpeg".to_string(),
            "image/png".to_string(),
            "image/gif".to_string(),
            "image/webp".to_string(),
        ]
    }

    #[test]
    fn test_validate_file_size_rejects_empty() {
        assert!(matches!(
            validate_file_size(0, 5 * 1024 * 1024),
            Err(ValidationError::EmptyFile)
        ));
    }

    #[test]
    fn test_validate_file_size_accepts_exact_max() {
        let max = 5 * 1024 * 1024;
        assert!(validate_file_size(max, max).is_ok());
        assert!(matches!(
            validate_file_size(max + 1, max),
            Err(ValidationError::FileTooLarge { .. })
        ));
    }

    #[test]
    fn test_validate_content_type_normalizes_parameters() {
        assert!(validate_content_type("image/JPEG; charset=utf-8", &allowed()).is_ok());
    }

    #[test]
    fn test_validate_content_type_rejects_non_image() {
        assert!(matches!(
            validate_content_type("application/pdf", &allowed()),
            Err(ValidationError::InvalidContentType { .. })
        ));
    }
}
