//! Client-side attachment constraints.
//!
//! These checks are a UX convenience only; the backend performs the
//! authoritative validation. Type checks go by file extension, matching
//! what the upload dialog filters on.

use thiserror::Error;

use ceritadata_client::FilePart;

/// Maximum size for an image attachment: 2 MB.
pub const MAX_IMAGE_BYTES: usize = 2 * 1024 * 1024;

/// Maximum size for a tabular data source file: 10 MB.
pub const MAX_DATA_FILE_BYTES: usize = 10 * 1024 * 1024;

const IMAGE_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];
const DATA_EXTENSIONS: [&str; 2] = ["xlsx", "xls"];

/// Error type for attachment validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AttachmentError {
    /// The file is not a supported image type.
    #[error("{0}: images must be JPG or PNG")]
    UnsupportedImageType(String),

    /// The file is not a supported data source type.
    #[error("{0}: data files must be XLSX or XLS")]
    UnsupportedDataType(String),

    /// The file exceeds the size limit.
    #[error("{name}: file exceeds the {limit_mb} MB limit")]
    TooLarge {
        /// File name.
        name: String,
        /// Limit in whole megabytes.
        limit_mb: usize,
    },
}

/// Checks an image attachment (JPEG/PNG, at most 2 MB).
///
/// # Errors
///
/// Returns the violated constraint.
pub fn validate_image(part: &FilePart) -> Result<(), AttachmentError> {
    if !has_extension(&part.file_name, &IMAGE_EXTENSIONS) {
        return Err(AttachmentError::UnsupportedImageType(part.file_name.clone()));
    }
    if part.size() > MAX_IMAGE_BYTES {
        return Err(AttachmentError::TooLarge {
            name: part.file_name.clone(),
            limit_mb: MAX_IMAGE_BYTES / (1024 * 1024),
        });
    }
    Ok(())
}

/// Checks a data source attachment (XLSX/XLS, at most 10 MB).
///
/// # Errors
///
/// Returns the violated constraint.
pub fn validate_data_file(part: &FilePart) -> Result<(), AttachmentError> {
    if !has_extension(&part.file_name, &DATA_EXTENSIONS) {
        return Err(AttachmentError::UnsupportedDataType(part.file_name.clone()));
    }
    if part.size() > MAX_DATA_FILE_BYTES {
        return Err(AttachmentError::TooLarge {
            name: part.file_name.clone(),
            limit_mb: MAX_DATA_FILE_BYTES / (1024 * 1024),
        });
    }
    Ok(())
}

fn has_extension(file_name: &str, allowed: &[&str]) -> bool {
    file_name
        .rsplit_once('.')
        .is_some_and(|(_, ext)| allowed.contains(&ext.to_ascii_lowercase().as_str()))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn part(name: &str, size: usize) -> FilePart {
        FilePart::new(name, "application/octet-stream", vec![0; size])
    }

    #[test]
    fn accepts_jpeg_and_png_by_extension() {
        assert!(validate_image(&part("cover.jpg", 100)).is_ok());
        assert!(validate_image(&part("Cover.JPEG", 100)).is_ok());
        assert!(validate_image(&part("grafik.png", 100)).is_ok());
    }

    #[test]
    fn rejects_other_image_types() {
        assert_eq!(
            validate_image(&part("anim.gif", 100)),
            Err(AttachmentError::UnsupportedImageType("anim.gif".to_string()))
        );
        assert!(validate_image(&part("noextension", 100)).is_err());
    }

    #[test]
    fn rejects_oversized_image() {
        let err = validate_image(&part("big.png", MAX_IMAGE_BYTES + 1)).unwrap_err();
        assert_eq!(
            err,
            AttachmentError::TooLarge {
                name: "big.png".to_string(),
                limit_mb: 2
            }
        );
        assert!(validate_image(&part("edge.png", MAX_IMAGE_BYTES)).is_ok());
    }

    #[test]
    fn data_file_extension_and_size() {
        assert!(validate_data_file(&part("data.xlsx", 100)).is_ok());
        assert!(validate_data_file(&part("old.XLS", 100)).is_ok());
        assert!(validate_data_file(&part("data.csv", 100)).is_err());
        assert!(validate_data_file(&part("data.xlsx", MAX_DATA_FILE_BYTES + 1)).is_err());
    }
}
